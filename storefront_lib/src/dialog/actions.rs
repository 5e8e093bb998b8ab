use std::marker::PhantomData;
use std::sync::Arc;

use storefront_api::types::{EntityId, EntityStatus, EntitySummary, ImageUpload, StatusResponse};
use storefront_api::{Categories, Client, Products};

use super::preview::{ImageSelection, PreviewStore};
use super::{DialogAction, MutationDialog};
use crate::copy::{self, ResourceCopy, Verb};
use crate::notify::{Notifier, Toast};
use crate::validation::{CategoryDraft, FieldErrors, ProductDraft, SchemaMode};

/// Resources with a create/edit form.
pub trait FormResource: ResourceCopy {
    type Draft: Clone + Default;

    fn draft_from(item: &Self::Item) -> Self::Draft;

    fn validate(draft: &Self::Draft, mode: SchemaMode) -> Result<Self::Payload, FieldErrors>;
}

impl FormResource for Categories {
    type Draft = CategoryDraft;

    fn draft_from(item: &Self::Item) -> CategoryDraft {
        CategoryDraft::from_entity(item)
    }

    fn validate(draft: &CategoryDraft, mode: SchemaMode) -> Result<Self::Payload, FieldErrors> {
        draft.validate(mode)
    }
}

impl FormResource for Products {
    type Draft = ProductDraft;

    fn draft_from(item: &Self::Item) -> ProductDraft {
        ProductDraft::from_product(item)
    }

    // Products use one schema for both create and edit.
    fn validate(draft: &ProductDraft, _mode: SchemaMode) -> Result<Self::Payload, FieldErrors> {
        draft.validate()
    }
}

pub struct CreateAction<R> {
    resource: PhantomData<R>,
}

impl<R> CreateAction<R> {
    pub fn new() -> Self {
        Self {
            resource: PhantomData,
        }
    }
}

impl<R> Default for CreateAction<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: FormResource> DialogAction for CreateAction<R> {
    type Draft = R::Draft;
    type Request = R::Payload;
    type Output = ();

    fn seed(&self) -> R::Draft {
        Default::default()
    }

    fn retains_draft(&self) -> bool {
        true
    }

    fn validate(&self, draft: &R::Draft) -> Result<R::Payload, FieldErrors> {
        R::validate(draft, SchemaMode::Create)
    }

    async fn send(
        &self,
        client: &Client,
        request: R::Payload,
    ) -> Result<(), storefront_api::Error> {
        client.create::<R>(&request).await
    }

    fn success_toast(&self, _output: &()) -> Toast {
        copy::success(&R::NOUN, Verb::Create)
    }

    fn failure_toast(&self) -> Toast {
        copy::failure(&R::NOUN, Verb::Create)
    }
}

/// Edits one entity; the form opens with its current values.
pub struct EditAction<R: FormResource> {
    id: EntityId,
    initial: R::Draft,
}

impl<R: FormResource> EditAction<R> {
    pub fn new(item: &R::Item) -> Self {
        Self {
            id: item.id().to_string(),
            initial: R::draft_from(item),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl<R: FormResource> DialogAction for EditAction<R> {
    type Draft = R::Draft;
    type Request = R::Payload;
    type Output = ();

    fn seed(&self) -> R::Draft {
        self.initial.clone()
    }

    fn validate(&self, draft: &R::Draft) -> Result<R::Payload, FieldErrors> {
        R::validate(draft, SchemaMode::Edit)
    }

    async fn send(
        &self,
        client: &Client,
        request: R::Payload,
    ) -> Result<(), storefront_api::Error> {
        client.edit::<R>(&self.id, &request).await
    }

    fn success_toast(&self, _output: &()) -> Toast {
        copy::success(&R::NOUN, Verb::Edit)
    }

    fn failure_toast(&self) -> Toast {
        copy::failure(&R::NOUN, Verb::Edit)
    }
}

/// Confirmation dialog for deleting one entity.
pub struct DeleteAction<R> {
    id: EntityId,
    resource: PhantomData<R>,
}

impl<R: ResourceCopy> DeleteAction<R> {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            resource: PhantomData,
        }
    }

    pub fn prompt(&self) -> String {
        copy::confirm_prompt(&R::NOUN, "deletar")
    }
}

impl<R: ResourceCopy> DialogAction for DeleteAction<R> {
    type Draft = ();
    type Request = ();
    type Output = ();

    fn seed(&self) {}

    fn validate(&self, _draft: &()) -> Result<(), FieldErrors> {
        Ok(())
    }

    async fn send(&self, client: &Client, _request: ()) -> Result<(), storefront_api::Error> {
        client.delete::<R>(&self.id).await
    }

    fn success_toast(&self, _output: &()) -> Toast {
        copy::success(&R::NOUN, Verb::Delete)
    }

    fn failure_toast(&self) -> Toast {
        copy::failure(&R::NOUN, Verb::Delete)
    }
}

/// The active/inactive switch. There is no form; the dialog only confirms.
pub struct ToggleStatusAction<R> {
    id: EntityId,
    current: EntityStatus,
    resource: PhantomData<R>,
}

impl<R: ResourceCopy> ToggleStatusAction<R> {
    pub fn new(id: &str, current: EntityStatus) -> Self {
        Self {
            id: id.to_string(),
            current,
            resource: PhantomData,
        }
    }

    /// Reads the current status from the row's `disabled_at`.
    pub fn for_item(item: &R::Item) -> Self {
        Self::new(item.id(), item.status())
    }

    pub fn current(&self) -> EntityStatus {
        self.current
    }

    /// "desativar" for an active entity, "ativar" for an inactive one.
    pub fn verb(&self) -> &'static str {
        copy::toggle_verb(self.current)
    }

    pub fn prompt(&self) -> String {
        copy::confirm_prompt(&R::NOUN, self.verb())
    }
}

impl<R: ResourceCopy> DialogAction for ToggleStatusAction<R> {
    type Draft = ();
    type Request = ();
    type Output = StatusResponse;

    fn seed(&self) {}

    fn validate(&self, _draft: &()) -> Result<(), FieldErrors> {
        Ok(())
    }

    async fn send(
        &self,
        client: &Client,
        _request: (),
    ) -> Result<StatusResponse, storefront_api::Error> {
        client.toggle_status::<R>(&self.id).await
    }

    fn success_toast(&self, output: &StatusResponse) -> Toast {
        copy::status_changed(&R::NOUN, output.status)
    }

    fn failure_toast(&self) -> Toast {
        copy::status_failed(&R::NOUN)
    }
}

/// Uploads a new image for one entity.
pub struct ChangeImageAction<R> {
    id: EntityId,
    store: Arc<dyn PreviewStore>,
    resource: PhantomData<R>,
}

impl<R: ResourceCopy> ChangeImageAction<R> {
    pub fn new(id: &str, store: Arc<dyn PreviewStore>) -> Self {
        Self {
            id: id.to_string(),
            store,
            resource: PhantomData,
        }
    }
}

impl<R: ResourceCopy> DialogAction for ChangeImageAction<R> {
    type Draft = ImageSelection;
    type Request = ImageUpload;
    type Output = ();

    fn seed(&self) -> ImageSelection {
        ImageSelection::new(Arc::clone(&self.store))
    }

    fn validate(&self, draft: &ImageSelection) -> Result<ImageUpload, FieldErrors> {
        match draft.file() {
            Some(file) => Ok(file.clone()),
            None => {
                let mut errors = FieldErrors::new();
                errors.insert("image", "Nenhuma imagem selecionada");
                Err(errors)
            }
        }
    }

    async fn send(
        &self,
        client: &Client,
        request: ImageUpload,
    ) -> Result<(), storefront_api::Error> {
        client.change_image::<R>(&self.id, request).await
    }

    fn success_toast(&self, _output: &()) -> Toast {
        copy::image_updated(&R::NOUN)
    }

    fn failure_toast(&self) -> Toast {
        copy::image_failed(&R::NOUN)
    }

    fn invalid_toast(&self, _errors: &FieldErrors) -> Option<Toast> {
        Some(copy::missing_file())
    }
}

impl<R: ResourceCopy> MutationDialog<ChangeImageAction<R>> {
    /// Picks a file. Anything outside `image/*` is rejected with a toast and
    /// the current selection is kept.
    pub fn select_file(&mut self, file: ImageUpload, notifier: &dyn Notifier) -> bool {
        if !file.is_image() {
            notifier.notify(copy::invalid_file());
            return false;
        }
        match self.draft_mut() {
            Some(selection) => {
                selection.select(file);
                true
            }
            None => false,
        }
    }

    pub fn remove_file(&mut self) {
        if let Some(selection) = self.draft_mut() {
            selection.clear();
        }
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.draft().and_then(ImageSelection::preview_url)
    }
}
