//! CLI subcommand implementations.
//!
//! Every command works on a list view location: `list` navigates and prints
//! it, mutations drive one dialog and print the refreshed view on success.

pub mod categories;
pub mod products;

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use clap::Args;
use storefront_lib::copy::ResourceCopy;
use storefront_lib::dialog::{
    ChangeImageAction, CreateAction, DeleteAction, EditAction, FormResource, ObjectUrlStore,
    PreviewStore, ToggleStatusAction,
};
use storefront_lib::listing::LoadOutcome;
use storefront_lib::types::{EntityStatus, EntitySummary, ImageUpload, Page};
use storefront_lib::{
    Client, DialogAction, ListController, Location, MutationDialog, Notifier, PageSize,
    Paginator, SearchBar, StatusFilter, SubmitOutcome, Toast,
};

use crate::output::{OutputFormat, Render};

/// Flags describing the list view a command works on.
#[derive(Args, Clone, Debug, Default)]
pub struct ListArgs {
    /// Current list location query, e.g. "search=suco&page=2"
    #[arg(long, default_value = "")]
    pub location: String,

    /// Search text; an empty string clears the search
    #[arg(long)]
    pub search: Option<String>,

    /// Status filter: all, active, inactive
    #[arg(long)]
    pub status: Option<String>,

    /// Rows per page: 5, 10, 20, 50, 100
    #[arg(long)]
    pub limit: Option<u32>,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Column to sort by; naming the active column flips the direction
    #[arg(long)]
    pub sort: Option<String>,
}

/// Prints toasts to stderr.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, toast: Toast) {
        let tag = if toast.is_error() { "erro" } else { "ok" };
        eprintln!("[{}] {}: {}", tag, toast.title, toast.description);
    }
}

/// Applies the search, status, page size and sort flags to the location, the
/// way the corresponding controls would.
pub fn navigate(route: &str, args: &ListArgs) -> Result<Location> {
    let mut location = Location::from_query(route, &args.location);
    let mut search_bar = SearchBar::from_location(&location);

    if let Some(search) = &args.search {
        search_bar.set_search(search);
        location = search_bar.submit(&location)?;
    }

    if let Some(status) = &args.status {
        let status = status.parse::<StatusFilter>().map_err(|_| {
            anyhow!(
                "invalid status '{}': expected all, active or inactive",
                status
            )
        })?;
        location = search_bar.select_status(status, &location);
    }

    if let Some(limit) = args.limit {
        let size = PageSize::try_from(limit)
            .map_err(|_| anyhow!("invalid limit {}: expected 5, 10, 20, 50 or 100", limit))?;
        location = Paginator::new(0, size.get(), 1).change_page_size(size, &location);
    }

    if let Some(column) = &args.sort {
        location = storefront_lib::navigation::toggle_sort(&location, column);
    }

    Ok(location)
}

fn applied<T>(outcome: &LoadOutcome<T>) -> Result<&Page<T>> {
    outcome
        .page()
        .ok_or_else(|| anyhow!("list load was superseded by a newer one"))
}

/// Loads the list view for the flags and prints it.
pub async fn list<R>(
    client: &Client,
    route: &str,
    args: &ListArgs,
    format: &OutputFormat,
) -> Result<()>
where
    R: ResourceCopy,
    R::Item: Render,
{
    let controller = open_view::<R>(route, args)?;

    // The page buttons only exist once the first page has loaded.
    if let Some(page) = args.page {
        let location = controller.location();
        let outcome = controller.load(client, &location).await?;
        let mut paginator = Paginator::for_page(applied(&outcome)?);
        match paginator.go_to(page, &location) {
            Some(next) => {
                controller.load(client, &next).await?;
            }
            None if page == 1 => {}
            None => bail!(
                "page {} is out of range (1-{})",
                page,
                paginator.page_count()
            ),
        }
    } else {
        controller.refresh(client).await?;
    }

    show(&controller, format)
}

/// The list view a command starts from. Nothing is loaded yet.
pub fn open_view<R: ResourceCopy>(route: &str, args: &ListArgs) -> Result<ListController<R>> {
    Ok(ListController::new(navigate(route, args)?))
}

/// Prints the view's current page, its paginator summary and location.
fn show<R>(controller: &ListController<R>, format: &OutputFormat) -> Result<()>
where
    R: ResourceCopy,
    R::Item: Render,
{
    let page = controller
        .current()
        .ok_or_else(|| anyhow!("{} list has not been loaded", R::NOUN.plural))?;
    <R::Item as Render>::render(&page.data, format)?;

    let paginator = Paginator::for_page(&page);
    eprintln!(
        "{} | Página {}/{} | {}",
        paginator.summary(),
        paginator.page(),
        paginator.page_count(),
        controller.location()
    );
    Ok(())
}

/// Loads the view and finds one of its rows by id. Edit forms are only
/// reachable from a visible row.
pub async fn find_in_view<R>(
    controller: &ListController<R>,
    client: &Client,
    id: &str,
) -> Result<R::Item>
where
    R: ResourceCopy,
    R::Item: Clone,
{
    let outcome = controller.refresh(client).await?;
    let found = applied(&outcome)?
        .data
        .iter()
        .find(|item| item.id() == id)
        .cloned();
    found.ok_or_else(|| anyhow!("{} {} is not in the current list view", R::NOUN.singular, id))
}

/// Submits an open dialog and, on success, refreshes the view it was opened
/// from and prints it.
pub async fn submit_and_refresh<A, R>(
    dialog: &mut MutationDialog<A>,
    controller: &ListController<R>,
    client: &Client,
    format: &OutputFormat,
) -> Result<()>
where
    A: DialogAction,
    R: ResourceCopy,
    R::Item: Render,
{
    match dialog.submit(client, &StderrNotifier).await {
        SubmitOutcome::Completed(_) => {
            let outcome = controller.refresh(client).await?;
            applied(&outcome)?;
            show(controller, format)
        }
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("  {}: {}", field, message);
            }
            bail!("validation failed: {}", errors)
        }
        SubmitOutcome::Failed(e) => Err(e.into()),
        SubmitOutcome::Ignored => bail!("dialog is not open"),
    }
}

pub async fn create<R>(
    client: &Client,
    route: &str,
    draft: R::Draft,
    view: &ListArgs,
    format: &OutputFormat,
) -> Result<()>
where
    R: FormResource,
    R::Item: Render,
{
    let controller = open_view::<R>(route, view)?;
    let mut dialog = MutationDialog::new(CreateAction::<R>::new());
    dialog.open();
    if let Some(current) = dialog.draft_mut() {
        *current = draft;
    }
    submit_and_refresh(&mut dialog, &controller, client, format).await
}

/// Opens the edit form for a row of the view and applies `change` to the
/// seeded draft before submitting.
pub async fn edit<R>(
    client: &Client,
    route: &str,
    id: &str,
    change: impl FnOnce(&mut R::Draft),
    view: &ListArgs,
    format: &OutputFormat,
) -> Result<()>
where
    R: FormResource,
    R::Item: Clone + Render,
{
    let controller = open_view::<R>(route, view)?;
    let item = find_in_view(&controller, client, id).await?;
    let mut dialog = MutationDialog::new(EditAction::<R>::new(&item));
    dialog.open();
    if let Some(draft) = dialog.draft_mut() {
        change(draft);
    }
    submit_and_refresh(&mut dialog, &controller, client, format).await
}

pub async fn delete<R>(
    client: &Client,
    route: &str,
    id: &str,
    view: &ListArgs,
    format: &OutputFormat,
) -> Result<()>
where
    R: ResourceCopy,
    R::Item: Render,
{
    let controller = open_view::<R>(route, view)?;
    let mut dialog = MutationDialog::new(DeleteAction::<R>::new(id));
    eprintln!("{}", dialog.action().prompt());
    dialog.open();
    submit_and_refresh(&mut dialog, &controller, client, format).await
}

/// `inactive` tells the confirmation which way the switch goes.
pub async fn toggle_status<R>(
    client: &Client,
    route: &str,
    id: &str,
    inactive: bool,
    view: &ListArgs,
    format: &OutputFormat,
) -> Result<()>
where
    R: ResourceCopy,
    R::Item: Render,
{
    let current = if inactive {
        EntityStatus::Inactive
    } else {
        EntityStatus::Active
    };
    let controller = open_view::<R>(route, view)?;
    let mut dialog = MutationDialog::new(ToggleStatusAction::<R>::new(id, current));
    eprintln!("{}", dialog.action().prompt());
    dialog.open();
    submit_and_refresh(&mut dialog, &controller, client, format).await
}

pub async fn change_image<R>(
    client: &Client,
    route: &str,
    id: &str,
    file: &Path,
    view: &ListArgs,
    format: &OutputFormat,
) -> Result<()>
where
    R: ResourceCopy,
    R::Item: Render,
{
    let controller = open_view::<R>(route, view)?;
    let store: Arc<dyn PreviewStore> = Arc::new(ObjectUrlStore::new());
    let mut dialog = MutationDialog::new(ChangeImageAction::<R>::new(id, store));
    dialog.open();

    let image = read_image(file)?;
    if !dialog.select_file(image, &StderrNotifier) {
        bail!("{} is not an image", file.display());
    }
    submit_and_refresh(&mut dialog, &controller, client, format).await
}

/// Reads an image from disk, guessing its MIME type from the extension.
pub fn read_image(path: &Path) -> Result<ImageUpload> {
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow!("failed to read {}: {}", path.display(), e))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let content_type = match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    };
    Ok(ImageUpload::new(&file_name, content_type, bytes))
}
