//! The lifecycle shared by every mutation dialog.
//!
//! `Closed -> Open -> Submitting -> Closed` on success, or back to an open
//! `Failed` state with the draft untouched on failure. What the dialog edits,
//! how it validates and which endpoint it calls come from a [`DialogAction`].

mod actions;
pub mod preview;

use std::mem;

use storefront_api::Client;

use crate::notify::{Notifier, Toast};
use crate::validation::FieldErrors;

pub use self::actions::{
    ChangeImageAction, CreateAction, DeleteAction, EditAction, FormResource, ToggleStatusAction,
};
pub use self::preview::{ImageSelection, ObjectUrlStore, PreviewHandle, PreviewStore};

/// One kind of mutation: its draft, its validation gate and its request.
#[allow(async_fn_in_trait)]
pub trait DialogAction {
    /// What the user edits while the dialog is open.
    type Draft;
    /// What validation turns the draft into.
    type Request;
    /// Decoded success response.
    type Output;

    /// Draft shown when the dialog opens.
    fn seed(&self) -> Self::Draft;

    /// Whether a cancelled draft is shown again on the next open.
    fn retains_draft(&self) -> bool {
        false
    }

    fn validate(&self, draft: &Self::Draft) -> Result<Self::Request, FieldErrors>;

    async fn send(
        &self,
        client: &Client,
        request: Self::Request,
    ) -> Result<Self::Output, storefront_api::Error>;

    fn success_toast(&self, output: &Self::Output) -> Toast;

    fn failure_toast(&self) -> Toast;

    /// Toast for a draft that failed validation. Forms only show inline
    /// errors, so the default is none.
    fn invalid_toast(&self, _errors: &FieldErrors) -> Option<Toast> {
        None
    }
}

#[derive(Debug)]
pub enum DialogState<D> {
    Closed,
    Open { draft: D, errors: FieldErrors },
    Submitting { draft: D },
    /// Still open; the request failed and the draft is kept for a retry.
    Failed { draft: D, message: String },
}

impl<D> DialogState<D> {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, DialogState::Submitting { .. })
    }

    pub fn draft(&self) -> Option<&D> {
        match self {
            DialogState::Closed => None,
            DialogState::Open { draft, .. }
            | DialogState::Submitting { draft }
            | DialogState::Failed { draft, .. } => Some(draft),
        }
    }
}

/// How a dialog may be dismissed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialogPolicy {
    pub close_on_backdrop: bool,
}

impl Default for DialogPolicy {
    fn default() -> Self {
        Self {
            close_on_backdrop: true,
        }
    }
}

/// Result of a submission attempt.
#[derive(Debug)]
pub enum SubmitOutcome<T> {
    /// The request succeeded and the dialog closed. The host should refresh
    /// the list view.
    Completed(T),
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The request failed; the dialog is still open.
    Failed(storefront_api::Error),
    /// The dialog was closed or already submitting.
    Ignored,
}

impl<T> SubmitOutcome<T> {
    pub fn needs_refresh(&self) -> bool {
        matches!(self, SubmitOutcome::Completed(_))
    }
}

pub struct MutationDialog<A: DialogAction> {
    action: A,
    state: DialogState<A::Draft>,
    retained: Option<A::Draft>,
    policy: DialogPolicy,
}

impl<A: DialogAction> MutationDialog<A> {
    pub fn new(action: A) -> Self {
        Self::with_policy(action, DialogPolicy::default())
    }

    pub fn with_policy(action: A, policy: DialogPolicy) -> Self {
        Self {
            action,
            state: DialogState::Closed,
            retained: None,
            policy,
        }
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    pub fn state(&self) -> &DialogState<A::Draft> {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn draft(&self) -> Option<&A::Draft> {
        self.state.draft()
    }

    /// The draft, editable unless a submission is in flight.
    pub fn draft_mut(&mut self) -> Option<&mut A::Draft> {
        match &mut self.state {
            DialogState::Open { draft, .. } | DialogState::Failed { draft, .. } => Some(draft),
            DialogState::Closed | DialogState::Submitting { .. } => None,
        }
    }

    /// Field errors from the last validation, if the dialog is open.
    pub fn errors(&self) -> Option<&FieldErrors> {
        match &self.state {
            DialogState::Open { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Opens the dialog. Does nothing if it is already open.
    pub fn open(&mut self) {
        if self.state.is_open() {
            return;
        }
        let draft = match self.retained.take() {
            Some(draft) => draft,
            None => self.action.seed(),
        };
        self.state = DialogState::Open {
            draft,
            errors: FieldErrors::new(),
        };
    }

    /// Closes the dialog unless a submission is in flight. Returns whether
    /// the dialog is closed afterwards.
    pub fn cancel(&mut self) -> bool {
        match mem::replace(&mut self.state, DialogState::Closed) {
            DialogState::Closed => {}
            submitting @ DialogState::Submitting { .. } => {
                self.state = submitting;
                return false;
            }
            DialogState::Open { draft, .. } | DialogState::Failed { draft, .. } => {
                if self.action.retains_draft() {
                    self.retained = Some(draft);
                }
            }
        }
        true
    }

    /// Click outside the dialog.
    pub fn backdrop_dismiss(&mut self) -> bool {
        if !self.policy.close_on_backdrop {
            return !self.state.is_open();
        }
        self.cancel()
    }

    /// Runs the validation gate. On success the dialog is submitting and the
    /// request is returned for sending; otherwise the outcome to report.
    pub fn begin_submit(
        &mut self,
        notifier: &dyn Notifier,
    ) -> Result<A::Request, SubmitOutcome<A::Output>> {
        let draft = match mem::replace(&mut self.state, DialogState::Closed) {
            DialogState::Open { draft, .. } | DialogState::Failed { draft, .. } => draft,
            other => {
                self.state = other;
                return Err(SubmitOutcome::Ignored);
            }
        };

        match self.action.validate(&draft) {
            Ok(request) => {
                self.state = DialogState::Submitting { draft };
                Ok(request)
            }
            Err(errors) => {
                if let Some(toast) = self.action.invalid_toast(&errors) {
                    notifier.notify(toast);
                }
                self.state = DialogState::Open {
                    draft,
                    errors: errors.clone(),
                };
                Err(SubmitOutcome::Invalid(errors))
            }
        }
    }

    /// Applies the response of a request returned by
    /// [`begin_submit`](Self::begin_submit). Emits exactly one toast.
    pub fn finish(
        &mut self,
        result: Result<A::Output, storefront_api::Error>,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome<A::Output> {
        let draft = match mem::replace(&mut self.state, DialogState::Closed) {
            DialogState::Submitting { draft } => draft,
            other => {
                self.state = other;
                return SubmitOutcome::Ignored;
            }
        };

        match result {
            Ok(output) => {
                notifier.notify(self.action.success_toast(&output));
                self.retained = None;
                drop(draft);
                SubmitOutcome::Completed(output)
            }
            Err(e) => {
                tracing::error!("Submission failed: {}", e);
                let toast = self.action.failure_toast();
                let message = toast.description.clone();
                notifier.notify(toast);
                self.state = DialogState::Failed { draft, message };
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Validates, sends and applies the response.
    pub async fn submit(
        &mut self,
        client: &Client,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome<A::Output> {
        let request = match self.begin_submit(notifier) {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };
        let result = self.action.send(client, request).await;
        self.finish(result, notifier)
    }
}
