//! Client-side behaviour of the storefront admin: list views driven by the
//! location, validation schemas, and the mutation dialog lifecycle.
//!
//! Wraps the `storefront_api` crate. Nothing here keeps global state: list
//! views read their state from a [`Location`], and dialogs own their drafts.

pub mod config;
pub mod copy;
pub mod dialog;
pub mod error;
pub mod listing;
pub mod navigation;
pub mod notify;
pub mod validation;

pub use storefront_api;
pub use storefront_api::types;
pub use storefront_api::{
    Categories, Client, ListQuery, Location, PageSize, Products, Resource, SortDirection,
    StatusFilter,
};

pub use config::AdminConfig;
pub use dialog::{DialogAction, DialogState, MutationDialog, SubmitOutcome};
pub use error::AdminError;
pub use listing::{ListController, LoadOutcome};
pub use navigation::{Paginator, SearchBar};
pub use notify::{Notifier, Toast, ToastKind};
pub use validation::FieldErrors;
