//! Marker types naming the backend collections.

use serde::{de::DeserializeOwned, Serialize};

use crate::types::{Category, CategoryPayload, EntitySummary, Product, ProductPayload};

/// A backend collection exposing the `list` / `create` / `edit` / `delete` /
/// `disable` / `change-image` endpoint family under [`Resource::PATH`].
pub trait Resource {
    /// Path segment the endpoints live under, e.g. `categories`.
    const PATH: &'static str;
    /// Row type returned by `list`.
    type Item: EntitySummary + DeserializeOwned;
    /// JSON body of `create` and `edit`.
    type Payload: Serialize;
}

/// The `categories/*` endpoints.
pub enum Categories {}

impl Resource for Categories {
    const PATH: &'static str = "categories";
    type Item = Category;
    type Payload = CategoryPayload;
}

/// The `products/*` endpoints.
pub enum Products {}

impl Resource for Products {
    const PATH: &'static str = "products";
    type Item = Product;
    type Payload = ProductPayload;
}
