mod client;
mod errors;
mod query;
mod resource;
pub mod types;
pub use self::client::{Client, DEFAULT_TIMEOUT};
pub use self::errors::Error;
pub use self::query::{
    IdQuery, ListQuery, Location, PageSize, Query, SortDirection, StatusFilter,
};
pub use self::resource::{Categories, Products, Resource};
