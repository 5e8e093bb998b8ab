mod meta;
pub use self::meta::{Page, Response};

mod entity;
pub use self::entity::{EntityId, EntityStatus, EntitySummary, StatusResponse};

mod category;
pub use self::category::{Category, CategoryOption, CategoryPayload};

mod product;
pub use self::product::{Product, ProductPayload};

mod image;
pub use self::image::ImageUpload;
