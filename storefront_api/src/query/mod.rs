mod common;
pub use self::common::{IdQuery, PageSize, Query, SortDirection, StatusFilter};

mod list;
pub use self::list::ListQuery;

mod location;
pub use self::location::Location;
