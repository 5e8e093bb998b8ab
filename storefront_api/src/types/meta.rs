use serde::{Deserialize, Serialize};

/// One page of a list endpoint: `{data, total, page, limit}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Number of rows matching the query across all pages.
    pub total: u64,
    /// 1-indexed page number.
    pub page: u32,
    /// Page size the endpoint actually used.
    pub limit: u32,
}

impl<T> Page<T> {
    /// `ceil(total / limit)`; zero when there are no rows.
    pub fn page_count(&self) -> u32 {
        if self.limit == 0 {
            return 0;
        }
        u32::try_from(self.total.div_ceil(u64::from(self.limit))).unwrap_or(u32::MAX)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Response<T> {
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total: u64, limit: u32) -> Page<()> {
        Page {
            data: Vec::new(),
            total,
            page: 1,
            limit,
        }
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page(47, 10).page_count(), 5);
        assert_eq!(page(50, 10).page_count(), 5);
        assert_eq!(page(1, 100).page_count(), 1);
        assert_eq!(page(0, 10).page_count(), 0);
        assert_eq!(page(10, 0).page_count(), 0);
    }

    #[test]
    fn page_count_saturates() {
        assert_eq!(page(u64::MAX, 1).page_count(), u32::MAX);
    }
}
