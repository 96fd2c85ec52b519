//! Limit/offset paging shared by list queries.

use serde::{Deserialize, Serialize};

/// Default page size applied when a caller does not supply a limit.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Limit/offset pair for list queries. Both values are non-negative by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

impl Pagination {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}
