//! Pagination types.

use serde::{Deserialize, Serialize};

/// Default page size for paginated list endpoints.
pub const DEFAULT_LIMIT: u32 = 6;

/// Upper bound for `limit`.
pub const MAX_LIMIT: u32 = 100;

/// Pagination parameters shared across all paginated list endpoints.
///
/// - `limit`: 1–100, default 6
/// - `page`: ≥ 1, default 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_page() -> u32 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            page: default_page(),
        }
    }
}

impl PageRequest {
    /// Build from optional query values, falling back to defaults.
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIMIT),
            page: page.unwrap_or(1),
        }
        .clamped()
    }

    /// Clamp `limit` to the valid range 1–100 and `page` to ≥ 1.
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, MAX_LIMIT),
            page: self.page.max(1),
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// One page of results plus the total row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, count: u64, request: PageRequest) -> Self {
        let PageRequest { limit, page } = request.clamped();
        let next = (u64::from(page) * u64::from(limit) < count).then_some(page + 1);
        let previous = (page > 1).then(|| page - 1);
        Self {
            count,
            next,
            previous,
            results,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
