//! Pagination
//!
//! `limit`/`offset` handling shared by the article list, the feed, and
//! popular tags. Unparsable values never fail a request; they fall back to
//! the defaults.

/// Hard upper bound for any page size
pub const MAX_LIMIT: i64 = 100;

/// Default page size of `GET /api/articles` and `GET /api/tags`
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Default page size of `GET /api/articles/feed`
pub const DEFAULT_FEED_LIMIT: i64 = 10;

/// Validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Clamp `limit` to `1..=100` (non-positive -> `default_limit`) and
    /// `offset` to `>= 0`
    pub fn new(limit: Option<i64>, offset: Option<i64>, default_limit: i64) -> Self {
        let limit = match limit {
            Some(l) if l > 0 => l.min(MAX_LIMIT),
            _ => default_limit,
        };
        let offset = offset.filter(|o| *o >= 0).unwrap_or(0);

        Self { limit, offset }
    }

    /// Parse raw query-string values leniently
    pub fn parse(limit: Option<&str>, offset: Option<&str>, default_limit: i64) -> Self {
        Self::new(
            limit.and_then(|l| l.trim().parse().ok()),
            offset.and_then(|o| o.trim().parse().ok()),
            default_limit,
        )
    }
}
