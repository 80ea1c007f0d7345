//! Pagination for list endpoints.
//!
//! Every list endpoint accepts `limit`, `offset` and `page` query parameters
//! and answers with a `{data, meta}` envelope where `meta` is a
//! [`PaginationMeta`].
//!
//! - `limit`: items per page, clamped to 1..=100, default 10
//! - `offset`: items to skip, ignored when `page` is present
//! - `page`: 1-indexed page number
//!
//! ```ignore
//! async fn list_courses(
//!     Query(params): Query<PaginationParams>,
//! ) -> Result<Json<PaginatedCoursesResponse>, AppError> {
//!     let rows = fetch(params.limit(), params.offset()).await?;
//!     let total = count().await?;
//!     Ok(Json(PaginatedCoursesResponse {
//!         data: rows,
//!         meta: PaginationMeta::from_params(&params, total),
//!     }))
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Query strings send numbers as text and empty values as `""`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Metadata attached to every paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of matching rows
    pub total: i64,
    /// Limit that was applied
    pub limit: i64,
    /// Rows skipped (omitted for page-based requests)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Current page (only for page-based requests)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Whether rows exist after this window
    pub has_more: bool,
}

impl PaginationMeta {
    /// Builds the metadata for a window described by `params` over `total` rows.
    #[must_use]
    pub fn from_params(params: &PaginationParams, total: i64) -> Self {
        let limit = params.limit();
        let offset = params.offset();
        let page = params.page();

        Self {
            total,
            limit,
            offset: if page.is_some() { None } else { Some(offset) },
            page,
            has_more: offset + limit < total,
        }
    }
}

/// Query parameters for pagination.
///
/// When `page` is provided it takes precedence over `offset`.
#[derive(Debug, Clone, Default, Hash, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0, ignored if `page` is set)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    /// Page number (1-indexed)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl PaginationParams {
    /// Returns the effective limit, clamped to [1, 100].
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Returns the effective offset, derived from `page` when it is set.
    #[must_use]
    pub fn offset(&self) -> i64 {
        if let Some(page) = self.page {
            (page.max(1) - 1) * self.limit()
        } else {
            self.offset.unwrap_or(0).max(0)
        }
    }

    /// Returns the page number if provided, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}
