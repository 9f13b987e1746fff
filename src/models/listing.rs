use sqlx::postgres::PgRow;
use sqlx::FromRow;
use uuid::Uuid;

/// Common shape of the three listing tables. `ListingService` drives the
/// shared SQL (lookup, search, ownership checks, verification) off these
/// constants so the per-type services only carry what actually differs.
pub trait Listing: for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;
    /// Lowercase label used inside client-facing messages.
    const LABEL: &'static str;
    /// Exact not-found message for this type.
    const NOT_FOUND: &'static str;
    /// SQL text expressions scanned by free-text search.
    const SEARCH_EXPRS: &'static [&'static str];
    /// Default ordering for list and search results.
    const DEFAULT_ORDER: &'static str;

    fn created_by(&self) -> Uuid;
}
