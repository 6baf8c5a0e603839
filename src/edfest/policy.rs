//! Parameter rewriting applied before a request is signed.
//!
//! Each step is a plain function over [`QueryParams`] so it can be tested on
//! its own; [`rewrite`] runs them in the order the remote API expects.

use super::client::{Mode, Resource};
use super::params::{QueryParams, QueryValue};

/// Festival code of the live fringe dataset.
pub const FRINGE_FESTIVAL: &str = "fringe";

/// Festival code of the fringe demo dataset.
pub const DEMO_FRINGE_FESTIVAL: &str = "demofringe";

/// Year value meaning "all years".
pub const WILDCARD_YEAR: &str = "*";

/// Parameters holding `YYYY-MM-DD HH:MM:SS` timestamps.
pub const TIMESTAMP_PARAMS: [&str; 4] = ["date_from", "date_to", "modified_from", "modified_to"];

/// Date-range parameters suppressed by a wildcard year.
const DATE_RANGE_PARAMS: [&str; 2] = ["date_from", "date_to"];

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Largest page the API will return.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Apply the full rewrite policy for a request to `resource`.
pub fn rewrite(mut params: QueryParams, resource: Resource, key: &str, mode: Mode) -> QueryParams {
    inject_key(&mut params, key);
    if resource == Resource::Events {
        apply_fringe_gate(&mut params, mode);
    }
    suppress_wildcard_dates(&mut params);
    drop_unset(&mut params);
    normalize_timestamps(&mut params);
    params
}

/// Add the API key. An existing `key` entry is overwritten in place.
pub fn inject_key(params: &mut QueryParams, key: &str) {
    params.insert("key", key);
}

/// Redirect fringe searches to the demo dataset unless running in real mode.
///
/// Only [`Mode::Real`] lets `festival=fringe` through.
pub fn apply_fringe_gate(params: &mut QueryParams, mode: Mode) {
    if mode == Mode::Real {
        return;
    }
    if let Some(value) = params.get_mut("festival")
        && value.as_str() == Some(FRINGE_FESTIVAL)
    {
        *value = QueryValue::from(DEMO_FRINGE_FESTIVAL);
    }
}

/// A wildcard year spans all time, so explicit date bounds are removed.
pub fn suppress_wildcard_dates(params: &mut QueryParams) {
    let wildcard = params
        .get("year")
        .and_then(QueryValue::as_str)
        .is_some_and(|year| year == WILDCARD_YEAR);
    if wildcard {
        for key in DATE_RANGE_PARAMS {
            params.remove(key);
        }
    }
}

/// Remove empty strings and zero integers.
pub fn drop_unset(params: &mut QueryParams) {
    params.retain(|_, value| !value.is_unset());
}

/// Replace the ISO-8601 `T` separator with the space the API expects.
pub fn normalize_timestamps(params: &mut QueryParams) {
    for key in TIMESTAMP_PARAMS {
        if let Some(QueryValue::Text(value)) = params.get_mut(key)
            && value.contains('T')
        {
            *value = value.replace('T', " ");
        }
    }
}

/// One page of results, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub size: u32,
    pub page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

impl Pagination {
    /// Create a pagination window, clamping size to 1..=100 and page to >= 1.
    pub fn new(size: u32, page: u32) -> Self {
        Self {
            size: size.clamp(1, MAX_PAGE_SIZE),
            page: page.max(1),
        }
    }

    /// Zero-based offset of the first result on this page.
    pub fn offset(&self) -> u32 {
        (self.page - 1).saturating_mul(self.size)
    }

    /// Write the API's `size` and `from` parameters.
    ///
    /// `from=0` is dropped later as an unset value, so the first page sends
    /// only `size`.
    pub fn apply(&self, params: &mut QueryParams) {
        params.insert("size", self.size);
        params.insert("from", self.offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(params: &QueryParams) -> Vec<&str> {
        params.keys().collect()
    }

    #[test]
    fn test_inject_key_appends() {
        let mut params = QueryParams::new().with("festival", "book");
        inject_key(&mut params, "test_key");
        assert_eq!(keys(&params), vec!["festival", "key"]);
        assert_eq!(params.get("key"), Some(&QueryValue::from("test_key")));
    }

    #[test]
    fn test_fringe_rewritten_in_demo_mode() {
        let mut params = QueryParams::new().with("festival", "fringe").with("year", "2024");
        apply_fringe_gate(&mut params, Mode::Demo);
        assert_eq!(params.get("festival"), Some(&QueryValue::from("demofringe")));
    }

    #[test]
    fn test_fringe_kept_in_real_mode() {
        let mut params = QueryParams::new().with("festival", "fringe");
        apply_fringe_gate(&mut params, Mode::Real);
        assert_eq!(params.get("festival"), Some(&QueryValue::from("fringe")));
    }

    #[test]
    fn test_other_festivals_untouched() {
        for mode in [Mode::Demo, Mode::Real] {
            let mut params = QueryParams::new().with("festival", "book");
            apply_fringe_gate(&mut params, mode);
            assert_eq!(params.get("festival"), Some(&QueryValue::from("book")));
        }
    }

    #[test]
    fn test_fringe_gate_only_for_events() {
        let params = QueryParams::new().with("festival", "fringe");
        let venues = rewrite(params.clone(), Resource::Venues, "k", Mode::Demo);
        let events = rewrite(params, Resource::Events, "k", Mode::Demo);
        assert_eq!(venues.get("festival"), Some(&QueryValue::from("fringe")));
        assert_eq!(events.get("festival"), Some(&QueryValue::from("demofringe")));
    }

    #[test]
    fn test_wildcard_year_removes_date_range() {
        let mut params = QueryParams::new()
            .with("year", "*")
            .with("date_from", "2025-01-01 00:00:00")
            .with("date_to", "2025-12-31 23:59:59")
            .with("modified_from", "2025-01-01 00:00:00");
        suppress_wildcard_dates(&mut params);
        assert_eq!(keys(&params), vec!["year", "modified_from"]);
    }

    #[test]
    fn test_concrete_year_keeps_date_range() {
        let mut params = QueryParams::new()
            .with("year", "2025")
            .with("date_from", "2025-01-01 00:00:00");
        suppress_wildcard_dates(&mut params);
        assert!(params.contains_key("date_from"));
    }

    #[test]
    fn test_drop_unset() {
        let mut params = QueryParams::new()
            .with("festival", "jazz")
            .with("genre", "")
            .with("from", 0_i64)
            .with("size", 25_i64);
        drop_unset(&mut params);
        assert_eq!(keys(&params), vec!["festival", "size"]);
    }

    #[test]
    fn test_normalize_timestamps() {
        let mut params = QueryParams::new()
            .with("date_from", "2025-08-12T00:00:00")
            .with("date_to", "2025-08-12 23:00:00")
            .with("title", "The Tempest");
        normalize_timestamps(&mut params);
        assert_eq!(
            params.get("date_from"),
            Some(&QueryValue::from("2025-08-12 00:00:00"))
        );
        assert_eq!(
            params.get("date_to"),
            Some(&QueryValue::from("2025-08-12 23:00:00"))
        );
        assert_eq!(params.get("title"), Some(&QueryValue::from("The Tempest")));
    }

    #[test]
    fn test_rewrite_full_order() {
        let params = QueryParams::new()
            .with("festival", "fringe")
            .with("year", "2025")
            .with("date_from", "2025-08-12T00:00:00")
            .with("genre", "")
            .with("title", "Hamlet");
        let rewritten = rewrite(params, Resource::Events, "test_key", Mode::Demo);
        assert_eq!(
            keys(&rewritten),
            vec!["festival", "year", "date_from", "title", "key"]
        );
        assert_eq!(
            rewritten.get("date_from"),
            Some(&QueryValue::from("2025-08-12 00:00:00"))
        );
    }

    #[test]
    fn test_pagination_defaults() {
        let page = Pagination::default();
        assert_eq!(page.size, 25);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_pagination_clamps() {
        assert_eq!(Pagination::new(0, 0), Pagination { size: 1, page: 1 });
        assert_eq!(Pagination::new(500, 3).size, 100);
    }

    #[test]
    fn test_pagination_apply() {
        let mut params = QueryParams::new();
        Pagination::new(20, 3).apply(&mut params);
        assert_eq!(params.get("size"), Some(&QueryValue::Integer(20)));
        assert_eq!(params.get("from"), Some(&QueryValue::Integer(40)));

        let mut first = QueryParams::new();
        Pagination::default().apply(&mut first);
        drop_unset(&mut first);
        assert_eq!(keys(&first), vec!["size"]);
    }
}
