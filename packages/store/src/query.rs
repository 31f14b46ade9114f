//! # Paged list state
//!
//! [`PageRequest`] is what a grid asks the backend for. Changing the search
//! text, a filter or the page size always moves back to page 1, so a narrower
//! result set is never asked for a page past its end.
//!
//! [`ListState`] owns the request, the last applied [`PageResult`] and the row
//! selection. Every fetch is tagged with a [`RequestToken`]; a response whose
//! token is no longer the latest is dropped, so a slow early response cannot
//! overwrite a newer one. A failed fetch keeps the previous rows.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::bulk::Selection;
use crate::draft::Record;
use crate::sequence::{RequestSequence, RequestToken};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
    search: String,
    filters: BTreeMap<String, String>,
}

impl PageRequest {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Go to `page` (1-based; 0 is treated as 1).
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        let changed = page != self.page;
        self.page = page;
        changed
    }

    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.page = 1;
        true
    }

    pub fn set_search(&mut self, search: &str) -> bool {
        if search == self.search {
            return false;
        }
        self.search = search.to_string();
        self.page = 1;
        true
    }

    /// Set or clear (empty value) a filter.
    pub fn set_filter(&mut self, key: &str, value: &str) -> bool {
        let changed = if value.is_empty() {
            self.filters.remove(key).is_some()
        } else {
            self.filters.insert(key.to_string(), value.to_string()).as_deref() != Some(value)
        };
        if changed {
            self.page = 1;
        }
        changed
    }

    /// Number of pages for `total` rows. Always at least 1.
    pub fn page_count(&self, total: u64) -> u32 {
        let pages = total.div_ceil(u64::from(self.page_size)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Query string pairs: `page`, `limit`, then `search` and filters when set.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.page_size.to_string()),
        ];
        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
        }
        pairs.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }
}

/// One page of rows plus the total row count across all pages.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "RawPage")]
pub struct PageResult {
    pub rows: Vec<Record>,
    pub total_count: u64,
}

/// List payload. Entities disagree on the name of the total.
#[derive(Deserialize)]
struct RawPage {
    #[serde(default)]
    data: Vec<Record>,
    #[serde(default, rename = "totalCount")]
    total_count: Option<u64>,
    #[serde(default, rename = "totalItems")]
    total_items: Option<u64>,
}

impl From<RawPage> for PageResult {
    fn from(raw: RawPage) -> Self {
        let total_count = raw
            .total_count
            .or(raw.total_items)
            .unwrap_or(raw.data.len() as u64);
        Self {
            rows: raw.data,
            total_count,
        }
    }
}

/// Outcome of [`ListState::finish`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListUpdate {
    Applied,
    /// A newer request was issued; the response was dropped.
    Stale,
    /// Latest request failed; previous rows kept.
    Failed,
    /// The page came back empty past the last page (e.g. after deleting the
    /// last row on it). The request now points at the last page and has to be
    /// fetched again.
    PastEnd,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListState {
    pub request: PageRequest,
    pub result: PageResult,
    pub loading: bool,
    pub selection: Selection,
    seq: RequestSequence,
}

impl ListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            request: PageRequest::new(page_size),
            result: PageResult::default(),
            loading: false,
            selection: Selection::new(),
            seq: RequestSequence::new(),
        }
    }

    /// Start a fetch for the current request.
    pub fn begin(&mut self) -> (RequestToken, PageRequest) {
        self.loading = true;
        (self.seq.next(), self.request.clone())
    }

    /// Apply a response if it belongs to the latest fetch.
    pub fn finish<E>(&mut self, token: RequestToken, outcome: Result<PageResult, E>) -> ListUpdate {
        if !self.seq.is_latest(token) {
            return ListUpdate::Stale;
        }
        self.loading = false;
        match outcome {
            Ok(result) => {
                self.result = result;
                self.selection.clear();
                let last = self.page_count();
                if self.result.rows.is_empty() && self.request.page() > last {
                    self.request.set_page(last);
                    return ListUpdate::PastEnd;
                }
                ListUpdate::Applied
            }
            Err(_) => ListUpdate::Failed,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.request.page_count(self.result.total_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(names: &[&str], total: u64) -> PageResult {
        PageResult {
            rows: names
                .iter()
                .map(|n| json!({ "name": n }).as_object().cloned().unwrap())
                .collect(),
            total_count: total,
        }
    }

    #[test]
    fn test_search_and_filters_reset_page() {
        let mut request = PageRequest::new(25);
        request.set_page(4);
        assert!(request.set_search("acme"));
        assert_eq!(request.page(), 1);

        request.set_page(3);
        assert!(request.set_filter("status", "active"));
        assert_eq!(request.page(), 1);

        request.set_page(2);
        assert!(!request.set_filter("status", "active"));
        assert_eq!(request.page(), 2);
        assert!(request.set_filter("status", ""));
        assert_eq!(request.page(), 1);
        assert_eq!(request.filter("status"), None);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut request = PageRequest::new(25);
        request.set_page(5);
        assert!(!request.set_page_size(25));
        assert_eq!(request.page(), 5);
        assert!(request.set_page_size(100));
        assert_eq!(request.page(), 1);
    }

    #[test]
    fn test_query_pairs() {
        let mut request = PageRequest::new(50);
        request.set_filter("role", "admin");
        request.set_search("jo");
        request.set_page(2);
        assert_eq!(
            request.query_pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("search".to_string(), "jo".to_string()),
                ("role".to_string(), "admin".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_count() {
        let request = PageRequest::new(25);
        assert_eq!(request.page_count(0), 1);
        assert_eq!(request.page_count(25), 1);
        assert_eq!(request.page_count(26), 2);
    }

    #[test]
    fn test_result_accepts_either_total_name() {
        let a: PageResult = serde_json::from_value(json!({ "data": [{}], "totalCount": 9 })).unwrap();
        let b: PageResult = serde_json::from_value(json!({ "data": [], "totalItems": 4 })).unwrap();
        let c: PageResult = serde_json::from_value(json!({ "data": [{}, {}] })).unwrap();
        assert_eq!(a.total_count, 9);
        assert_eq!(b.total_count, 4);
        assert_eq!(c.total_count, 2);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = ListState::new(25);
        let (first, _) = state.begin();
        state.request.set_search("b");
        let (second, request) = state.begin();
        assert_eq!(request.search(), "b");

        assert_eq!(state.finish::<()>(second, Ok(page(&["new"], 1))), ListUpdate::Applied);
        assert_eq!(state.finish::<()>(first, Ok(page(&["old"], 7))), ListUpdate::Stale);
        assert_eq!(state.result.rows[0]["name"], json!("new"));
        assert!(!state.loading);
    }

    #[test]
    fn test_failure_keeps_previous_rows() {
        let mut state = ListState::new(25);
        let (token, _) = state.begin();
        state.finish::<()>(token, Ok(page(&["a", "b"], 2)));

        let (token, _) = state.begin();
        assert_eq!(state.finish(token, Err("boom")), ListUpdate::Failed);
        assert_eq!(state.result.rows.len(), 2);
        assert!(!state.loading);
    }

    #[test]
    fn test_new_rows_clear_selection() {
        let mut state = ListState::new(25);
        state.selection.toggle("a");
        let (token, _) = state.begin();
        state.finish::<()>(token, Ok(page(&[], 0)));
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_empty_page_past_end_moves_back() {
        let mut state = ListState::new(10);
        state.request.set_page(3);
        let (token, _) = state.begin();
        assert_eq!(state.finish::<()>(token, Ok(page(&[], 20))), ListUpdate::PastEnd);
        assert_eq!(state.request.page(), 2);

        let (token, request) = state.begin();
        assert_eq!(request.page(), 2);
        assert_eq!(state.finish::<()>(token, Ok(page(&["k"], 20))), ListUpdate::Applied);
    }

    #[test]
    fn test_empty_first_page_stays() {
        let mut state = ListState::new(10);
        let (token, _) = state.begin();
        assert_eq!(state.finish::<()>(token, Ok(page(&[], 0))), ListUpdate::Applied);
        assert_eq!(state.request.page(), 1);
    }
}
