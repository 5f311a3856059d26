//! Filter state carried in a URL query string.
//!
//! The active selection list lives in the `filters` parameter (as a token,
//! see [`crate::selection`]) next to the current `page`. Any other
//! parameters are preserved untouched.

use url::form_urlencoded;

use crate::error::Result;
use crate::selection::{parse_token, to_token, SelectionEntry};

pub const FILTERS_PARAM: &str = "filters";
pub const PAGE_PARAM: &str = "page";

/// The filter-relevant part of a location.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub filters: Vec<SelectionEntry>,
    /// 1-based page number.
    pub page: usize,
    /// Unrelated parameters, in their original order.
    pub extra: Vec<(String, String)>,
}

impl Default for Location {
    fn default() -> Self {
        Location {
            filters: Vec::new(),
            page: 1,
            extra: Vec::new(),
        }
    }
}

impl Location {
    /// Reads a query string, with or without its leading `?`.
    ///
    /// A missing or unreadable page, or page 0, is page 1. A bad filter
    /// token reads as no filters.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut token = None;
        let mut page = None;
        let mut extra = Vec::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                FILTERS_PARAM => token = Some(value.into_owned()),
                PAGE_PARAM => page = Some(value.into_owned()),
                _ => extra.push((key.into_owned(), value.into_owned())),
            }
        }

        let page = page
            .and_then(|p| p.trim().parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        Location {
            filters: parse_token(token.as_deref()),
            page,
            extra,
        }
    }

    /// Writes the query string, without a leading `?`.
    ///
    /// `filters` is omitted when there are none.
    pub fn to_query(&self) -> Result<String> {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.extra {
            serializer.append_pair(key, value);
        }
        if !self.filters.is_empty() {
            serializer.append_pair(FILTERS_PARAM, &to_token(&self.filters)?);
        }
        serializer.append_pair(PAGE_PARAM, &self.page.to_string());
        Ok(serializer.finish())
    }

    /// Replaces the filters and goes back to the first page.
    ///
    /// Applying and removing a filter both go through here.
    pub fn with_filters(mut self, filters: Vec<SelectionEntry>) -> Self {
        self.filters = filters;
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_filters_and_page() {
        let filters = vec![SelectionEntry::new(["votesCount"])
            .with_operator(">")
            .with_value("5")];
        let query = Location::default()
            .with_filters(filters.clone())
            .with_page(3)
            .to_query()
            .unwrap();

        let location = Location::from_query(&format!("?{query}"));
        assert_eq!(location.filters, filters);
        assert_eq!(location.page, 3);
    }

    #[test]
    fn bad_page_is_first_page() {
        assert_eq!(Location::from_query("").page, 1);
        assert_eq!(Location::from_query("page=0").page, 1);
        assert_eq!(Location::from_query("page=-2").page, 1);
        assert_eq!(Location::from_query("page=two").page, 1);
        assert_eq!(Location::from_query("page=7").page, 7);
    }

    #[test]
    fn bad_token_is_no_filters() {
        let location = Location::from_query("filters=%7Bnope&page=2");
        assert!(location.filters.is_empty());
        assert_eq!(location.page, 2);
    }

    #[test]
    fn other_params_survive() {
        let location = Location::from_query("jam=ld55&page=4&sort=asc");
        assert_eq!(
            location.extra,
            vec![
                ("jam".to_string(), "ld55".to_string()),
                ("sort".to_string(), "asc".to_string())
            ]
        );

        let query = location.with_filters(Vec::new()).to_query().unwrap();
        assert_eq!(query, "jam=ld55&sort=asc&page=1");
    }

    #[test]
    fn changing_filters_resets_page() {
        let location = Location::from_query("page=9")
            .with_filters(vec![SelectionEntry::new(["genres"]).with_operator("empty")]);
        assert_eq!(location.page, 1);
        assert!(location.to_query().unwrap().contains("filters="));
    }
}
