//! Query strings in the content service's filter/sort dialect.
//!
//! `filter[<field>][_eq]=<value>`, `filter[<field>][_neq]=<value>`,
//! `sort=<field>` or `sort=-<field>` for descending order.

use url::Url;

/// Ordered list of query parameters for a collection request.
///
/// A parameter whose value is `None` is kept in the list but never sent.
/// Empty strings are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    params: Vec<(String, Option<String>)>,
}

impl CollectionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.params.push((key.into(), value.map(Into::into)));
        self
    }

    pub fn sort(self, field: &str) -> Self {
        self.param("sort", Some(field))
    }

    pub fn sort_desc(self, field: &str) -> Self {
        self.param("sort", Some(format!("-{}", field)))
    }

    pub fn filter_eq(self, field: &str, value: &str) -> Self {
        self.param(format!("filter[{}][_eq]", field), Some(value))
    }

    pub fn filter_neq(self, field: &str, value: &str) -> Self {
        self.param(format!("filter[{}][_neq]", field), Some(value))
    }

    /// Parameters that will actually be sent, in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key.as_str(), v)))
    }

    pub fn apply_to(&self, url: &mut Url) {
        if self.pairs().next().is_none() {
            return;
        }
        let mut query = url.query_pairs_mut();
        for (key, value) in self.pairs() {
            query.append_pair(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_render_in_insertion_order() {
        let query = CollectionQuery::new()
            .sort("sort")
            .filter_eq("status", "available");

        let pairs: Vec<_> = query.pairs().collect();
        assert_eq!(
            pairs,
            vec![("sort", "sort"), ("filter[status][_eq]", "available")]
        );
    }

    #[test]
    fn test_absent_values_are_skipped_but_empty_strings_are_sent() {
        let query = CollectionQuery::new()
            .param("limit", None::<String>)
            .param("search", Some(""))
            .filter_neq("status", "unavailable");

        let pairs: Vec<_> = query.pairs().collect();
        assert_eq!(
            pairs,
            vec![("search", ""), ("filter[status][_neq]", "unavailable")]
        );
    }

    #[test]
    fn test_sort_desc_prefixes_minus() {
        let query = CollectionQuery::new().sort_desc("date_created");
        assert_eq!(query.pairs().collect::<Vec<_>>(), vec![("sort", "-date_created")]);
    }

    #[test]
    fn test_apply_to_url_encodes_brackets() {
        let mut url = Url::parse("https://cms.example.com/items/gallery").unwrap();
        CollectionQuery::new()
            .sort("sort")
            .filter_eq("status", "published")
            .apply_to(&mut url);

        assert_eq!(
            url.as_str(),
            "https://cms.example.com/items/gallery?sort=sort&filter%5Bstatus%5D%5B_eq%5D=published"
        );
    }

    #[test]
    fn test_apply_empty_query_leaves_url_untouched() {
        let mut url = Url::parse("https://cms.example.com/items/tires").unwrap();
        CollectionQuery::new()
            .param("limit", None::<&str>)
            .apply_to(&mut url);
        assert_eq!(url.as_str(), "https://cms.example.com/items/tires");
    }
}
