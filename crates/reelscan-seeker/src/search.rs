//! Linear substring search over one field.
//!
//! The query is lower-cased once when the [`Search`] is built. Every item's
//! field is then stringified, lower-cased and tested for containment, in
//! order, with no index. Null and missing fields stringify to
//! [`NONE_SENTINEL`](crate::value::NONE_SENTINEL), so they only match
//! queries contained in `"none"`.
//!
//! An empty query is a substring of every string and therefore matches
//! every item.

use crate::traits::Seekable;

/// A prepared case-insensitive substring search on one field.
///
/// ```
/// use reelscan_seeker::{Record, Search};
///
/// let shows = vec![
///     Record::new().with("title", "Spider-Man: Far From Home"),
///     Record::new().with("title", "Mank"),
///     Record::new().with("title", "Roma"),
/// ];
///
/// let hits = Search::new("title", "MAN").filter(&shows);
/// assert_eq!(hits.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    field: String,
    needle: String,
}

impl Search {
    /// Prepares a search for `query` on `field`.
    pub fn new(field: impl Into<String>, query: impl AsRef<str>) -> Self {
        Search {
            field: field.into(),
            needle: query.as_ref().to_lowercase(),
        }
    }

    /// The field being searched.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The lower-cased query.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Returns `true` if the query is empty and every item will match.
    pub fn matches_everything(&self) -> bool {
        self.needle.is_empty()
    }

    /// Tests a single item.
    pub fn matches<T: Seekable + ?Sized>(&self, item: &T) -> bool {
        let value = item.seeker_field_value(&self.field);
        value
            .display_string()
            .to_lowercase()
            .contains(self.needle.as_str())
    }

    /// Returns references to the matching items, in their original order.
    pub fn filter<'a, T: Seekable>(&self, items: &'a [T]) -> Vec<&'a T> {
        let mut results = Vec::new();
        for item in items {
            if self.matches(item) {
                results.push(item);
            }
        }
        results
    }

    /// Returns owned copies of the matching items, in their original order.
    pub fn filter_cloned<T: Seekable + Clone>(&self, items: &[T]) -> Vec<T> {
        self.filter(items).into_iter().cloned().collect()
    }

    /// Counts matching items without collecting them.
    pub fn count<T: Seekable>(&self, items: &[T]) -> usize {
        let mut count = 0;
        for item in items {
            if self.matches(item) {
                count += 1;
            }
        }
        count
    }
}

/// Searches `items` for those whose `field` contains `query`, ignoring case.
///
/// Shorthand for `Search::new(field, query).filter(items)`.
pub fn search<'a, T: Seekable>(items: &'a [T], field: &str, query: &str) -> Vec<&'a T> {
    Search::new(field, query).filter(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    fn catalog() -> Vec<Record> {
        vec![
            Record::new()
                .with("title", "The Irishman")
                .with("cast", "Robert De Niro, Al Pacino")
                .with("release_year", 2019),
            Record::new()
                .with("title", "Roma")
                .with("cast", None::<String>)
                .with("release_year", 2018),
            Record::new()
                .with("title", "Marriage Story")
                .with("cast", "Adam Driver, Scarlett Johansson")
                .with("release_year", 2019),
        ]
    }

    fn titles(items: &[&Record]) -> Vec<String> {
        items
            .iter()
            .map(|r| r.get("title").map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn query_is_lowercased_once() {
        let search = Search::new("title", "IRISH");
        assert_eq!(search.needle(), "irish");
        assert_eq!(search.field(), "title");
    }

    #[test]
    fn matches_case_insensitively() {
        let items = catalog();
        let hits = search(&items, "title", "ROMA");
        assert_eq!(titles(&hits), vec!["Roma"]);
    }

    #[test]
    fn keeps_original_order() {
        let items = catalog();
        let hits = search(&items, "title", "r");
        assert_eq!(titles(&hits), vec!["The Irishman", "Roma", "Marriage Story"]);
    }

    #[test]
    fn numbers_are_searched_by_their_display_string() {
        let items = catalog();
        let hits = search(&items, "release_year", "2019");
        assert_eq!(titles(&hits), vec!["The Irishman", "Marriage Story"]);
    }

    #[test]
    fn null_fields_match_the_sentinel() {
        let items = catalog();
        assert_eq!(titles(&search(&items, "cast", "none")), vec!["Roma"]);
        assert!(search(&items, "cast", "pacino").len() == 1);
    }

    #[test]
    fn empty_query_passes_everything_through() {
        let items = catalog();
        let search = Search::new("title", "");
        assert!(search.matches_everything());
        assert_eq!(search.filter(&items).len(), items.len());
    }

    #[test]
    fn unknown_field_yields_no_matches() {
        let items = catalog();
        assert!(search(&items, "director", "scorsese").is_empty());
        // ...except for the empty query, which matches the sentinel too.
        assert_eq!(search(&items, "director", "").len(), 3);
    }

    #[test]
    fn count_and_clone_agree_with_filter() {
        let items = catalog();
        let search = Search::new("cast", "adam");
        assert_eq!(search.count(&items), 1);
        let cloned = search.filter_cloned(&items);
        assert_eq!(cloned, vec![items[2].clone()]);
    }

    #[test]
    fn unicode_lowercasing() {
        let items = vec![Record::new().with("title", "ÉLITE")];
        assert_eq!(search(&items, "title", "élite").len(), 1);
    }
}
