//! Query builder and executor.
//!
//! A [`Query`] chains the two hand-written routines: an optional
//! [`Search`] step, an optional merge sort step, then an offset/limit
//! window. Steps always run in that order.

use crate::error::Result;
use crate::ordering::{Dir, OrderBy};
use crate::search::Search;
use crate::sort::merge_sort;
use crate::traits::Seekable;

/// A search-then-sort-then-window pipeline.
///
/// # Example
///
/// ```
/// use reelscan_seeker::{Query, Dir, Record};
///
/// let shows = vec![
///     Record::new().with("title", "Mank").with("release_year", 2020),
///     Record::new().with("title", "Roma").with("release_year", 2018),
///     Record::new().with("title", "Batman Begins").with("release_year", 2005),
/// ];
///
/// let query = Query::new()
///     .search("title", "man")
///     .order_by("title", Dir::Asc)
///     .limit(12)
///     .build();
///
/// let results = query.run(&shows).unwrap();
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0].get("title").unwrap().to_string(), "Batman Begins");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    search: Option<Search>,
    ordering: Option<OrderBy>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query returns every item in input order.
    pub fn new() -> Self {
        Query::default()
    }

    // ========================================================================
    // Steps
    // ========================================================================

    /// Keeps items whose `field` contains `query`, ignoring case.
    pub fn search(mut self, field: &str, query: &str) -> Self {
        self.search = Some(Search::new(field, query));
        self
    }

    /// Merge-sorts the (searched) items by `field`.
    pub fn order_by(mut self, field: &str, dir: Dir) -> Self {
        self.ordering = Some(OrderBy::new(field, dir));
        self
    }

    /// Adds an ascending ordering.
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Adds a descending ordering.
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    // ========================================================================
    // Window
    // ========================================================================

    /// Keeps at most `n` results.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Skips the first `n` results.
    pub fn offset(mut self, n: usize) -> Self {
        self.offset = Some(n);
        self
    }

    /// Finalizes the builder.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The search step, if any.
    pub fn search_step(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    /// The ordering step, if any.
    pub fn ordering(&self) -> Option<&OrderBy> {
        self.ordering.as_ref()
    }

    /// Returns the limit, if set.
    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the offset, if set.
    pub fn get_offset(&self) -> Option<usize> {
        self.offset
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Runs the query, returning references into `items`.
    ///
    /// Only the sort step can fail; see [`merge_sort`].
    pub fn run<'a, T: Seekable>(&self, items: &'a [T]) -> Result<Vec<&'a T>> {
        let mut results = match &self.search {
            Some(search) => search.filter(items),
            None => items.iter().collect(),
        };

        if let Some(ordering) = &self.ordering {
            results = merge_sort(results, &ordering.field, ordering.dir)?;
        }

        let offset = self.offset.unwrap_or(0);
        if offset > 0 {
            if offset >= results.len() {
                return Ok(Vec::new());
            }
            results.drain(..offset);
        }

        if let Some(limit) = self.limit {
            results.truncate(limit);
        }

        Ok(results)
    }

    /// Runs the query, returning owned copies.
    pub fn run_cloned<T: Seekable + Clone>(&self, items: &[T]) -> Result<Vec<T>> {
        Ok(self.run(items)?.into_iter().cloned().collect())
    }

    /// Counts items passing the search step, ignoring the window.
    pub fn count<T: Seekable>(&self, items: &[T]) -> usize {
        match &self.search {
            Some(search) => search.count(items),
            None => items.len(),
        }
    }
}
