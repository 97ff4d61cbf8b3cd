//! Type and release-year filters applied before searching.

use std::ops::RangeInclusive;

use crate::catalog::{Catalog, Title};
use crate::config::YearWindow;

/// Which titles take part in a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    /// Selected types. Empty selects every type.
    pub types: Vec<String>,
    /// Inclusive release year range.
    pub years: RangeInclusive<i64>,
}

impl Filters {
    /// Builds filters for `catalog`.
    ///
    /// Year bounds resolve in order: explicit `from`/`to`, then the
    /// configured window, then the catalog's own bounds. `all_years`
    /// skips the configured window.
    pub fn resolve(
        catalog: &Catalog,
        types: Vec<String>,
        window: YearWindow,
        from: Option<i64>,
        to: Option<i64>,
        all_years: bool,
    ) -> Self {
        let (lo, hi) = catalog.year_bounds().unwrap_or((i64::MIN, i64::MAX));
        let window = if all_years {
            YearWindow { from: None, to: None }
        } else {
            window
        };

        let start = from.or(window.from).unwrap_or(lo);
        let end = to.or(window.to).unwrap_or(hi);

        Filters {
            types,
            years: start..=end,
        }
    }

    /// Filters that accept every title.
    pub fn everything() -> Self {
        Filters {
            types: Vec::new(),
            years: i64::MIN..=i64::MAX,
        }
    }

    /// Returns `true` if `title` passes both filters.
    pub fn accepts(&self, title: &Title) -> bool {
        let type_ok = self.types.is_empty()
            || title
                .kind
                .as_deref()
                .is_some_and(|kind| self.types.iter().any(|t| t == kind));
        type_ok && self.years.contains(&title.release_year)
    }

    /// Titles passing the filters, in catalog order.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Title> {
        let titles: Vec<&Title> = catalog.titles().iter().filter(|t| self.accepts(t)).collect();
        tracing::debug!(
            types = ?self.types,
            from = *self.years.start(),
            to = *self.years.end(),
            kept = titles.len(),
            total = catalog.len(),
            "filters applied"
        );
        titles
    }
}
