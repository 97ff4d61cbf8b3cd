//! Sort direction and value comparison.
//!
//! Provides [`Dir`] for sort direction, [`OrderBy`] for field-keyed ordering
//! and [`compare_values`], the native ordering used by the merge sort.

use std::cmp::Ordering;

use crate::error::Result;
use crate::sort::merge_sort;
use crate::traits::Seekable;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Maps a `reverse` flag onto a direction: `true` is descending.
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Dir::Desc
        } else {
            Dir::Asc
        }
    }

    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Decides whether the left head of a merge goes first.
    ///
    /// Ties always favour the left side, which is what keeps the merge stable
    /// in both directions.
    pub fn takes_left(self, left_vs_right: Ordering) -> bool {
        match self {
            Dir::Asc => left_vs_right != Ordering::Greater,
            Dir::Desc => left_vs_right != Ordering::Less,
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A field to sort by, and in which direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Merge-sorts `items` by this ordering.
    pub fn sort<T: Seekable>(&self, items: Vec<T>) -> Result<Vec<T>> {
        merge_sort(items, &self.field, self.dir)
    }
}

/// Compares two values with their native ordering.
///
/// Strings compare lexicographically (case-sensitive), numbers numerically.
/// Anything else, including NaN, nulls and cross-kind pairs, returns `None`.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[test]
    fn from_reverse_flag() {
        assert_eq!(Dir::from_reverse(false), Dir::Asc);
        assert_eq!(Dir::from_reverse(true), Dir::Desc);
        assert_eq!(Dir::default(), Dir::Asc);
    }

    #[test]
    fn takes_left_on_ties() {
        assert!(Dir::Asc.takes_left(Ordering::Less));
        assert!(Dir::Asc.takes_left(Ordering::Equal));
        assert!(!Dir::Asc.takes_left(Ordering::Greater));

        assert!(Dir::Desc.takes_left(Ordering::Greater));
        assert!(Dir::Desc.takes_left(Ordering::Equal));
        assert!(!Dir::Desc.takes_left(Ordering::Less));
    }

    #[test]
    fn dir_display() {
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    #[test]
    fn order_by_constructors() {
        let asc = OrderBy::asc("title");
        assert_eq!(asc.field, "title");
        assert_eq!(asc.dir, Dir::Asc);

        let desc = OrderBy::desc("release_year");
        assert_eq!(desc.dir, Dir::Desc);
    }

    #[test]
    fn compare_strings_is_case_sensitive() {
        let upper = Value::String("Zodiac");
        let lower = Value::String("avatar");

        // Uppercase code points sort before lowercase ones.
        assert_eq!(compare_values(&upper, &lower), Some(Ordering::Less));
        assert_eq!(
            compare_values(&Value::String("a"), &Value::String("a")),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn compare_numbers() {
        let a = Value::Number(Number::I64(2010));
        let b = Value::Number(Number::F64(2015.5));
        assert_eq!(compare_values(&a, &b), Some(Ordering::Less));

        let nan = Value::Number(Number::F64(f64::NAN));
        assert_eq!(compare_values(&nan, &a), None);
    }

    #[test]
    fn compare_nulls_and_mismatches() {
        assert_eq!(compare_values(&Value::Null, &Value::Null), None);
        assert_eq!(compare_values(&Value::Null, &Value::String("x")), None);
        assert_eq!(
            compare_values(&Value::String("2015"), &Value::Number(Number::I64(2015))),
            None
        );
        assert_eq!(compare_values(&Value::Missing, &Value::Missing), None);
    }
}
