//! Top-down merge sort keyed on one field.
//!
//! The collection is split at `len / 2`, both halves are sorted recursively
//! and then merged head-to-head. On equal keys the merge always takes the
//! left head, in both directions, so items with equal keys keep their input
//! order.
//!
//! A collection of at most one item is returned as-is, without looking at
//! its keys. Longer collections have their keys checked before any merging:
//! every item must have the field, and all values must be of one kind (text,
//! number or null). Values are never coerced between kinds, and nulls have
//! no order at all.

use crate::error::{Result, SeekerError};
use crate::ordering::{compare_values, Dir};
use crate::traits::Seekable;

/// Sorts `items` by `field` in direction `dir`.
///
/// Returns a permutation of the input. Fails with
/// [`SeekerError::MissingField`] or [`SeekerError::MixedTypes`] when the
/// keys are unusable, and [`SeekerError::Incomparable`] if two keys have no
/// order (NaN, null).
///
/// ```
/// use reelscan_seeker::{merge_sort, Dir, Record};
///
/// let shows = vec![
///     Record::new().with("id", 1).with("release_year", 2015),
///     Record::new().with("id", 2).with("release_year", 2021),
///     Record::new().with("id", 3).with("release_year", 2015),
/// ];
///
/// let sorted = merge_sort(shows, "release_year", Dir::Desc).unwrap();
/// let ids: Vec<_> = sorted.iter().map(|r| r.get("id").unwrap().to_string()).collect();
/// assert_eq!(ids, ["2", "1", "3"]);
/// ```
pub fn merge_sort<T: Seekable>(items: Vec<T>, field: &str, dir: Dir) -> Result<Vec<T>> {
    if items.len() <= 1 {
        return Ok(items);
    }
    check_keys(&items, field)?;
    sort_run(items, field, dir)
}

/// Sorts references to `items` by `field`; `reverse` selects descending order.
pub fn sort<'a, T: Seekable>(items: &'a [T], field: &str, reverse: bool) -> Result<Vec<&'a T>> {
    merge_sort(items.iter().collect(), field, Dir::from_reverse(reverse))
}

fn check_keys<T: Seekable>(items: &[T], field: &str) -> Result<()> {
    let mut expected: Option<&'static str> = None;

    for (index, item) in items.iter().enumerate() {
        let value = item.seeker_field_value(field);
        if value.is_missing() {
            return Err(SeekerError::MissingField {
                field: field.to_string(),
                index,
            });
        }

        let kind = value.kind();
        match expected {
            None => expected = Some(kind),
            Some(first) if first != kind => {
                return Err(SeekerError::MixedTypes {
                    field: field.to_string(),
                    expected: first,
                    found: kind,
                    index,
                });
            }
            Some(_) => {}
        }
    }

    Ok(())
}

fn sort_run<T: Seekable>(mut items: Vec<T>, field: &str, dir: Dir) -> Result<Vec<T>> {
    if items.len() <= 1 {
        return Ok(items);
    }

    let right = items.split_off(items.len() / 2);
    let left = sort_run(items, field, dir)?;
    let right = sort_run(right, field, dir)?;

    merge(left, right, field, dir)
}

fn merge<T: Seekable>(left: Vec<T>, right: Vec<T>, field: &str, dir: Dir) -> Result<Vec<T>> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let ordering = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare_values(
                &l.seeker_field_value(field),
                &r.seeker_field_value(field),
            )
            .ok_or_else(|| SeekerError::Incomparable {
                field: field.to_string(),
            })?,
            _ => break,
        };

        let next = if dir.takes_left(ordering) {
            left.next()
        } else {
            right.next()
        };
        merged.extend(next);
    }

    // At most one side still has items, already in order.
    merged.extend(left);
    merged.extend(right);

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldValue, Record};

    fn keyed(pairs: &[(i64, i64)]) -> Vec<Record> {
        pairs
            .iter()
            .map(|&(id, k)| Record::new().with("id", id).with("k", k))
            .collect()
    }

    fn ids(items: &[Record]) -> Vec<i64> {
        items
            .iter()
            .filter_map(|r| r.get("id").and_then(FieldValue::as_integer))
            .collect()
    }

    #[test]
    fn empty_and_single() {
        let empty: Vec<Record> = Vec::new();
        assert!(merge_sort(empty, "k", Dir::Asc).unwrap().is_empty());

        let one = keyed(&[(1, 9)]);
        assert_eq!(merge_sort(one.clone(), "k", Dir::Desc).unwrap(), one);
    }

    #[test]
    fn ascending_is_stable() {
        let items = keyed(&[(1, 5), (2, 3), (3, 3)]);
        let sorted = merge_sort(items, "k", Dir::Asc).unwrap();
        assert_eq!(ids(&sorted), vec![2, 3, 1]);
    }

    #[test]
    fn descending_is_stable() {
        let items = keyed(&[(1, 3), (2, 5), (3, 3), (4, 5)]);
        let sorted = merge_sort(items, "k", Dir::Desc).unwrap();
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3]);
    }

    #[test]
    fn odd_lengths_split_left_smaller() {
        let items = keyed(&[(1, 4), (2, 1), (3, 3), (4, 5), (5, 2)]);
        let sorted = merge_sort(items, "k", Dir::Asc).unwrap();
        assert_eq!(ids(&sorted), vec![2, 5, 3, 1, 4]);
    }

    #[test]
    fn strings_sort_case_sensitively() {
        let items: Vec<Record> = ["banana", "Cherry", "apple"]
            .iter()
            .map(|t| Record::new().with("title", *t))
            .collect();
        let sorted = merge_sort(items, "title", Dir::Asc).unwrap();
        let titles: Vec<String> = sorted.iter().map(|r| r.get("title").unwrap().to_string()).collect();
        assert_eq!(titles, vec!["Cherry", "apple", "banana"]);
    }

    #[test]
    fn integers_and_reals_order_together() {
        let items = vec![
            Record::new().with("id", 1).with("k", 2.5),
            Record::new().with("id", 2).with("k", 2),
            Record::new().with("id", 3).with("k", 3),
        ];
        let sorted = merge_sort(items, "k", Dir::Asc).unwrap();
        assert_eq!(ids(&sorted), vec![2, 1, 3]);
    }

    #[test]
    fn null_keys_are_incomparable() {
        let items = vec![
            Record::new().with("id", 1).with("k", FieldValue::Null),
            Record::new().with("id", 2).with("k", FieldValue::Null),
        ];
        assert_eq!(
            merge_sort(items, "k", Dir::Desc),
            Err(SeekerError::Incomparable {
                field: "k".to_string()
            })
        );
    }

    #[test]
    fn single_null_key_is_already_sorted() {
        let items = vec![Record::new().with("id", 1).with("k", FieldValue::Null)];
        assert_eq!(merge_sort(items.clone(), "k", Dir::Asc).unwrap(), items);
    }

    #[test]
    fn missing_field_is_reported() {
        let items = vec![
            Record::new().with("id", 1).with("k", 1),
            Record::new().with("id", 2),
        ];
        let err = merge_sort(items, "k", Dir::Asc).unwrap_err();
        assert_eq!(
            err,
            SeekerError::MissingField {
                field: "k".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn single_item_without_the_field_is_already_sorted() {
        let items = vec![Record::new().with("id", 1)];
        assert_eq!(merge_sort(items.clone(), "k", Dir::Asc).unwrap(), items);

        let sorted = sort(&items, "release_year", false).unwrap();
        assert_eq!(sorted, vec![&items[0]]);
    }

    #[test]
    fn mixed_kinds_are_reported() {
        let items = vec![
            Record::new().with("release_year", 2019),
            Record::new().with("release_year", 2020),
            Record::new().with("release_year", "2021"),
        ];
        let err = merge_sort(items, "release_year", Dir::Asc).unwrap_err();
        assert_eq!(
            err,
            SeekerError::MixedTypes {
                field: "release_year".to_string(),
                expected: "number",
                found: "text",
                index: 2
            }
        );
    }

    #[test]
    fn nan_is_incomparable() {
        let items = vec![
            Record::new().with("k", 1.0),
            Record::new().with("k", f64::NAN),
        ];
        assert!(matches!(
            merge_sort(items, "k", Dir::Asc),
            Err(SeekerError::Incomparable { .. })
        ));
    }

    #[test]
    fn sort_by_reference_leaves_input_untouched() {
        let items = keyed(&[(1, 2), (2, 1)]);
        let sorted = sort(&items, "k", false).unwrap();
        assert_eq!(sorted[0].get("id"), Some(&FieldValue::Integer(2)));
        assert_eq!(ids(&items), vec![1, 2]);
    }
}
