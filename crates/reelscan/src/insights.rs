//! Aggregate views over the filtered catalog.
//!
//! - type distribution (count and share per type)
//! - top countries by title count
//! - rating by type pivot

use std::collections::{BTreeMap, BTreeSet};

use reelscan_seeker::{merge_sort, Dir, Number, Seekable, Value};
use serde::Serialize;

use crate::catalog::Title;

/// A labelled count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Count {
    pub label: String,
    pub count: usize,
    /// Percentage of the filtered titles.
    pub share: f64,
}

impl Seekable for Count {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "label" => Value::String(&self.label),
            "count" => Value::Number(Number::I64(self.count as i64)),
            "share" => Value::Number(Number::F64(self.share)),
            _ => Value::Missing,
        }
    }
}

/// One pivot row: counts per type for a rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotRow {
    pub rating: String,
    pub counts: Vec<usize>,
}

/// Ratings down, types across.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Pivot {
    pub types: Vec<String>,
    pub rows: Vec<PivotRow>,
}

/// All aggregate views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub total: usize,
    pub type_distribution: Vec<Count>,
    pub top_countries: Vec<Count>,
    pub pivot: Pivot,
}

/// A flat row for CSV output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightRow {
    pub section: &'static str,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub count: usize,
}

impl Insights {
    /// Computes every view over `titles`.
    pub fn compute(titles: &[&Title], top_countries: usize) -> Self {
        let total = titles.len();

        let type_distribution = ranked(
            titles
                .iter()
                .map(|t| t.kind.as_deref().unwrap_or(reelscan_seeker::NONE_SENTINEL)),
            total,
        );

        let mut top = ranked(titles.iter().map(|t| t.country.as_str()), total);
        top.truncate(top_countries);

        Insights {
            total,
            type_distribution,
            top_countries: top,
            pivot: pivot(titles),
        }
    }

    /// Flattens all three views into rows.
    pub fn to_rows(&self) -> Vec<InsightRow> {
        let mut rows = Vec::new();
        for count in &self.type_distribution {
            rows.push(InsightRow {
                section: "type_distribution",
                label: count.label.clone(),
                kind: String::new(),
                count: count.count,
            });
        }
        for count in &self.top_countries {
            rows.push(InsightRow {
                section: "top_countries",
                label: count.label.clone(),
                kind: String::new(),
                count: count.count,
            });
        }
        for row in &self.pivot.rows {
            for (kind, count) in self.pivot.types.iter().zip(&row.counts) {
                rows.push(InsightRow {
                    section: "rating_by_type",
                    label: row.rating.clone(),
                    kind: kind.clone(),
                    count: *count,
                });
            }
        }
        rows
    }
}

/// Counts labels and orders them by count, highest first.
///
/// Labels start in name order, and the merge sort is stable, so equal
/// counts stay alphabetical.
fn ranked<'a>(labels: impl Iterator<Item = &'a str>, total: usize) -> Vec<Count> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let counts: Vec<Count> = counts
        .into_iter()
        .map(|(label, count)| Count {
            label: label.to_string(),
            count,
            share: share(count, total),
        })
        .collect();

    // Counts are all integers, so this sort has no failure mode.
    match merge_sort(counts.clone(), "count", Dir::Desc) {
        Ok(sorted) => sorted,
        Err(_) => counts,
    }
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 * 1000.0 / total as f64).round() / 10.0
    }
}

fn pivot(titles: &[&Title]) -> Pivot {
    let types: BTreeSet<&str> = titles.iter().filter_map(|t| t.kind.as_deref()).collect();
    let types: Vec<&str> = types.into_iter().collect();

    let mut cells: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for title in titles {
        let Some(kind) = title.kind.as_deref() else {
            continue;
        };
        let column = types.iter().position(|t| *t == kind).unwrap_or_default();
        let row = cells
            .entry(title.rating.as_str())
            .or_insert_with(|| vec![0; types.len()]);
        row[column] += 1;
    }

    Pivot {
        types: types.iter().map(|t| t.to_string()).collect(),
        rows: cells
            .into_iter()
            .map(|(rating, counts)| PivotRow {
                rating: rating.to_string(),
                counts,
            })
            .collect(),
    }
}
