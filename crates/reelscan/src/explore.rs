//! The discovery pipeline.
//!
//! [`explore`] is one full pass from catalog snapshot to view model:
//! filter titles, turn them into records, search, optionally sort, and keep
//! the first page. It holds no state and is called once per request.

use clap::ValueEnum;
use reelscan_seeker::{Dir, Query, Record, SeekerError};
use serde::Serialize;

use crate::catalog::{Catalog, MOVIE, TV_SHOW};
use crate::filters::Filters;

/// Field the search text is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    #[default]
    Title,
    Cast,
    Description,
}

impl SearchField {
    /// Record field name.
    pub fn as_field(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Cast => "cast",
            SearchField::Description => "description",
        }
    }
}

/// Field results are sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    #[value(name = "release_year", alias = "year")]
    ReleaseYear,
    Title,
}

impl SortKey {
    /// Record field name.
    pub fn as_field(self) -> &'static str {
        match self {
            SortKey::ReleaseYear => "release_year",
            SortKey::Title => "title",
        }
    }
}

/// Sort order as offered to users.
///
/// `Newest` is descending: latest year first, or Z before A for titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    #[default]
    Newest,
    Oldest,
}

impl Order {
    /// Merge sort direction for this order.
    pub fn dir(self) -> Dir {
        Dir::from_reverse(matches!(self, Order::Newest))
    }
}

/// Everything one discovery pass needs.
#[derive(Debug, Clone)]
pub struct ExploreRequest {
    pub filters: Filters,
    /// Search text. Empty or absent skips the search step.
    pub query: Option<String>,
    pub search_field: SearchField,
    /// Sort step, if requested.
    pub sort: Option<(SortKey, Order)>,
    /// Records kept after searching (and sorting).
    pub limit: usize,
}

/// Headline counts over the filtered titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Kpis {
    pub total: usize,
    pub movies: usize,
    pub tv_shows: usize,
}

/// Outcome of the sort step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SortStatus {
    /// No sort requested; first page in catalog order.
    Unsorted,
    /// Sorted by `field` in `dir`.
    Sorted { field: String, dir: String },
    /// Sort failed; results fall back to catalog order.
    Failed { field: String, message: String },
}

/// View model produced by [`explore`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExploreView {
    pub kpis: Kpis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub search_field: SearchField,
    /// Records matching the search, before the page limit.
    pub matched: usize,
    pub sort: SortStatus,
    pub records: Vec<Record>,
}

impl ExploreView {
    /// User-facing notice for a failed sort.
    pub fn notice(&self) -> Option<String> {
        match &self.sort {
            SortStatus::Failed { field, message } => Some(format!(
                "Could not sort by {field}: {message}. Showing unsorted results."
            )),
            _ => None,
        }
    }
}

/// Runs one discovery pass over `catalog`.
pub fn explore(catalog: &Catalog, request: &ExploreRequest) -> ExploreView {
    let titles = request.filters.apply(catalog);

    let kpis = Kpis {
        total: titles.len(),
        movies: titles.iter().filter(|t| t.is(MOVIE)).count(),
        tv_shows: titles.iter().filter(|t| t.is(TV_SHOW)).count(),
    };

    let records: Vec<Record> = titles.iter().map(|t| t.to_record()).collect();

    let query = request.query.as_deref().filter(|q| !q.is_empty());
    let mut base = Query::new();
    if let Some(text) = query {
        base = base.search(request.search_field.as_field(), text);
    }
    let matched = base.count(&records);

    let (page, sort) = match request.sort {
        Some((key, order)) => {
            let field = key.as_field();
            let dir = order.dir();
            let sorted = base
                .clone()
                .order_by(field, dir)
                .limit(request.limit)
                .run_cloned(&records);
            match sorted {
                Ok(page) => {
                    tracing::debug!(field, %dir, matched, "sorted results");
                    (
                        page,
                        SortStatus::Sorted {
                            field: field.to_string(),
                            dir: dir.to_string(),
                        },
                    )
                }
                Err(err) => fallback(&base, &records, request.limit, err),
            }
        }
        None => (first_page(&base, &records, request.limit), SortStatus::Unsorted),
    };

    tracing::info!(
        total = kpis.total,
        matched,
        shown = page.len(),
        query = query.unwrap_or(""),
        "explore pass complete"
    );

    ExploreView {
        kpis,
        query: query.map(str::to_string),
        search_field: request.search_field,
        matched,
        sort,
        records: page,
    }
}

fn first_page(base: &Query, records: &[Record], limit: usize) -> Vec<Record> {
    // Without an ordering step the query cannot fail.
    base.clone()
        .limit(limit)
        .run_cloned(records)
        .unwrap_or_default()
}

fn fallback(
    base: &Query,
    records: &[Record],
    limit: usize,
    err: SeekerError,
) -> (Vec<Record>, SortStatus) {
    tracing::warn!(field = err.field(), error = %err, "sort failed, showing unsorted results");
    let status = SortStatus::Failed {
        field: err.field().to_string(),
        message: err.to_string(),
    };
    (first_page(base, records, limit), status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Title;
    use reelscan_seeker::FieldValue;

    fn title(id: &str, kind: &str, name: &str, year: i64) -> Title {
        Title {
            show_id: Some(id.to_string()),
            kind: Some(kind.to_string()),
            title: Some(name.to_string()),
            director: "Unknown".into(),
            cast: "Unknown".into(),
            country: "Unknown".into(),
            date_added: None,
            release_year: year,
            rating: "TV-MA".into(),
            duration: None,
            listed_in: None,
            description: Some(format!("About {name}")),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            title("s1", MOVIE, "Iron Man", 2015),
            title("s2", TV_SHOW, "The Witcher", 2019),
            title("s3", MOVIE, "Batman Begins", 2015),
            title("s4", MOVIE, "Manhunt", 2021),
            title("s5", TV_SHOW, "Dark", 2010),
        ])
    }

    fn request() -> ExploreRequest {
        ExploreRequest {
            filters: Filters::everything(),
            query: None,
            search_field: SearchField::Title,
            sort: None,
            limit: 12,
        }
    }

    fn ids(view: &ExploreView) -> Vec<String> {
        view.records
            .iter()
            .filter_map(|r| r.get("show_id").map(FieldValue::to_string))
            .collect()
    }

    #[test]
    fn kpis_count_filtered_titles() {
        let view = explore(&catalog(), &request());
        assert_eq!(
            view.kpis,
            Kpis {
                total: 5,
                movies: 3,
                tv_shows: 2
            }
        );
        assert_eq!(view.matched, 5);
        assert_eq!(view.sort, SortStatus::Unsorted);
    }

    #[test]
    fn unsorted_keeps_catalog_order_and_limit() {
        let view = explore(
            &catalog(),
            &ExploreRequest {
                limit: 3,
                ..request()
            },
        );
        assert_eq!(ids(&view), vec!["s1", "s2", "s3"]);
        assert_eq!(view.matched, 5);
    }

    #[test]
    fn newest_first_is_stable() {
        let view = explore(
            &catalog(),
            &ExploreRequest {
                sort: Some((SortKey::ReleaseYear, Order::Newest)),
                ..request()
            },
        );
        assert_eq!(ids(&view), vec!["s4", "s2", "s1", "s3", "s5"]);
        assert_eq!(
            view.sort,
            SortStatus::Sorted {
                field: "release_year".into(),
                dir: "desc".into()
            }
        );
    }

    #[test]
    fn search_then_sort_by_title() {
        let view = explore(
            &catalog(),
            &ExploreRequest {
                query: Some("MAN".into()),
                sort: Some((SortKey::Title, Order::Oldest)),
                ..request()
            },
        );
        assert_eq!(ids(&view), vec!["s3", "s1", "s4"]);
        assert_eq!(view.matched, 3);
        assert_eq!(view.query.as_deref(), Some("MAN"));
    }

    #[test]
    fn empty_query_is_no_search() {
        let view = explore(
            &catalog(),
            &ExploreRequest {
                query: Some(String::new()),
                ..request()
            },
        );
        assert_eq!(view.matched, 5);
        assert_eq!(view.query, None);
    }

    #[test]
    fn search_by_description() {
        let view = explore(
            &catalog(),
            &ExploreRequest {
                query: Some("witcher".into()),
                search_field: SearchField::Description,
                ..request()
            },
        );
        assert_eq!(ids(&view), vec!["s2"]);
    }

    #[test]
    fn sort_failure_falls_back() {
        let mut titles = catalog().titles().to_vec();
        titles[1].title = None;
        let catalog = Catalog::new(titles);

        let view = explore(
            &catalog,
            &ExploreRequest {
                sort: Some((SortKey::Title, Order::Oldest)),
                ..request()
            },
        );

        assert!(matches!(view.sort, SortStatus::Failed { ref field, .. } if field == "title"));
        assert_eq!(ids(&view), vec!["s1", "s2", "s3", "s4", "s5"]);
        assert!(view.notice().unwrap().contains("Showing unsorted results"));
    }

    #[test]
    fn order_maps_to_direction() {
        assert_eq!(Order::Newest.dir(), Dir::Desc);
        assert_eq!(Order::Oldest.dir(), Dir::Asc);
    }
}
