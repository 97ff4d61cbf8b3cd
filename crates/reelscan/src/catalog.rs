//! Catalog loading.
//!
//! Reads the catalog CSV (one title per row), fills configured defaults
//! into empty cells and parses the release year. Rows keep file order.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use reelscan_seeker::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::FillDefaults;

/// Type label of films in the catalog.
pub const MOVIE: &str = "Movie";
/// Type label of series in the catalog.
pub const TV_SHOW: &str = "TV Show";

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open catalog {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: release_year is empty")]
    MissingYear { row: usize },

    #[error("row {row}: release_year '{value}' is not a whole number")]
    InvalidYear { row: usize, value: String },
}

/// A CSV row as read, before defaults are applied.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTitle {
    show_id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<String>,
    director: Option<String>,
    cast: Option<String>,
    country: Option<String>,
    date_added: Option<String>,
    release_year: Option<String>,
    rating: Option<String>,
    duration: Option<String>,
    listed_in: Option<String>,
    description: Option<String>,
}

/// One catalog title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub show_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub director: String,
    pub cast: String,
    pub country: String,
    pub date_added: Option<String>,
    pub release_year: i64,
    pub rating: String,
    pub duration: Option<String>,
    pub listed_in: Option<String>,
    pub description: Option<String>,
}

impl Title {
    /// Column names, in CSV order.
    pub const COLUMNS: [&'static str; 12] = [
        "show_id",
        "type",
        "title",
        "director",
        "cast",
        "country",
        "date_added",
        "release_year",
        "rating",
        "duration",
        "listed_in",
        "description",
    ];

    fn from_raw(raw: RawTitle, row: usize, defaults: &FillDefaults) -> Result<Self, CatalogError> {
        let year = non_empty(raw.release_year).ok_or(CatalogError::MissingYear { row })?;
        let release_year = parse_year(&year).ok_or(CatalogError::InvalidYear { row, value: year })?;

        Ok(Title {
            show_id: non_empty(raw.show_id),
            kind: non_empty(raw.kind),
            title: non_empty(raw.title),
            director: non_empty(raw.director).unwrap_or_else(|| defaults.director.clone()),
            cast: non_empty(raw.cast).unwrap_or_else(|| defaults.cast.clone()),
            country: non_empty(raw.country).unwrap_or_else(|| defaults.country.clone()),
            date_added: non_empty(raw.date_added),
            release_year,
            rating: non_empty(raw.rating).unwrap_or_else(|| defaults.rating.clone()),
            duration: non_empty(raw.duration),
            listed_in: non_empty(raw.listed_in),
            description: non_empty(raw.description),
        })
    }

    /// Returns `true` if this title's type is `kind`.
    pub fn is(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }

    /// Converts the title to a field-mapping record keyed by column name.
    ///
    /// `release_year` becomes an integer; empty cells become nulls.
    pub fn to_record(&self) -> Record {
        Record::new()
            .with("show_id", self.show_id.clone())
            .with("type", self.kind.clone())
            .with("title", self.title.clone())
            .with("director", self.director.clone())
            .with("cast", self.cast.clone())
            .with("country", self.country.clone())
            .with("date_added", self.date_added.clone())
            .with("release_year", FieldValue::Integer(self.release_year))
            .with("rating", self.rating.clone())
            .with("duration", self.duration.clone())
            .with("listed_in", self.listed_in.clone())
            .with("description", self.description.clone())
    }
}

/// Blank cells become `None`; anything else is kept exactly as read.
fn non_empty(cell: Option<String>) -> Option<String> {
    cell.filter(|s| !s.trim().is_empty())
}

// Some exports write years as floats ("2019.0").
fn parse_year(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(year) = text.parse::<i64>() {
        return Some(year);
    }
    let year = text.parse::<f64>().ok()?;
    (year.fract() == 0.0 && year.is_finite()).then_some(year as i64)
}

/// An in-memory catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    titles: Vec<Title>,
}

impl Catalog {
    /// Wraps already-built titles.
    pub fn new(titles: Vec<Title>) -> Self {
        Catalog { titles }
    }

    /// Loads a catalog CSV file.
    pub fn open(path: &Path, defaults: &FillDefaults) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|source| CatalogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_reader(file, defaults)?;
        tracing::info!(path = %path.display(), titles = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Reads a catalog from CSV text with a header row.
    pub fn from_reader<R: Read>(reader: R, defaults: &FillDefaults) -> Result<Self, CatalogError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut titles = Vec::new();
        for (index, raw) in csv.deserialize::<RawTitle>().enumerate() {
            // Row 1 is the header.
            let row = index + 2;
            titles.push(Title::from_raw(raw?, row, defaults)?);
        }

        Ok(Catalog { titles })
    }

    /// All titles, in file order.
    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    /// Number of titles.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Returns `true` if the catalog has no titles.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Earliest and latest release year.
    pub fn year_bounds(&self) -> Option<(i64, i64)> {
        let mut years = self.titles.iter().map(|t| t.release_year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Distinct types, in order of first appearance.
    pub fn types(&self) -> Vec<String> {
        let mut kinds: Vec<String> = Vec::new();
        for kind in self.titles.iter().filter_map(|t| t.kind.as_deref()) {
            if !kinds.iter().any(|k| k == kind) {
                kinds.push(kind.to_string());
            }
        }
        kinds
    }
}
