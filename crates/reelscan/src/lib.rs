//! # reelscan
//!
//! Terminal explorer for streaming catalog datasets.
//!
//! The catalog CSV is loaded once, narrowed by type and release year, then
//! handed to [`reelscan_seeker`] for the case-insensitive search and the
//! stable merge sort. Results render as cards or tables through MiniJinja
//! templates, or serialize to JSON, YAML or CSV.
//!
//! ```no_run
//! use reelscan::catalog::Catalog;
//! use reelscan::config::FillDefaults;
//! use reelscan::explore::{explore, ExploreRequest, Order, SearchField, SortKey};
//! use reelscan::filters::Filters;
//!
//! let catalog = Catalog::open("netflix.csv".as_ref(), &FillDefaults::default())?;
//! let view = explore(
//!     &catalog,
//!     &ExploreRequest {
//!         filters: Filters::everything(),
//!         query: Some("love".into()),
//!         search_field: SearchField::Title,
//!         sort: Some((SortKey::ReleaseYear, Order::Newest)),
//!         limit: 12,
//!     },
//! );
//! println!("{} matches", view.matched);
//! # Ok::<(), reelscan::catalog::CatalogError>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod explore;
pub mod filters;
pub mod insights;
pub mod logging;
pub mod output;
pub mod render;
mod templates;
