//! Seeker - hand-written search and sort for catalog records.
//!
//! Two routines over in-memory collections, both written from scratch:
//!
//! - **Linear search** ([`search`], [`Search`]): keeps the items whose
//!   field, stringified and lower-cased, contains the lower-cased query.
//! - **Merge sort** ([`merge_sort`], [`sort`], [`OrderBy`]): stable top-down
//!   merge sort on one field, ascending or descending.
//!
//! [`Query`] chains them (search, then sort, then offset/limit).
//!
//! # Quick Start
//!
//! ```rust
//! use reelscan_seeker::{search, sort, Record};
//!
//! let catalog = vec![
//!     Record::new().with("title", "Iron Man").with("release_year", 2008),
//!     Record::new().with("title", "Roma").with("release_year", 2018),
//!     Record::new().with("title", "Batman Begins").with("release_year", 2005),
//! ];
//!
//! let hits = search(&catalog, "title", "man");
//! let sorted = sort(&hits, "release_year", true).unwrap();
//!
//! assert_eq!(sorted.len(), 2);
//! assert_eq!(sorted[0].get("title").unwrap().to_string(), "Iron Man");
//! ```
//!
//! # Items
//!
//! Anything implementing [`Seekable`] can be searched and sorted.
//! [`Record`] is the ready-made field map; references and boxes of
//! seekables are seekable too, so sorting the output of a search does not
//! clone any records.
//!
//! # Value kinds
//!
//! | Kind | Search text | Sort order |
//! |------|-------------|------------|
//! | Text | as-is | lexicographic, case-sensitive |
//! | Number | decimal / `2.0` | numeric, integers and reals together |
//! | Null | `None` | unordered (error) |
//! | Missing | `None` | error |
//!
//! Sorting a field that mixes kinds is an error; nothing is coerced.

mod error;
mod ordering;
mod query;
mod record;
mod search;
mod sort;
mod traits;
mod value;

// Re-export public API
pub use error::{Result, SeekerError};
pub use ordering::{compare_values, Dir, OrderBy};
pub use query::Query;
pub use record::Record;
pub use search::{search, Search};
pub use sort::{merge_sort, sort};
pub use traits::Seekable;
pub use value::{FieldValue, Number, Value, NONE_SENTINEL};
