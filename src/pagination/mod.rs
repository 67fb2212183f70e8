//! Pagination module
//!
//! Presents a server-paginated endpoint as a single lazily populated
//! sequence.
//!
//! # Overview
//!
//! A [`PaginatedSequence`] combines a [`PageSource`], which fetches numbered
//! pages of raw JSON records, with a [`RecordFactory`], which turns each raw
//! record into a typed value. Pages are fetched strictly in order and only
//! when an index, slice or iteration step needs them; everything fetched is
//! cached for the lifetime of the sequence.

mod sequence;
mod source;
mod types;

pub use sequence::{PaginatedSequence, MAX_EMPTY_PAGES};
pub use source::EndpointSource;
pub use types::{Page, PageSource, RecordFactory};
