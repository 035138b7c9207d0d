//! Parser for the precomputed `search_index.json` artifact
//!
//! # Error Handling Strategy
//!
//! The index is produced by the site generator and consumed as a whole, so
//! parsing is **all-or-nothing**:
//!
//! - **Malformed JSON or wrong shape**: the payload is rejected with
//!   [`LoadError::Parse`](crate::error::LoadError::Parse).
//! - **Invalid entries**: a blank or missing slug fails deserialization; a
//!   duplicate slug fails validation with
//!   [`LoadError::Invalid`](crate::error::LoadError::Invalid).
//! - **Tolerated quirks**: `null` titles, dates, and tags are treated as absent,
//!   and a leading UTF-8 byte order mark is ignored.

pub mod deserializers;
pub mod index;

pub use index::parse_index;
