//! Remote diff boundary for revdiff.
//!
//! A remote service may compute the comparison itself and answer with
//! grouped hunks. This crate defines that wire format, normalizes it back to
//! a flat [`EditScript`](revdiff_types::EditScript), and makes sure a slow
//! answer to a superseded request never replaces a newer one.
//!
//! # Key Types
//!
//! - [`DiffQuery`] -- Title, left/right revision and context size
//! - [`ServerDiffResponse`] / [`ServerHunk`] -- Hunk wire format
//! - [`adapt`] / [`flatten_hunks_with_base`] -- Hunks to edit script
//! - [`DiffSource`] / [`InMemoryRevisions`] -- Where hunks come from
//! - [`RequestSequencer`] / [`Comparator`] -- Latest-request-wins comparison

pub mod adapter;
pub mod comparator;
pub mod error;
pub mod query;
pub mod sequencer;
pub mod source;
pub mod wire;

pub use adapter::{adapt, adapt_response, flatten_hunks, flatten_hunks_with_base};
pub use comparator::Comparator;
pub use error::{AdaptError, AdaptResult, RemoteError, RemoteResult};
pub use query::{DiffQuery, DEFAULT_CONTEXT};
pub use sequencer::{RequestSequencer, RequestToken};
pub use source::{DiffSource, InMemoryRevisions};
pub use wire::{ServerDiffResponse, ServerHunk, ServerLine, ServerLineOp};
