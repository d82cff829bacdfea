//! Foundation types for revdiff.
//!
//! This crate provides the content-tree, revision and edit-script types used
//! throughout the revdiff workspace. Every other revdiff crate depends on
//! `revdiff-types`.
//!
//! # Key Types
//!
//! - [`ContentNode`] / [`NodeKind`] -- One node of the editor's rich-text tree
//! - [`Document`] / [`WikiRevision`] -- Document root and the stored revision envelope
//! - [`DocumentInput`] -- Any accepted comparison input (nodes, document, revision)
//! - [`RevisionRef`] -- A revision number or the `current` sentinel
//! - [`DiffOp`] / [`EditScript`] -- Line-level equal/add/remove operations

pub mod document;
pub mod error;
pub mod node;
pub mod op;
pub mod revision;

pub use document::{Category, Document, DocumentInput, RevisionMeta, WikiRevision};
pub use error::{TypeError, TypeResult};
pub use node::{ContentNode, NodeKind, IMAGE_TAG};
pub use op::{DiffOp, EditScript, Line, OpKind};
pub use revision::RevisionRef;
