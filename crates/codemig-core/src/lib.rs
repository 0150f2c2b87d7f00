//! # codemig-core
//!
//! Core data model for the migration analysis toolkit.
//!
//! This crate provides the foundational types shared by the extraction,
//! comparison, and rewrite phases:
//!
//! - [`Fact`] and [`FactSet`] for deduplicated structural findings
//! - [`canonicalize`] for comparison-stable path normalization
//! - [`compare`] for matched/unmatched partitioning of two fact sets
//! - [`SourceUnit`] and [`load_source`] for syntax-tree loading
//! - [`Diagnostic`] for the non-fatal error taxonomy
//!
//! ## Example
//!
//! ```ignore
//! use codemig_core::{canonicalize, compare, FactSet};
//!
//! let canon = canonicalize("/products/:id", &[]);
//! assert_eq!(canon.pattern, "/products/{*}");
//!
//! let result = compare(&old_facts, &new_facts);
//! assert!(!result.has_drift());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod canon;
mod compare;
mod loader;
mod store;
mod types;

pub use canon::{canonicalize, CanonicalPath, DYNAMIC_TOKEN, WILDCARD_TOKEN};
pub use compare::{compare, ComparisonResult, MatchedPair};
pub use loader::{load_source, Dialect, SourceUnit};
pub use store::FactSet;
pub use types::{Diagnostic, DiagnosticKind, DiagnosticReport, Fact, FactKind, Location};
