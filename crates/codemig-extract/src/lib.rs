//! # codemig-extract
//!
//! Single-pass fact extraction from JS/TS/JSX syntax trees.
//!
//! Every node of a [`SourceUnit`](codemig_core::SourceUnit)'s tree is
//! visited exactly once; a registry of matchers is tried per node in a
//! fixed priority order so that specific shapes (a named API-client call)
//! win over generic fallbacks (a bare `/api/...` string literal).
//!
//! - [`FactExtractor`] — the walk + registry
//! - [`Matcher`] — the `(predicate, capture)` extension point
//! - [`ExtractOptions`] — base-URL and client-helper recognition
//! - [`collect_imports`] — import statements, shared with the rewriter

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extractor;
mod imports;
mod matcher;
mod matchers;
mod options;

/// JSX node helpers shared with the rewrite crate.
pub mod jsx;
pub(crate) mod util;

pub use extractor::FactExtractor;
pub use imports::{collect_imports, ImportRecord};
pub use matcher::{MatchContext, Matcher, MatcherBox};
pub use options::ExtractOptions;
