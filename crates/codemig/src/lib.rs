//! # codemig
//!
//! Migration analysis and rewrite toolkit for JS/TS codebases.
//!
//! This is the facade crate: it wires the per-file building blocks
//! ([`codemig_core`], [`codemig_extract`], [`codemig_rewrite`]) into a
//! directory-level [`Runner`] and re-exports the types callers need.
//!
//! ## Programmatic usage
//!
//! ```rust,ignore
//! use codemig::{compare, RunOptions, Runner, RuleTable};
//!
//! let old = Runner::new("./legacy", RunOptions::default())?.extract();
//! let new = Runner::new("./rewrite", RunOptions::default())?.extract();
//! let drift = compare(&old.facts, &new.facts);
//!
//! let rules = RuleTable::from_file("mui-to-tailwind.toml".as_ref())?;
//! let report = Runner::new("./legacy", RunOptions::default())?.rewrite(&rules);
//! ```
//!
//! Outputs are pure data: nothing here writes to disk.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod runner;

pub use codemig_core::{
    canonicalize, compare, CanonicalPath, ComparisonResult, Diagnostic, DiagnosticKind, Fact,
    FactKind, FactSet, Location, MatchedPair,
};
pub use codemig_extract::{ExtractOptions, FactExtractor};
pub use codemig_rewrite::{MappingRule, PropRule, Resolution, RuleError, RuleTable};

pub use config::{ConfigError, RunConfig};
pub use runner::{
    ExtractReport, RewriteReport, RewrittenFile, RunError, RunOptions, Runner,
};
