//! # codemig-rewrite
//!
//! Declarative JSX rewriting driven by mapping-rule tables.
//!
//! A [`RuleTable`] (TOML) describes how each source widget tag translates
//! into a target tag plus a composed class string. The [`resolve`] step is
//! pure: one element model plus the table in, one [`TransformPlan`] out.
//! [`rewrite_unit`] applies the plans to a parsed unit via byte-range edits
//! and adjusts the unit's import list; it returns new text and never
//! touches disk.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::PathBuf;

mod resolver;
mod rewriter;
mod rules;

pub use resolver::{resolve, AttrValue, ElementModel, JsxAttr, Resolution, TransformPlan};
pub use rewriter::{rewrite_unit, RewriteOutcome};
pub use rules::{MappingRule, PropRule, RuleTable};

/// Errors loading or validating a rule table.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The rule table file could not be read.
    #[error("failed to read rule table {path}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The rule table is not valid TOML (or does not match the schema).
    #[error("invalid rule table")]
    Parse(#[from] toml::de::Error),

    /// Two rules claim the same source tag.
    #[error("duplicate rule for tag `{0}`")]
    DuplicateTag(String),
}
