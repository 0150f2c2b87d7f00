//! Core types for extracted facts and run diagnostics.

use miette::{Diagnostic as MietteDiagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The kind of structural element a [`Fact`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FactKind {
    /// An outgoing HTTP call (`axios.get(...)`, `fetch(...)`).
    ApiCall,
    /// A route definition (Express handler or `<Route>` element).
    RouteDef,
    /// A React state hook call site (`useState`, `useEffect`, ...).
    StateHook,
    /// A Redux action (`createAction`, `dispatch({type})`).
    ReduxAction,
    /// A Redux reducer or slice (`createSlice`, `createReducer`).
    ReduxReducer,
    /// A React context (`createContext`, `<X.Provider>`).
    ContextProvider,
    /// A UI component usage (capitalized JSX tag).
    ComponentUsage,
}

impl std::fmt::Display for FactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ApiCall => "api-call",
            Self::RouteDef => "route-def",
            Self::StateHook => "state-hook",
            Self::ReduxAction => "redux-action",
            Self::ReduxReducer => "redux-reducer",
            Self::ContextProvider => "context-provider",
            Self::ComponentUsage => "component-usage",
        };
        write!(f, "{name}")
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the run root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in the file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit line/column values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A typed, canonical record of one structural element found in source.
///
/// Two facts with equal `identity_key` are the same logical entity
/// regardless of which file they were found in. Facts are created during
/// extraction and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// What kind of element this is.
    pub kind: FactKind,
    /// Deterministic key derived from kind and canonicalized attributes
    /// (e.g. `"GET:/products/:id"`).
    pub identity_key: String,
    /// Captured attributes (method, path, binding name, ...).
    pub attributes: BTreeMap<String, String>,
    /// Where the fact was found.
    pub location: Location,
    /// Byte range of the originating node in its file.
    pub span: (usize, usize),
    /// Canonical path with every parameter replaced by a wildcard token,
    /// present only for path-like facts. Used for pattern-equivalence
    /// matching in the comparator.
    pub pattern: Option<String>,
    /// Original parameter names, in path order.
    pub param_names: Vec<String>,
}

impl Fact {
    /// Creates a new fact.
    #[must_use]
    pub fn new(kind: FactKind, identity_key: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            identity_key: identity_key.into(),
            attributes: BTreeMap::new(),
            location,
            span: (0, 0),
            pattern: None,
            param_names: Vec::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Sets the originating node's byte range.
    #[must_use]
    pub fn with_node_span(mut self, start: usize, end: usize) -> Self {
        self.span = (start, end);
        self
    }

    /// Sets the comparison pattern and parameter name side list.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>, params: Vec<String>) -> Self {
        self.pattern = Some(pattern.into());
        self.param_names = params;
        self
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} at {}", self.kind, self.identity_key, self.location)
    }
}

/// The kind of a non-fatal diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// File could not be parsed; it is excluded and the run continues.
    ParseFailure,
    /// File intentionally not processed (size ceiling, unreadable, ...).
    Skipped,
    /// An attribute could not be statically determined; the owning fact
    /// carries the `<dynamic>` sentinel.
    Unresolved,
    /// A rewrite rule matched but cannot be mechanically applied.
    ManualReview,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ParseFailure => "parse-failure",
            Self::Skipped => "skipped",
            Self::Unresolved => "unresolved",
            Self::ManualReview => "manual-review",
        };
        write!(f, "{name}")
    }
}

/// A non-fatal finding accumulated during a run.
///
/// All four kinds are local to a single file and never abort the run;
/// a completed run always returns partial results plus this list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Which failure class this is.
    pub kind: DiagnosticKind,
    /// File the diagnostic refers to.
    pub path: PathBuf,
    /// Location within the file, when one is known.
    pub location: Option<Location>,
    /// Human-readable detail.
    pub message: String,
}

impl Diagnostic {
    /// A file that could not be parsed.
    #[must_use]
    pub fn parse_failure(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::ParseFailure,
            path: path.into(),
            location: None,
            message: message.into(),
        }
    }

    /// A file that was intentionally not processed.
    #[must_use]
    pub fn skipped(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Skipped,
            path: path.into(),
            location: None,
            message: reason.into(),
        }
    }

    /// A fact attribute that could not be statically determined.
    #[must_use]
    pub fn unresolved(location: Location, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Unresolved,
            path: location.file.clone(),
            location: Some(location),
            message: message.into(),
        }
    }

    /// A node that needs a human to finish the migration.
    #[must_use]
    pub fn manual_review(location: Location, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::ManualReview,
            path: location.file.clone(),
            location: Some(location),
            message: message.into(),
        }
    }

    /// Formats the diagnostic for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        match &self.location {
            Some(loc) => format!("{}: {} ({loc})", self.kind, self.message),
            None => format!("{}: {} ({})", self.kind, self.message, self.path.display()),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}

/// Converts a [`Diagnostic`] into a miette diagnostic for rich display.
#[allow(dead_code)] // Public API for miette integration
#[derive(Debug, thiserror::Error, MietteDiagnostic)]
#[error("{message}")]
pub struct DiagnosticReport {
    message: String,
    #[label("{label}")]
    span: SourceSpan,
    label: String,
}

impl From<&Diagnostic> for DiagnosticReport {
    fn from(d: &Diagnostic) -> Self {
        let (offset, length) = d
            .location
            .as_ref()
            .map_or((0, 0), |l| (l.offset, l.length));
        Self {
            message: format!("[{}] {}", d.kind, d.message),
            span: SourceSpan::from((offset, length)),
            label: d.kind.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_fact() -> Fact {
        Fact::new(
            FactKind::ApiCall,
            "GET:/products/:id",
            Location::new(PathBuf::from("src/api.js"), 12, 5),
        )
        .with_attr("method", "GET")
        .with_attr("path", "/products/:id")
        .with_pattern("/products/{*}", vec!["id".into()])
    }

    #[test]
    fn fact_display_includes_kind_and_key() {
        let f = make_fact();
        let s = format!("{f}");
        assert!(s.contains("api-call"));
        assert!(s.contains("GET:/products/:id"));
        assert!(s.contains("src/api.js:12:5"));
    }

    #[test]
    fn fact_pattern_side_list_retained() {
        let f = make_fact();
        assert_eq!(f.pattern.as_deref(), Some("/products/{*}"));
        assert_eq!(f.param_names, vec!["id".to_string()]);
    }

    #[test]
    fn diagnostic_constructors_set_kind() {
        let d = Diagnostic::parse_failure("a.js", "unexpected token");
        assert_eq!(d.kind, DiagnosticKind::ParseFailure);
        assert!(d.location.is_none());

        let d = Diagnostic::skipped("big.js", "too-large");
        assert_eq!(d.kind, DiagnosticKind::Skipped);

        let loc = Location::new(PathBuf::from("b.js"), 3, 1);
        let d = Diagnostic::unresolved(loc.clone(), "dynamic path segment");
        assert_eq!(d.kind, DiagnosticKind::Unresolved);
        assert_eq!(d.path, PathBuf::from("b.js"));

        let d = Diagnostic::manual_review(loc, "custom implementation");
        assert_eq!(d.kind, DiagnosticKind::ManualReview);
    }

    #[test]
    fn diagnostic_format_mentions_location_when_present() {
        let loc = Location::new(PathBuf::from("b.js"), 3, 1);
        let d = Diagnostic::unresolved(loc, "dynamic path segment");
        assert!(d.format().contains("b.js:3:1"));
    }

    #[test]
    fn diagnostic_report_carries_span() {
        let loc = Location::new(PathBuf::from("b.js"), 3, 1).with_span(42, 7);
        let d = Diagnostic::manual_review(loc, "custom implementation");
        let report = DiagnosticReport::from(&d);
        assert!(format!("{report}").contains("custom implementation"));
    }
}
