//! Mapping-rule tables, loaded from TOML.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::RuleError;

/// How one prop maps to classes: a fixed string for boolean props, or a
/// value-keyed table for enum props.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropRule {
    /// Boolean prop: present (or `{true}`) means these classes apply.
    Classes(String),
    /// Enum prop: the prop's string value selects the classes.
    Values(HashMap<String, String>),
}

/// How one source element type translates to the target system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingRule {
    /// JSX tag this rule applies to (e.g. `"Button"`).
    pub source_tag: String,
    /// Tag to emit (e.g. `"button"`).
    pub target_tag: String,
    /// Classes every rewritten element gets, first in the composed string.
    #[serde(default)]
    pub base_classes: String,
    /// Classes keyed by the `variant` prop's value.
    #[serde(default)]
    pub variants: HashMap<String, String>,
    /// Classes keyed by the `color` prop's value.
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Classes keyed by the `size` prop's value.
    #[serde(default)]
    pub sizes: HashMap<String, String>,
    /// Other props, consumed in attribute order.
    #[serde(default)]
    pub props: HashMap<String, PropRule>,
    /// Marks the rule as not mechanically resolvable; matching nodes are
    /// reported for manual review and left untouched.
    #[serde(default)]
    pub custom_implementation: bool,
}

/// A complete rule table for one widget-library migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTable {
    /// Module the source widgets are imported from (e.g. `"@mui/material"`).
    pub source_module: String,
    /// Import lines to insert after the last import when the file changed.
    #[serde(default)]
    pub add_imports: Vec<String>,
    /// Attribute name the target system uses for its class string.
    #[serde(default = "default_class_attr")]
    pub class_attr: String,
    /// The per-tag rules, tried first-match-wins.
    #[serde(default)]
    pub rules: Vec<MappingRule>,
}

fn default_class_attr() -> String {
    "className".to_owned()
}

impl RuleTable {
    /// Parses a rule table from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Parse`] on malformed TOML and
    /// [`RuleError::DuplicateTag`] when two rules share a `source_tag`.
    pub fn parse(text: &str) -> Result<Self, RuleError> {
        let table: Self = toml::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    /// Reads and parses a rule table file.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Io`] when the file cannot be read, plus any
    /// error [`Self::parse`] produces.
    pub fn from_file(path: &Path) -> Result<Self, RuleError> {
        let text = std::fs::read_to_string(path).map_err(|source| RuleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    fn validate(&self) -> Result<(), RuleError> {
        let mut seen = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            if seen.contains(&rule.source_tag.as_str()) {
                return Err(RuleError::DuplicateTag(rule.source_tag.clone()));
            }
            seen.push(rule.source_tag.as_str());
        }
        Ok(())
    }

    /// The rule for a tag, if the table has one.
    #[must_use]
    pub fn rule_for(&self, tag: &str) -> Option<&MappingRule> {
        self.rules.iter().find(|r| r.source_tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
source_module = "@mui/material"
add_imports = []

[[rules]]
source_tag = "Button"
target_tag = "button"
base_classes = "px-4 py-2 rounded"

[rules.variants]
contained = "shadow"
outlined = "border border-current"

[rules.colors]
primary = "bg-blue-500 text-white"

[rules.props]
disabled = "opacity-50 cursor-not-allowed"
fullWidth = "w-full"

[[rules]]
source_tag = "Autocomplete"
target_tag = "input"
custom_implementation = true
"#;

    #[test]
    fn parses_sample_table() {
        let table = RuleTable::parse(SAMPLE).expect("parse");
        assert_eq!(table.source_module, "@mui/material");
        assert_eq!(table.class_attr, "className");
        assert_eq!(table.rules.len(), 2);

        let button = table.rule_for("Button").expect("Button rule");
        assert_eq!(button.target_tag, "button");
        assert_eq!(button.variants.get("contained").map(String::as_str), Some("shadow"));
        assert!(matches!(
            button.props.get("disabled"),
            Some(PropRule::Classes(_))
        ));
        assert!(table.rule_for("Autocomplete").is_some_and(|r| r.custom_implementation));
    }

    #[test]
    fn enum_prop_parses_as_value_table() {
        let text = r#"
source_module = "@mui/material"

[[rules]]
source_tag = "Typography"
target_tag = "p"

[rules.props.component]
h1 = "h1"
h2 = "h2"
"#;
        let table = RuleTable::parse(text).expect("parse");
        let rule = table.rule_for("Typography").expect("rule");
        assert!(matches!(
            rule.props.get("component"),
            Some(PropRule::Values(_))
        ));
    }

    #[test]
    fn duplicate_source_tag_rejected() {
        let text = r#"
source_module = "@mui/material"

[[rules]]
source_tag = "Button"
target_tag = "button"

[[rules]]
source_tag = "Button"
target_tag = "a"
"#;
        let err = RuleTable::parse(text).expect_err("duplicate must fail");
        assert!(matches!(err, RuleError::DuplicateTag(tag) if tag == "Button"));
    }

    #[test]
    fn unknown_tag_has_no_rule() {
        let table = RuleTable::parse(SAMPLE).expect("parse");
        assert!(table.rule_for("Grid").is_none());
    }
}
