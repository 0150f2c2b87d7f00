//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# codemig configuration

[run]
# Directory names skipped during the walk
ignore_dirs = ["node_modules", ".git", "build", "dist", "coverage"]

# File names skipped during the walk
ignore_files = []

# Extension allow-list
extensions = ["js", "jsx", "ts", "tsx"]

# Files larger than this are skipped
max_file_bytes = 1048576

[api]
# Base-URL prefixes stripped from captured paths
base_url_prefixes = []

# Identifiers recognized as base-URL template interpolations
base_url_idents = ["API_BASE_URL", "BASE_URL", "API_URL", "API_ROOT"]

# Object names treated as HTTP client helpers
client_objects = ["axios", "api", "apiClient", "http", "httpClient", "client"]

# Object names treated as route registrars
route_objects = ["app", "router", "server"]
"#;

const DEFAULT_RULES: &str = r#"# codemig rule table

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
secondary = "bg-gray-500 text-white"

[rules.sizes]
small = "text-sm px-2 py-1"
large = "text-lg px-6 py-3"

[rules.props]
disabled = "opacity-50 cursor-not-allowed"
fullWidth = "w-full"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("codemig.toml");
    let rules_path = Path::new("rules.toml");

    for path in [config_path, rules_path] {
        if path.exists() && !force {
            bail!(
                "{} already exists. Use --force to overwrite.",
                path.display()
            );
        }
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    std::fs::write(rules_path, DEFAULT_RULES)?;

    println!("Created codemig.toml and rules.toml");
    println!("\nNext steps:");
    println!("  1. Edit rules.toml to describe your widget migration");
    println!("  2. Run: codemig extract");
    println!("  3. Run: codemig rewrite . --rules rules.toml");

    Ok(())
}
