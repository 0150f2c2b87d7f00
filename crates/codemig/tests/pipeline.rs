//! End-to-end pipeline tests over temporary directory trees.

use std::fs;
use std::path::Path;

use codemig::{
    compare, DiagnosticKind, FactKind, RuleTable, RunConfig, RunOptions, Runner,
};

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, text).expect("write fixture");
}

fn rules() -> RuleTable {
    RuleTable::parse(
        r#"
source_module = "@mui/material"
add_imports = ["import './tailwind.css';"]

[[rules]]
source_tag = "Button"
target_tag = "button"
base_classes = "px-4 py-2 rounded"

[rules.variants]
contained = "shadow"

[rules.colors]
primary = "bg-blue-500 text-white"

[rules.props]
disabled = "opacity-50 cursor-not-allowed"

[[rules]]
source_tag = "Autocomplete"
target_tag = "input"
custom_implementation = true
"#,
    )
    .expect("rule table parses")
}

#[test]
fn param_rename_is_matched_with_params_differ() {
    let old = tempfile::tempdir().expect("tempdir");
    let new = tempfile::tempdir().expect("tempdir");
    write(old.path(), "api.js", "axios.get('/products/:id');\n");
    write(new.path(), "api.js", "axios.get('/products/:productId');\n");

    let a = Runner::new(old.path(), RunOptions::default())
        .expect("runner")
        .extract();
    let b = Runner::new(new.path(), RunOptions::default())
        .expect("runner")
        .extract();

    let result = compare(&a.facts, &b.facts);
    assert_eq!(result.common.len(), 1);
    assert!(result.common[0].params_differ);
    assert!(result.only_in_a.is_empty());
    assert!(result.only_in_b.is_empty());
}

#[test]
fn same_endpoint_in_two_files_yields_one_fact() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "a.js", "axios.get('/api/users');\n");
    write(dir.path(), "pages/b.js", "axios.get('/api/users');\n");

    let report = Runner::new(dir.path(), RunOptions::default())
        .expect("runner")
        .extract();
    assert_eq!(report.facts.of_kind(FactKind::ApiCall).count(), 1);
}

#[test]
fn button_rewrite_composes_expected_class_string() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "Buy.jsx",
        "import { Button } from '@mui/material';\nexport const Buy = () => <Button variant=\"contained\" color=\"primary\" disabled />;\n",
    );

    let report = Runner::new(dir.path(), RunOptions::default())
        .expect("runner")
        .rewrite(&rules());
    assert_eq!(report.files.len(), 1);
    let file = &report.files[0];
    assert!(file.changed);
    assert!(file.new_text.contains(
        "<button className=\"px-4 py-2 rounded shadow bg-blue-500 text-white opacity-50 cursor-not-allowed\" />"
    ));
    assert!(!file.new_text.contains("@mui/material"));
    assert!(file.new_text.contains("import './tailwind.css';"));
}

#[test]
fn one_broken_file_never_aborts_the_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "broken.js", "function oops( {\n  return 1;\n");
    for i in 0..99 {
        write(
            dir.path(),
            &format!("mod{i:02}.js"),
            &format!("axios.get('/api/resource{i}');\n"),
        );
    }

    let report = Runner::new(dir.path(), RunOptions::default())
        .expect("runner")
        .extract();
    assert_eq!(report.files_processed, 100);
    assert_eq!(report.facts.len(), 99);
    let failures: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::ParseFailure)
        .collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].path.ends_with("broken.js"));
}

#[test]
fn custom_implementation_reports_and_leaves_text_alone() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = "import { Autocomplete } from '@mui/material';\nexport const Pick = () => <Autocomplete options={opts} />;\n";
    write(dir.path(), "Pick.jsx", src);

    let report = Runner::new(dir.path(), RunOptions::default())
        .expect("runner")
        .rewrite(&rules());
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::ManualReview));
    assert_eq!(report.files.len(), 1);
    assert!(!report.files[0].changed);
    assert_eq!(report.files[0].new_text, src);
}

#[test]
fn rewriting_an_already_rewritten_tree_changes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "Buy.jsx",
        "import { Button } from '@mui/material';\nexport const Buy = () => <Button variant=\"contained\">Buy</Button>;\n",
    );

    let table = rules();
    let first = Runner::new(dir.path(), RunOptions::default())
        .expect("runner")
        .rewrite(&table);
    assert!(first.files[0].changed);
    write(dir.path(), "Buy.jsx", &first.files[0].new_text);

    let second = Runner::new(dir.path(), RunOptions::default())
        .expect("runner")
        .rewrite(&table);
    assert!(!second.files[0].changed);
    assert_eq!(second.files[0].new_text, first.files[0].new_text);
}

#[test]
fn ignore_dirs_from_config_are_honored() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "src/a.js", "axios.get('/api/a');\n");
    write(dir.path(), "generated/b.js", "axios.get('/api/b');\n");

    let config = RunConfig::parse(
        r#"
[run]
ignore_dirs = ["generated"]
"#,
    )
    .expect("config parses");
    let report = Runner::new(dir.path(), config.into_options())
        .expect("runner")
        .extract();
    assert!(report.facts.contains("GET:/api/a"));
    assert!(!report.facts.contains("GET:/api/b"));
}

#[test]
fn extraction_covers_routes_state_and_components() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "server/routes.js",
        "app.get('/api/products/:id', getProduct);\napp.post('/api/orders', createOrder);\n",
    );
    write(
        dir.path(),
        "src/App.jsx",
        concat!(
            "import { useState } from 'react';\n",
            "const CartContext = createContext(null);\n",
            "export function App() {\n",
            "  const [cart, setCart] = useState([]);\n",
            "  return <Route path=\"/products/:id\" element={<ProductPage />} />;\n",
            "}\n",
        ),
    );

    let report = Runner::new(dir.path(), RunOptions::default())
        .expect("runner")
        .extract();
    assert!(report.facts.contains("route:GET:/api/products/:id"));
    assert!(report.facts.contains("route:POST:/api/orders"));
    assert!(report.facts.contains("route:PAGE:/products/:id"));
    assert!(report.facts.contains("hook:useState:cart"));
    assert!(report.facts.contains("context:CartContext"));
    assert!(report.facts.contains("component:ProductPage"));
}
