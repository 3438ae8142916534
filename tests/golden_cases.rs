//! Golden test cases for the HTML output.
//!
//! Each test case is a directory under `tests/cases/` containing:
//! - `input.md` - Markdown source
//! - `expected.html` - Expected rendered output
//! - `config.toml` - (Optional) Config, e.g. the containers to register
//!
//! Run with `UPDATE_EXPECTED=1 cargo test` to regenerate expected outputs.

use markdown_containers::{Config, render};
use std::{fs, path::Path};

/// Load config from test case directory if it exists.
fn load_test_config(dir: &Path) -> Option<Config> {
    let config_path = dir.join("config.toml");
    if config_path.exists() {
        let content = fs::read_to_string(config_path).ok()?;
        Some(toml::from_str(&content).expect("invalid config.toml"))
    } else {
        None
    }
}

/// Run a single golden test case.
fn run_golden_case(case_name: &str) {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("cases")
        .join(case_name);

    let update_expected = std::env::var_os("UPDATE_EXPECTED").is_some();

    let input_path = dir.join("input.md");
    let expected_path = dir.join("expected.html");

    let config = load_test_config(&dir);

    // Read input file - preserve line endings exactly
    let input = fs::read_to_string(&input_path)
        .unwrap_or_else(|_| panic!("No input file found in {}", case_name));

    let output = render(&input, config.clone()).unwrap();

    // Rendering is deterministic across parser instances
    let output_twice = render(&input, config).unwrap();
    similar_asserts::assert_eq!(output, output_twice, "determinism: {}", case_name);

    if update_expected {
        fs::write(&expected_path, &output).unwrap();
        return;
    }

    let expected = fs::read_to_string(&expected_path)
        .unwrap_or_else(|_| panic!("Failed to read expected.html in {}", case_name));

    similar_asserts::assert_eq!(expected, output, "case: {}", case_name);
}

/// Macro to generate individual test functions for each golden case.
///
/// Usage: `golden_test_cases!(case1, case2, case3);`
macro_rules! golden_test_cases {
    ($($case:ident),+ $(,)?) => {
        $(
            #[test]
            fn $case() {
                run_golden_case(stringify!($case));
            }
        )+
    };
}

// To add a new test case:
// 1. Create a new directory under tests/cases/
// 2. Add the directory name to this list
golden_test_cases!(
    auto_close,
    basic_container,
    crlf_container,
    custom_marker,
    header_container,
    lists_and_quotes,
    nested_containers,
    xhtml_breaks,
);
