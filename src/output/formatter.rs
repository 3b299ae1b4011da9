use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::engine::TestCase;

use super::Listing;

#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub files_scanned: usize,
    pub total_tests: usize,
    pub tests: Vec<Listing>,
}

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format(tests: &[TestCase], root: &Path, format: OutputFormat) -> Result<String> {
        let output = Self::build_output(tests, root);

        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&output)?),
            OutputFormat::Text => Ok(Self::format_text(&output.tests)),
        }
    }

    pub fn build_output(tests: &[TestCase], root: &Path) -> JsonOutput {
        let files: BTreeSet<&Path> = tests.iter().map(|t| t.source_file.as_path()).collect();
        let tests: Vec<Listing> = tests
            .iter()
            .map(|t| Listing::from_test_case(t, root))
            .collect();

        JsonOutput {
            files_scanned: files.len(),
            total_tests: tests.len(),
            tests,
        }
    }

    /// One test per line, name column padded to the longest name.
    pub fn format_text(listings: &[Listing]) -> String {
        let width = listings.iter().map(|l| l.name.len()).max().unwrap_or(0);
        let mut text = String::new();
        for listing in listings {
            text.push_str(&format!("{:<width$}  {}\n", listing.name, listing.location()));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<TestCase> {
        vec![
            TestCase::new("TestA", "/m/a_test.go", 3, false),
            TestCase::new("TestA/case", "/m/a_test.go", 5, false),
            TestCase::new("TestB", "/m/pkg/b_test.go", 4, false),
        ]
    }

    #[test]
    fn test_text_output() {
        let text = OutputFormatter::format(&sample(), Path::new("/m"), OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "TestA       a_test.go:3\nTestA/case  a_test.go:5\nTestB       pkg/b_test.go:4\n"
        );
    }

    #[test]
    fn test_json_output_counts() {
        let json = OutputFormatter::format(&sample(), Path::new("/m"), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["files_scanned"], 2);
        assert_eq!(value["total_tests"], 3);
        assert_eq!(value["tests"][1]["name"], "TestA/case");
        assert_eq!(value["tests"][1]["line"], 5);
    }

    #[test]
    fn test_empty_text_output() {
        assert_eq!(OutputFormatter::format_text(&[]), "");
    }
}
