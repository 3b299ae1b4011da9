use serde::Serialize;
use std::path::Path;

use crate::engine::TestCase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub name: String,
    /// Relative to the discovery root when it lies beneath it.
    pub file: String,
    pub line: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub benchmark: bool,
}

impl Listing {
    pub fn from_test_case(case: &TestCase, root: &Path) -> Self {
        let file = case
            .source_file
            .strip_prefix(root)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(&case.source_file);

        Listing {
            name: case.qualified_name.clone(),
            file: file.to_string_lossy().replace('\\', "/"),
            line: case.source_line,
            benchmark: case.is_benchmark,
        }
    }

    pub fn location(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}
