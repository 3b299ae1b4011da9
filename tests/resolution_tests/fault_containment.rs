//! Unresolvable and unexpected constructs stay local

use super::test_utils::{discover_go, names};
use gotest_picker::engine::{DiagnosticKind, SkipReason};
use pretty_assertions::assert_eq;

#[test]
fn test_dynamic_rows_are_skipped() {
    let found = discover_go(
        r#"
package p
func TestDyn(t *testing.T) {
	tests := []struct{ name string }{
		{name: "static"},
		{name: fmt.Sprintf("gen-%d", 1)},
		{name: "tail"},
	}
	for _, tt := range tests {
		t.Run(tt.name, nil)
	}
}
"#,
    );
    assert_eq!(names(&found), vec!["TestDyn", "TestDyn/static", "TestDyn/tail"]);
    assert_eq!(found.diagnostics.len(), 1);
    assert_eq!(found.diagnostics[0].kind, DiagnosticKind::Ambiguity);
    assert_eq!(found.diagnostics[0].line, 6);
}

#[test]
fn test_dynamic_launch_name_is_skipped() {
    let found = discover_go(
        r#"
package p
func TestCall(t *testing.T) {
	t.Run(makeName(), func(t *testing.T) {
		t.Run("never", nil)
	})
	t.Run("after", nil)
}
"#,
    );
    assert_eq!(names(&found), vec!["TestCall", "TestCall/after"]);
    assert_eq!(found.diagnostics[0].reason, SkipReason::DynamicName);
}

#[test]
fn test_broken_test_does_not_hide_clean_test() {
    let found = discover_go(
        r#"
package p
func TestBroken(t *testing.T) {
	tests := []struct{ name string }{
		{name: "kept"},
		unknownRow,
	}
	for _, tt := range tests {
		t.Run(tt.name, nil)
	}
}

func TestClean(t *testing.T) {
	t.Run("first", func(t *testing.T) {
		t.Run("deep", nil)
	})
	t.Run("second", nil)
}
"#,
    );
    assert_eq!(
        names(&found),
        vec![
            "TestBroken",
            "TestBroken/kept",
            "TestClean",
            "TestClean/first",
            "TestClean/first/deep",
            "TestClean/second"
        ]
    );
    assert_eq!(found.fault_count(), 1);
}

#[test]
fn test_range_key_is_not_a_name() {
    let found = discover_go(
        r#"
package p
func TestKeys(t *testing.T) {
	cases := map[string]int{"a": 1}
	for name := range cases {
		t.Run(name, nil)
	}
}
"#,
    );
    assert_eq!(names(&found), vec!["TestKeys"]);
    assert_eq!(found.diagnostics[0].reason, SkipReason::UnresolvedIdentifier);
}

#[test]
fn test_table_from_function_call() {
    let found = discover_go(
        r#"
package p
func TestLoaded(t *testing.T) {
	for _, tt := range loadCases() {
		t.Run(tt.name, nil)
	}
}
"#,
    );
    assert_eq!(names(&found), vec!["TestLoaded"]);
    assert_eq!(found.diagnostics[0].reason, SkipReason::NotATable);
}

#[test]
fn test_syntax_error_keeps_earlier_tests() {
    let found = discover_go(
        r#"
package p
func TestFine(t *testing.T) {
	t.Run("ok", nil)
}

func TestTruncated(t *testing.T) {
	t.Run("x", func(t *testing.T) {
"#,
    );
    let found_names = names(&found);
    assert!(found_names.contains(&"TestFine".to_string()));
    assert!(found_names.contains(&"TestFine/ok".to_string()));
}
