//! Literal subtest names

use super::test_utils::{discover_go, discover_go_with, line_of, names};
use gotest_picker::engine::{DiscoveryConfig, DiscoveryMode};
use pretty_assertions::assert_eq;

#[test]
fn test_entry_without_subtests() {
    let found = discover_go(
        r#"
package p
func TestAlone(t *testing.T) {
	x := 1
	_ = x
}
"#,
    );
    assert_eq!(names(&found), vec!["TestAlone"]);
}

#[test]
fn test_two_levels_of_nesting() {
    let found = discover_go(
        r#"
package p
func TestRoot(t *testing.T) {
	t.Run("L1", func(t *testing.T) {
		t.Run("L2", func(t *testing.T) {})
	})
}
"#,
    );
    assert_eq!(names(&found), vec!["TestRoot", "TestRoot/L1", "TestRoot/L1/L2"]);
    assert_eq!(line_of(&found, "TestRoot"), Some(3));
    assert_eq!(line_of(&found, "TestRoot/L1"), Some(4));
    assert_eq!(line_of(&found, "TestRoot/L1/L2"), Some(5));
}

#[test]
fn test_quotes_are_stripped() {
    let found = discover_go(
        r#"
package p
func TestQuotes(t *testing.T) {
	t.Run("Case A", func(t *testing.T) {})
	t.Run(`raw case`, func(t *testing.T) {})
}
"#,
    );
    assert_eq!(
        names(&found),
        vec!["TestQuotes", "TestQuotes/Case A", "TestQuotes/raw case"]
    );
}

#[test]
fn test_siblings_keep_source_order() {
    let found = discover_go(
        r#"
package p
func TestOrder(t *testing.T) {
	t.Run("b", nil)
	t.Run("a", nil)
	t.Run("c", nil)
}
"#,
    );
    assert_eq!(
        names(&found),
        vec!["TestOrder", "TestOrder/b", "TestOrder/a", "TestOrder/c"]
    );
}

#[test]
fn test_entries_in_declaration_order_and_main_excluded() {
    let found = discover_go(
        r#"
package p
func TestB(t *testing.T) {}
func TestMain(m *testing.M) {}
func helper() {}
func TestA(t *testing.T) {}
"#,
    );
    assert_eq!(names(&found), vec!["TestB", "TestA"]);
}

#[test]
fn test_loop_body_launches_without_extra_segment() {
    let found = discover_go(
        r#"
package p
func TestLoop(t *testing.T) {
	for i := 0; i < 3; i++ {
		t.Run("repeat", func(t *testing.T) {})
	}
}
"#,
    );
    assert_eq!(names(&found), vec!["TestLoop", "TestLoop/repeat"]);
}

#[test]
fn test_benchmarks_by_name_only() {
    let found = discover_go_with(
        r#"
package p
func TestA(t *testing.T) {}
func BenchmarkA(b *testing.B) {
	b.Run("sub", func(b *testing.B) {})
}
"#,
        DiscoveryMode::Benchmarks,
        DiscoveryConfig::default(),
    );
    assert_eq!(names(&found), vec!["BenchmarkA"]);
    assert!(found.tests[0].is_benchmark);
}
