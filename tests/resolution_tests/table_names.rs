//! Table-driven subtest names

use super::test_utils::{discover_go, line_of, names};
use pretty_assertions::assert_eq;

#[test]
fn test_keyed_and_positional_rows() {
    let found = discover_go(
        r#"
package p
func TestRoot(t *testing.T) {
	tests := []struct{ name string }{
		{name: "test1"},
		{"test2"},
	}
	for _, tt := range tests {
		t.Run(tt.name, func(t *testing.T) {})
	}
}
"#,
    );
    assert_eq!(names(&found), vec!["TestRoot", "TestRoot/test1", "TestRoot/test2"]);
    assert_eq!(line_of(&found, "TestRoot/test1"), Some(5));
    assert_eq!(line_of(&found, "TestRoot/test2"), Some(6));
}

#[test]
fn test_name_field_need_not_be_first_when_keyed() {
    let found = discover_go(
        r#"
package p
func TestKeyed(t *testing.T) {
	cases := []struct {
		in   int
		desc string
	}{
		{in: 1, desc: "one"},
		{desc: "two", in: 2},
	}
	for _, c := range cases {
		t.Run(c.desc, func(t *testing.T) {})
	}
}
"#,
    );
    assert_eq!(names(&found), vec!["TestKeyed", "TestKeyed/one", "TestKeyed/two"]);
}

#[test]
fn test_each_row_gets_its_nested_subtests() {
    let found = discover_go(
        r#"
package p
func TestRows(t *testing.T) {
	tests := []struct{ name string }{{name: "a"}, {name: "b"}}
	for _, tt := range tests {
		t.Run(tt.name, func(t *testing.T) {
			t.Run("check", func(t *testing.T) {})
		})
	}
}
"#,
    );
    assert_eq!(
        names(&found),
        vec![
            "TestRows",
            "TestRows/a",
            "TestRows/a/check",
            "TestRows/b",
            "TestRows/b/check"
        ]
    );
}

#[test]
fn test_package_level_table() {
    let found = discover_go(
        r#"
package p

func TestGlobal(t *testing.T) {
	for _, tc := range cases {
		t.Run(tc.name, func(t *testing.T) {})
	}
}

var cases = []struct{ name string }{
	{"x"},
	{"y"},
}
"#,
    );
    assert_eq!(names(&found), vec!["TestGlobal", "TestGlobal/x", "TestGlobal/y"]);
}

#[test]
fn test_map_table() {
    let found = discover_go(
        r#"
package p
func TestMap(t *testing.T) {
	cases := map[string]struct{ name string }{
		"k1": {name: "first"},
		"k2": {name: "second"},
	}
	for _, tc := range cases {
		t.Run(tc.name, func(t *testing.T) {})
	}
}
"#,
    );
    assert_eq!(names(&found), vec!["TestMap", "TestMap/first", "TestMap/second"]);
}

#[test]
fn test_pointer_to_table() {
    let found = discover_go(
        r#"
package p
func TestPtr(t *testing.T) {
	tests := &[]struct{ name string }{
		{name: "p1"},
	}
	for _, tt := range *tests {
		t.Run(tt.name, func(t *testing.T) {})
	}
}
"#,
    );
    assert_eq!(names(&found), vec!["TestPtr", "TestPtr/p1"]);
}

#[test]
fn test_inline_table_in_range() {
    let found = discover_go(
        r#"
package p
func TestInline(t *testing.T) {
	for _, tt := range []struct{ name string }{{"i1"}, {"i2"}} {
		t.Run(tt.name, func(t *testing.T) {})
	}
}
"#,
    );
    assert_eq!(names(&found), vec!["TestInline", "TestInline/i1", "TestInline/i2"]);
}

#[test]
fn test_rows_with_pointer_elements() {
    let found = discover_go(
        r#"
package p
func TestPtrRows(t *testing.T) {
	tests := []*tc{
		&tc{name: "r1"},
		{name: "r2"},
	}
	for _, tt := range tests {
		t.Run(tt.name, func(t *testing.T) {})
	}
}
"#,
    );
    assert_eq!(names(&found), vec!["TestPtrRows", "TestPtrRows/r1", "TestPtrRows/r2"]);
}
