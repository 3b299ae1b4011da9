//! Names bound to variables

use super::test_utils::{discover_go, names};
use pretty_assertions::assert_eq;

#[test]
fn test_local_variable() {
    let found = discover_go(
        r#"
package p
func TestVar(t *testing.T) {
	name := "bound"
	t.Run(name, func(t *testing.T) {})
}
"#,
    );
    assert_eq!(names(&found), vec!["TestVar", "TestVar/bound"]);
}

#[test]
fn test_package_constant() {
    let found = discover_go(
        r#"
package p

const caseName = "constant"

func TestConst(t *testing.T) {
	t.Run(caseName, func(t *testing.T) {})
}
"#,
    );
    assert_eq!(names(&found), vec!["TestConst", "TestConst/constant"]);
}

#[test]
fn test_row_field_bound_to_variable() {
    let found = discover_go(
        r#"
package p
func TestRowVar(t *testing.T) {
	first := "from var"
	tests := []struct{ name string }{{name: first}, {name: "literal"}}
	for _, tt := range tests {
		t.Run(tt.name, nil)
	}
}
"#,
    );
    assert_eq!(
        names(&found),
        vec!["TestRowVar", "TestRowVar/from var", "TestRowVar/literal"]
    );
}

#[test]
fn test_inner_scope_shadows_outer() {
    let found = discover_go(
        r#"
package p

var name = "outer"

func TestShadow(t *testing.T) {
	name := "inner"
	t.Run(name, nil)
}
"#,
    );
    assert_eq!(names(&found), vec!["TestShadow", "TestShadow/inner"]);
}

#[test]
fn test_parameter_is_not_resolved() {
    let found = discover_go(
        r#"
package p

var name = "global"

func TestParam(t *testing.T) {
	check := func(t *testing.T, name string) {
		t.Run(name, nil)
	}
	check(t, "x")
}
"#,
    );
    assert_eq!(names(&found), vec!["TestParam"]);
}
