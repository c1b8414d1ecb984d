use logic_common::ast::NodeId;
use logic_common::names::NamePath;

use super::{Namespace, NamespaceError};

fn path(segments: &[&str]) -> NamePath {
    segments.iter().copied().collect()
}

#[test]
fn declared_values_can_be_found() {
    let mut namespace = Namespace::new();
    namespace
        .declare_value(path(&["Color", "setHue"]), NodeId(3))
        .unwrap();

    assert_eq!(Some(NodeId(3)), namespace.get(&path(&["Color", "setHue"])));
    assert_eq!(None, namespace.get(&path(&["setHue"])));
    assert_eq!(
        Some(&path(&["Color", "setHue"])),
        namespace.value_name(NodeId(3))
    );
}

#[test]
fn values_and_types_are_separate() {
    let mut namespace = Namespace::new();
    namespace.declare_value(path(&["Point"]), NodeId(1)).unwrap();
    namespace.declare_type(path(&["Point"]), NodeId(1)).unwrap();

    assert_eq!(Some(NodeId(1)), namespace.get(&path(&["Point"])));
    assert_eq!(Some(NodeId(1)), namespace.get_type(&path(&["Point"])));
}

#[test]
fn redeclaring_a_value_fails() {
    let mut namespace = Namespace::new();
    namespace.declare_value(path(&["x"]), NodeId(1)).unwrap();

    let error = namespace.declare_value(path(&["x"]), NodeId(2)).unwrap_err();
    assert_eq!(
        NamespaceError::ValueAlreadyDeclared {
            name: path(&["x"]),
            existing: NodeId(1),
            new: NodeId(2),
        },
        error
    );

    // The first declaration is kept.
    assert_eq!(Some(NodeId(1)), namespace.get(&path(&["x"])));
}

#[test]
fn redeclaring_a_type_fails() {
    let mut namespace = Namespace::new();
    namespace.declare_type(path(&["A", "B"]), NodeId(7)).unwrap();

    let error = namespace.declare_type(path(&["A", "B"]), NodeId(9)).unwrap_err();
    assert_eq!(NodeId(7), error.existing());
    assert_eq!(NodeId(9), error.new_declaration());
    assert!(matches!(error, NamespaceError::TypeAlreadyDeclared { .. }));
}

#[test]
fn merging_disjoint_namespaces() {
    let mut first = Namespace::new();
    first.declare_type(path(&["Number"]), NodeId(1)).unwrap();
    let mut second = Namespace::new();
    second.declare_value(path(&["x"]), NodeId(2)).unwrap();

    let merged = Namespace::merge([first, second]).unwrap();
    assert_eq!(Some(NodeId(1)), merged.get_type(&path(&["Number"])));
    assert_eq!(Some(NodeId(2)), merged.get(&path(&["x"])));
}

#[test]
fn merging_duplicate_types_fails() {
    let mut first = Namespace::new();
    first.declare_type(path(&["Number"]), NodeId(1)).unwrap();
    let mut second = Namespace::new();
    second.declare_type(path(&["Number"]), NodeId(2)).unwrap();

    let error = Namespace::merge([first, second]).unwrap_err();
    assert_eq!(
        NamespaceError::TypeAlreadyDeclared {
            name: path(&["Number"]),
            existing: NodeId(1),
            new: NodeId(2),
        },
        error
    );
}
