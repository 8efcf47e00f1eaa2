
use prost_types::{DescriptorProto, field_descriptor_proto::Type};
use proto2jsonschema::NamespaceTree;
use test_helpers::*;

#[test]
fn registered_type_is_found_absolutely_and_from_descendants() {
    let msg = message("Point", vec![scalar_field("x", 1, Type::Double)]);
    let other = message("Unrelated", vec![]);
    let mut tree = NamespaceTree::new();
    tree.register(Some("geo.shapes"), &msg);
    tree.register(Some("geo.shapes.deep.er"), &other);

    let absolute = tree.lookup_absolute(".geo.shapes.Point").unwrap();
    assert!(std::ptr::eq(absolute, &msg));

    for scope in ["geo.shapes", "geo.shapes.deep", "geo.shapes.deep.er"] {
        let pkg = tree.lookup_package(scope).unwrap();
        let found = tree.lookup_from(pkg, "Point").unwrap();
        assert!(std::ptr::eq(found, absolute), "lookup from {scope}");
    }
}

#[test]
fn unqualified_name_is_not_found_from_unrelated_branch() {
    let msg = message("Point", vec![]);
    let other = message("Other", vec![]);
    let mut tree = NamespaceTree::new();
    tree.register(Some("geo"), &msg);
    tree.register(Some("net"), &other);

    let net = tree.lookup_package("net").unwrap();
    assert!(tree.lookup_from(net, "Point").is_none());
    assert!(tree.lookup_from(net, "geo.Point").is_some());
}

#[test]
fn inner_scope_shadows_outer_scope() {
    let outer = message("Config", vec![]);
    let inner = message("Config", vec![]);
    let mut tree = NamespaceTree::new();
    tree.register(Some("app"), &outer);
    tree.register(Some("app.server"), &inner);

    let server = tree.lookup_package("app.server").unwrap();
    assert!(std::ptr::eq(tree.lookup_from(server, "Config").unwrap(), &inner));
    assert!(std::ptr::eq(tree.lookup_from(server, ".app.Config").unwrap(), &outer));
}

#[test]
fn relative_compound_name_reaches_nested_type() {
    let outer = DescriptorProto {
        nested_type: vec![message("Inner", vec![])],
        ..message("Outer", vec![])
    };
    let mut tree = NamespaceTree::new();
    tree.register(Some("a.b"), &outer);

    let b = tree.lookup_package("a.b").unwrap();
    let found = tree.lookup_from(b, "Outer.Inner").unwrap();
    assert!(std::ptr::eq(found, &outer.nested_type[0]));
    assert!(tree.relatively_lookup(tree.root(), "Outer.Inner").is_none());
}

#[test]
fn reregistering_a_name_replaces_the_descriptor() {
    let first = message("Dup", vec![]);
    let second = message("Dup", vec![scalar_field("x", 1, Type::Bool)]);
    let mut tree = NamespaceTree::new();
    tree.register(Some("p"), &first);
    tree.register(Some(".p"), &second);

    assert!(std::ptr::eq(tree.lookup_absolute("p.Dup").unwrap(), &second));
}
