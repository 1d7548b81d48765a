//! Traversal invariants over generated hierarchies.

use std::collections::HashSet;

use jforge_hierarchy::SuperTypes;
use jforge_hierarchy::query::{Query, SuperTypeQuery};
use jforge_model::{ElementId, TypeDecl, TypeIndex, TypeModel};
use proptest::prelude::*;

/// A randomly wired hierarchy: interfaces may extend any earlier interface,
/// classes may extend any earlier class and implement any interface.
#[derive(Debug, Clone)]
struct Shape {
    interface_parents: Vec<Vec<usize>>,
    classes: Vec<(Option<usize>, Vec<usize>)>,
}

fn shape() -> impl Strategy<Value = Shape> {
    (1usize..8, 1usize..6).prop_flat_map(|(interfaces, classes)| {
        let iface_parents =
            proptest::collection::vec(proptest::collection::vec(0..interfaces, 0..3), interfaces);
        let class_edges = proptest::collection::vec(
            (
                proptest::option::of(0..classes),
                proptest::collection::vec(0..interfaces, 0..4),
            ),
            classes,
        );
        (iface_parents, class_edges).prop_map(|(interface_parents, classes)| Shape {
            interface_parents,
            classes,
        })
    })
}

/// Build the index, dropping edges that would point forward so the graph
/// stays acyclic.
fn build(shape: &Shape) -> (TypeIndex, Vec<ElementId>) {
    let mut index = TypeIndex::new();
    let mut interfaces = Vec::new();
    for (i, parents) in shape.interface_parents.iter().enumerate() {
        let extends: Vec<_> = parents
            .iter()
            .filter(|&&p| p < i)
            .map(|&p| interfaces[p])
            .collect();
        let decl = TypeDecl::interface(format!("p.I{i}")).implements(extends);
        interfaces.push(index.add_type(decl));
    }
    let mut classes = Vec::new();
    for (i, (superclass, implements)) in shape.classes.iter().enumerate() {
        let mut decl = TypeDecl::class(format!("p.C{i}"))
            .implements(implements.iter().map(|&p| interfaces[p]));
        if let Some(s) = (*superclass).filter(|&s| s < i) {
            decl = decl.extends(classes[s]);
        }
        classes.push(index.add_type(decl));
    }
    (index, classes)
}

/// Every type reachable from `start` through superclass and superinterface
/// edges, computed eagerly.
fn reachable(index: &TypeIndex, start: ElementId) -> HashSet<ElementId> {
    let mut seen = HashSet::new();
    let mut stack = vec![start];
    while let Some(ty) = stack.pop() {
        if seen.insert(ty) {
            stack.extend(index.superclass(ty));
            stack.extend(index.superinterfaces(ty).iter().copied());
        }
    }
    seen
}

proptest! {
    #[test]
    fn yields_every_supertype_exactly_once(shape in shape()) {
        let (index, classes) = build(&shape);
        for &start in &classes {
            let yielded: Vec<_> = SuperTypes::new(&index, start, true, true, true).collect();
            let distinct: HashSet<_> = yielded.iter().copied().collect();
            prop_assert_eq!(distinct.len(), yielded.len());
            prop_assert_eq!(distinct, reachable(&index, start));
            prop_assert_eq!(yielded.first().copied(), Some(start));
        }
    }

    #[test]
    fn interfaces_only_skips_classes(shape in shape()) {
        let (index, classes) = build(&shape);
        for &start in &classes {
            let expected: HashSet<_> = reachable(&index, start)
                .into_iter()
                .filter(|&t| index.is_interface(t))
                .collect();
            let yielded: Vec<_> = SuperTypes::new(&index, start, false, true, false).collect();
            prop_assert!(yielded.iter().all(|&t| index.is_interface(t)));
            prop_assert_eq!(yielded.iter().copied().collect::<HashSet<_>>(), expected);
        }
    }

    #[test]
    fn start_only_traversal(shape in shape()) {
        let (index, classes) = build(&shape);
        for &start in &classes {
            let only: Vec<_> = SuperTypes::new(&index, start, false, false, true).collect();
            prop_assert_eq!(only, vec![start]);
            prop_assert_eq!(SuperTypes::new(&index, start, false, false, false).count(), 0);
        }
    }
}

#[test]
fn diamond_interface_appears_once() {
    let mut index = TypeIndex::new();
    let ia = index.add_type(TypeDecl::interface("p.IA"));
    let ib = index.add_type(TypeDecl::interface("p.IB"));
    let ic = index.add_type(TypeDecl::interface("p.IC").implements([ia]));
    let base = index.add_type(TypeDecl::class("p.Base").implements([ia, ib]));
    let mid = index.add_type(TypeDecl::class("p.Mid").extends(base).implements([ic]));

    let order: Vec<_> = SuperTypes::new(&index, mid, true, true, true).collect();
    assert_eq!(order, vec![mid, base, ic, ia, ib]);

    let named: Vec<_> = SuperTypeQuery::new(&index, mid)
        .unwrap()
        .with_recursive(true)
        .with_self(true)
        .with_name("IA")
        .to_vec();
    assert_eq!(named, vec![ia]);
}
