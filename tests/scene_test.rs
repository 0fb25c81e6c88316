//! Tests for Scene construction rules and traversal order

use rstest::rstest;

use shapetree::domain::{DomainError, DrawAction, Graphic, NodeId, Scene};
use shapetree::util::testing;

fn actions(scene: &Scene, root: NodeId) -> Vec<DrawAction> {
    scene.draw_actions(root, false).collect()
}

// ============================================================
// Traversal order
// ============================================================

#[test]
fn given_circle_and_square_when_drawing_then_emits_two_actions_in_order() {
    testing::init_test_setup();
    let mut scene = Scene::new();
    let c = scene.composite();
    let circle = scene.circle(5.0).unwrap();
    let square = scene.square(4.0).unwrap();
    scene.add(c, circle).unwrap();
    scene.add(c, square).unwrap();

    assert_eq!(
        actions(&scene, c),
        vec![
            DrawAction::Circle { radius: 5.0 },
            DrawAction::Square { side_length: 4.0 },
        ]
    );
}

#[test]
fn given_nested_composite_when_drawing_then_inner_leaves_come_first() {
    let mut scene = Scene::new();
    let inner = scene.composite();
    let square = scene.square(2.0).unwrap();
    scene.add(inner, square).unwrap();

    let outer = scene.composite();
    let circle = scene.circle(1.0).unwrap();
    scene.add(outer, inner).unwrap();
    scene.add(outer, circle).unwrap();

    let lines: Vec<String> = scene
        .draw_actions(outer, false)
        .map(|a| a.to_string())
        .collect();
    assert_eq!(
        lines,
        vec![
            "Drawing Square with side length 2",
            "Drawing Circle with radius 1",
        ]
    );
}

#[test]
fn given_empty_composite_when_drawing_then_emits_nothing() {
    let mut scene = Scene::new();
    let c = scene.composite();
    assert!(actions(&scene, c).is_empty());
    assert_eq!(scene.leaf_count(c), 0);
    assert_eq!(scene.depth(c), 1);
}

#[test]
fn given_leaf_root_when_drawing_then_emits_only_that_leaf() {
    let mut scene = Scene::new();
    let circle = scene.circle(3.0).unwrap();
    assert_eq!(actions(&scene, circle), vec![DrawAction::Circle { radius: 3.0 }]);
}

//        root
//       /  |  \
//      a   c1  b
//     / \       \
//   s1   d      c3
//        |
//        c2
#[test]
fn given_deep_tree_when_drawing_then_visits_leaves_preorder_exactly_once() {
    let mut scene = Scene::new();
    let root = scene.composite();
    let a = scene.composite();
    let b = scene.composite();
    let d = scene.composite();
    let s1 = scene.square(1.0).unwrap();
    let c1 = scene.circle(1.0).unwrap();
    let c2 = scene.circle(2.0).unwrap();
    let c3 = scene.circle(3.0).unwrap();

    scene.add(d, c2).unwrap();
    scene.add(a, s1).unwrap();
    scene.add(a, d).unwrap();
    scene.add(b, c3).unwrap();
    scene.add(root, a).unwrap();
    scene.add(root, c1).unwrap();
    scene.add(root, b).unwrap();

    assert_eq!(
        actions(&scene, root),
        vec![
            DrawAction::Square { side_length: 1.0 },
            DrawAction::Circle { radius: 2.0 },
            DrawAction::Circle { radius: 1.0 },
            DrawAction::Circle { radius: 3.0 },
        ]
    );
    assert_eq!(scene.leaf_count(root), 4);
    assert_eq!(scene.depth(root), 4);
    assert_eq!(scene.children(root), &[a, c1, b]);
}

#[test]
fn given_tree_when_drawing_twice_then_sequences_are_identical() {
    let mut scene = Scene::new();
    let root = scene.composite();
    for i in 0..10 {
        let leaf = if i % 2 == 0 {
            scene.circle(i as f64).unwrap()
        } else {
            scene.square(i as f64).unwrap()
        };
        scene.add(root, leaf).unwrap();
    }

    let first = actions(&scene, root);
    let second = actions(&scene, root);
    assert_eq!(first, second);
    assert_eq!(first.len(), 10);
}

#[test]
fn given_ten_thousand_deep_chain_when_drawing_then_does_not_overflow() {
    let mut scene = Scene::new();
    let root = scene.composite();
    let mut parent = root;
    for _ in 0..10_000 {
        let next = scene.composite();
        scene.add(parent, next).unwrap();
        parent = next;
    }
    let leaf = scene.circle(1.0).unwrap();
    scene.add(parent, leaf).unwrap();

    assert_eq!(actions(&scene, root).len(), 1);
    assert_eq!(scene.depth(root), 10_002);
}

// ============================================================
// Construction rules
// ============================================================

#[test]
fn given_composite_when_adding_itself_then_cycle_detected() {
    let mut scene = Scene::new();
    let c = scene.composite();
    assert_eq!(
        scene.add(c, c),
        Err(DomainError::CycleDetected { parent: c, child: c })
    );
    assert!(scene.children(c).is_empty());
}

#[test]
fn given_ancestor_when_adding_below_descendant_then_cycle_detected() {
    let mut scene = Scene::new();
    let top = scene.composite();
    let middle = scene.composite();
    let bottom = scene.composite();
    scene.add(middle, bottom).unwrap();
    scene.add(top, middle).unwrap();

    // top is unattached but is an ancestor of bottom
    let result = scene.add(bottom, top);
    assert_eq!(
        result,
        Err(DomainError::CycleDetected {
            parent: bottom,
            child: top
        })
    );
}

#[test]
fn given_attached_ancestor_when_adding_below_descendant_then_cycle_detected() {
    let mut scene = Scene::new();
    let root = scene.composite();
    let middle = scene.composite();
    let bottom = scene.composite();
    scene.add(middle, bottom).unwrap();
    scene.add(root, middle).unwrap();

    // middle already has a parent; the cycle takes precedence
    assert_eq!(
        scene.add(bottom, middle),
        Err(DomainError::CycleDetected {
            parent: bottom,
            child: middle
        })
    );
    assert_eq!(scene.get(middle).unwrap().parent, Some(root));
    assert!(scene.children(bottom).is_empty());
}

#[test]
fn given_attached_child_when_adding_elsewhere_then_already_attached() {
    let mut scene = Scene::new();
    let first = scene.composite();
    let second = scene.composite();
    let circle = scene.circle(1.0).unwrap();
    scene.add(first, circle).unwrap();

    assert_eq!(
        scene.add(second, circle),
        Err(DomainError::AlreadyAttached {
            child: circle,
            parent: first
        })
    );
    assert_eq!(
        scene.add(first, circle),
        Err(DomainError::AlreadyAttached {
            child: circle,
            parent: first
        })
    );
}

#[test]
fn given_leaf_parent_when_adding_then_not_a_composite() {
    let mut scene = Scene::new();
    let circle = scene.circle(1.0).unwrap();
    let square = scene.square(1.0).unwrap();
    assert_eq!(
        scene.add(circle, square),
        Err(DomainError::NotAComposite(circle))
    );
    assert!(scene.get(square).unwrap().parent.is_none());
}

#[test]
fn given_foreign_handle_when_adding_then_node_not_found() {
    let mut other = Scene::new();
    let _ = other.composite();
    let foreign = other.composite();

    let mut scene = Scene::new();
    let root = scene.composite();
    assert_eq!(scene.add(root, foreign), Err(DomainError::NodeNotFound(foreign)));
    assert_eq!(scene.add(foreign, root), Err(DomainError::NodeNotFound(foreign)));
}

#[test]
fn given_same_sized_scenes_when_adding_foreign_handle_then_node_not_found() {
    // Both scenes hold a node in the same arena slot and generation
    let mut other = Scene::new();
    let _ = other.composite();
    let foreign_circle = other.circle(9.0).unwrap();

    let mut scene = Scene::new();
    let root = scene.composite();
    let square = scene.square(1.0).unwrap();

    assert_eq!(
        scene.add(root, foreign_circle),
        Err(DomainError::NodeNotFound(foreign_circle))
    );
    assert!(scene.get(foreign_circle).is_none());
    assert!(scene.get(square).unwrap().parent.is_none());
    assert!(actions(&scene, root).is_empty());
    assert!(actions(&scene, foreign_circle).is_empty());
}

#[rstest]
#[case(-1.0)]
#[case(-0.0001)]
#[case(f64::NEG_INFINITY)]
fn given_negative_dimension_when_creating_leaf_then_invalid_argument(#[case] value: f64) {
    let mut scene = Scene::new();
    assert!(matches!(
        scene.circle(value),
        Err(DomainError::InvalidArgument { what: "radius", .. })
    ));
    assert!(matches!(
        scene.square(value),
        Err(DomainError::InvalidArgument {
            what: "side length",
            ..
        })
    ));
    assert!(scene.is_empty());
}

#[test]
fn given_successful_add_then_child_records_parent() {
    let mut scene = Scene::new();
    let root = scene.composite_named("root");
    let circle = scene.circle(1.0).unwrap();
    scene.add(root, circle).unwrap();

    let node = scene.get(circle).unwrap();
    assert_eq!(node.parent, Some(root));
    assert!(matches!(
        &scene.get(root).unwrap().graphic,
        Graphic::Composite { label: Some(l), children } if l == "root" && children == &vec![circle]
    ));
    assert_eq!(scene.len(), 2);
}
