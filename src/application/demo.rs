//! Sample structures used by the CLI demos.

use crate::application::ApplicationResult;
use crate::domain::{
    Assembly, BankAccount, Component, CustomerAccount, NodeId, Part, Scene, Shape,
};

/// Two leaves under one composite: `Circle(5)` then `Square(4)`.
pub fn basic_scene() -> ApplicationResult<(Scene, NodeId)> {
    let mut scene = Scene::new();
    let root = scene.composite();
    let circle = scene.circle(5.0)?;
    let square = scene.square(4.0)?;
    scene.add(root, circle)?;
    scene.add(root, square)?;
    Ok((scene, root))
}

/// An inner composite holding `Square(2)`, followed by `Circle(1)`.
pub fn nested_scene() -> ApplicationResult<(Scene, NodeId)> {
    let mut scene = Scene::new();
    let inner = scene.composite_named("inner");
    let square = scene.square(2.0)?;
    scene.add(inner, square)?;

    let outer = scene.composite_named("outer");
    let circle = scene.circle(1.0)?;
    scene.add(outer, inner)?;
    scene.add(outer, circle)?;
    Ok((scene, outer))
}

/// One root composite holding `shapes` in order.
pub fn scene_from_shapes(shapes: &[Shape]) -> ApplicationResult<(Scene, NodeId)> {
    let mut scene = Scene::with_capacity(shapes.len() + 1);
    let root = scene.composite();
    for &shape in shapes {
        let leaf = scene.insert_shape(shape);
        scene.add(root, leaf)?;
    }
    Ok((scene, root))
}

/// Car made of an engine (with electrical components) and a tire.
pub fn car() -> Assembly {
    let electrical = Assembly::new("Electrical Components")
        .with(Part::Transistor)
        .with(Part::Chip)
        .with(Part::Valve);
    let engine = Assembly::new("Engine").with(electrical);
    Assembly::new("Car").with(engine).with(Part::Tire)
}

/// Looks up a direct or nested assembly by name.
pub fn find_assembly<'a>(root: &'a Assembly, name: &str) -> Option<&'a Assembly> {
    if root.name == name {
        return Some(root);
    }
    root.components.iter().find_map(|c| match c {
        Component::Assembly(a) => find_assembly(a, name),
        Component::Part(_) => None,
    })
}

/// Customer with two accounts and their transaction history.
pub fn customer() -> CustomerAccount {
    let mut customer = CustomerAccount::new("John Doe");
    customer.add(BankAccount::new(
        "123456",
        5000,
        "Transaction 1: +$100\nTransaction 2: -$50",
    ));
    customer.add(BankAccount::new(
        "789012",
        7000,
        "Transaction 1: +$200\nTransaction 2: -$100",
    ));
    customer
}
