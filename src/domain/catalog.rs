//! Parts catalogue: priced parts aggregated into named assemblies.

use std::fmt;

/// Leaf part with a fixed unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Transistor,
    Chip,
    Valve,
    Tire,
}

impl Part {
    pub fn price(&self) -> u64 {
        match self {
            Part::Transistor => 10,
            Part::Chip => 20,
            Part::Valve => 15,
            Part::Tire => 50,
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Part::Transistor => "Transistor",
            Part::Chip => "Chip",
            Part::Valve => "Valve",
            Part::Tire => "Tire",
        };
        write!(f, "{}", name)
    }
}

/// Named group of components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub name: String,
    pub components: Vec<Component>,
}

impl Assembly {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
        }
    }

    pub fn add(&mut self, component: impl Into<Component>) {
        self.components.push(component.into());
    }

    /// Builder-style variant of [`Assembly::add`].
    pub fn with(mut self, component: impl Into<Component>) -> Self {
        self.add(component);
        self
    }

    pub fn price(&self) -> u64 {
        self.components.iter().map(Component::price).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Part(Part),
    Assembly(Assembly),
}

impl Component {
    pub fn name(&self) -> String {
        match self {
            Component::Part(part) => part.to_string(),
            Component::Assembly(assembly) => assembly.name.clone(),
        }
    }

    pub fn price(&self) -> u64 {
        match self {
            Component::Part(part) => part.price(),
            Component::Assembly(assembly) => assembly.price(),
        }
    }
}

impl From<Part> for Component {
    fn from(part: Part) -> Self {
        Component::Part(part)
    }
}

impl From<Assembly> for Component {
    fn from(assembly: Assembly) -> Self {
        Component::Assembly(assembly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_assembly_when_pricing_then_zero() {
        assert_eq!(Assembly::new("empty").price(), 0);
    }

    #[test]
    fn given_nested_assemblies_when_pricing_then_sums_recursively() {
        let board = Assembly::new("board").with(Part::Chip).with(Part::Chip);
        let rack = Assembly::new("rack").with(board).with(Part::Valve);
        assert_eq!(rack.price(), 55);
        assert_eq!(Component::from(rack).name(), "rack");
    }
}
