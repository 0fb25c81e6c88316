//! Leaf shapes and the draw actions they emit.

use std::fmt;

use crate::domain::error::{DomainError, DomainResult};

fn validate_dimension(what: &'static str, value: f64) -> DomainResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::InvalidArgument { what, value });
    }
    Ok(value)
}

/// Circle leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    /// Zero is accepted; negative and non-finite radii are rejected.
    pub fn new(radius: f64) -> DomainResult<Self> {
        Ok(Self {
            radius: validate_dimension("radius", radius)?,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn draw_action(&self) -> DrawAction {
        DrawAction::Circle {
            radius: self.radius,
        }
    }
}

/// Square leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    side_length: f64,
}

impl Square {
    /// Zero is accepted; negative and non-finite side lengths are rejected.
    pub fn new(side_length: f64) -> DomainResult<Self> {
        Ok(Self {
            side_length: validate_dimension("side length", side_length)?,
        })
    }

    pub fn side_length(&self) -> f64 {
        self.side_length
    }

    pub fn draw_action(&self) -> DrawAction {
        DrawAction::Square {
            side_length: self.side_length,
        }
    }
}

/// Closed set of leaf kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Square(Square),
}

impl Shape {
    pub fn draw_action(&self) -> DrawAction {
        match self {
            Shape::Circle(c) => c.draw_action(),
            Shape::Square(s) => s.draw_action(),
        }
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle(c)
    }
}

impl From<Square> for Shape {
    fn from(s: Square) -> Self {
        Shape::Square(s)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Circle(c) => write!(f, "Circle(radius={})", c.radius),
            Shape::Square(s) => write!(f, "Square(side_length={})", s.side_length),
        }
    }
}

/// One rendering action emitted during a draw traversal.
///
/// `Display` yields the human-readable line written to text sinks.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawAction {
    Circle { radius: f64 },
    Square { side_length: f64 },
    /// Only emitted when composite announcement is enabled.
    Composite { label: Option<String> },
}

impl fmt::Display for DrawAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawAction::Circle { radius } => write!(f, "Drawing Circle with radius {}", radius),
            DrawAction::Square { side_length } => {
                write!(f, "Drawing Square with side length {}", side_length)
            }
            DrawAction::Composite { label: None } => write!(f, "Drawing Composite:"),
            DrawAction::Composite { label: Some(label) } => {
                write!(f, "Drawing Composite: {}", label)
            }
        }
    }
}
