//! Domain layer: composite structures and their rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod accounts;
pub mod catalog;
pub mod error;
pub mod scene;
pub mod shape;

pub use accounts::{AccountComponent, BankAccount, CustomerAccount};
pub use catalog::{Assembly, Component, Part};
pub use error::{DomainError, DomainResult};
pub use scene::{Graphic, GraphicNode, NodeId, PreOrderIter, Scene};
pub use shape::{Circle, DrawAction, Shape, Square};
