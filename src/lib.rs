//! shapetree: the composite pattern over an arena-backed scene.
//!
//! Leaves (`Circle`, `Square`) and composites share one draw operation; a
//! single call at the root emits one action per leaf in pre-order. The same
//! pattern is shown over owned trees by the parts catalogue and the bank
//! accounts, and the benchmark compares composite drawing with flat lists.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
