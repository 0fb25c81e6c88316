//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services write through the `DrawSink` boundary trait but are themselves
//! concrete structs, not traits.

mod benchmark;
mod render;

pub use benchmark::{BenchmarkPlan, BenchmarkReport, BenchmarkService, Measurement, Strategy};
pub use render::RenderService;
