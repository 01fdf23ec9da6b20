//! Utility helpers: vector math and step profiling.

pub mod math;
pub mod profiling;

pub use math::resolve;
pub use profiling::{ScopedTimer, StepProfiler};
