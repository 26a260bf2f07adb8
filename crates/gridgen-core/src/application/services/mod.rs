//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "plan a grid component" or "apply a plan".

pub mod generate_service;

pub use generate_service::{ApplyMode, ApplySummary, GenerateService};
