//! Physics-side types consumed by the hit-test path
//!
//! Traces themselves are performed by the host world; this module only
//! describes rays and the hit results they produce.

pub mod hit;

pub use hit::{ComponentId, HitResult, Ray};
