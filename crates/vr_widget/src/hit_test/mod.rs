//! VR hit-test routing
//!
//! - path: the [`CustomHitTestPath`] seam the host viewport calls
//! - router: per-world router implementing it
//! - registry: per-world router ownership and lifecycle
//! - cache: per-frame hit cache with forced-hit override

mod cache;
pub mod path;
pub mod router;
pub mod registry;

pub use path::CustomHitTestPath;
pub use router::{check_hit, HitRejection, HitTestRouter};
pub use registry::RouterRegistry;
