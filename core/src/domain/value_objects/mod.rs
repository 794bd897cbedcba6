//! Value objects representing immutable request inputs.

pub mod policy;
pub mod ttl;

pub use policy::{CodeGenerationSpec, Policy};
pub use ttl::parse_ttl;
