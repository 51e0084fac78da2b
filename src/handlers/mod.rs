//! HTTP handlers, generic over `Resource`.

pub mod resource;
pub use resource::*;
