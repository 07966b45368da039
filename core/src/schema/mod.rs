//! Declarative result shapes shared by request building and response decoding

pub mod spec;
pub mod validate;

pub use spec::{ObjectSpec, SchemaSpec};
pub use validate::SchemaViolation;
