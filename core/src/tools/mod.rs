//! Design tools and their registry

pub mod base;
pub mod catalog;
pub mod prompt;
pub mod registry;

pub use base::{DesignTool, InputField, ToolInput, MISSING_IMAGE_MESSAGE};
pub use prompt::render_prompt;
pub use registry::ToolRegistry;
