//! # Atelier Core
//!
//! Core library for Atelier - a suite of generative design tools.
//!
//! This library provides the generation orchestration core: schema-constrained
//! requests to a generative backend, validation and decoding of its responses,
//! and composition of dependent calls into a single logical operation. The
//! design-tool catalog is built on top of it.

// Core modules
pub mod chain;
pub mod config;
pub mod error;
pub mod generation;
pub mod schema;
pub mod session;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use chain::{Chain, ChainOrchestrator, ChainOutputs, ChainStep, FailurePolicy};
pub use config::BackendConfig;
pub use error::{Error, FailureKind, Result};
pub use generation::{
    GenerationClient, GenerationRequest, GenerationResult, GoogleGenerationClient, ImageBlob,
    InlineImage, ResponseDecoder,
};
pub use schema::SchemaSpec;
pub use session::{ToolSession, ToolState};
pub use tools::{DesignTool, ToolInput, ToolRegistry};

/// Current version of the atelier-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for binaries built on the library.
///
/// Logs go to stderr so stdout can carry tool output. `RUST_LOG` takes
/// precedence over the `verbose` switch when it is set.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
