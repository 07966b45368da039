//! Multi-step generation chains

pub mod orchestrator;
pub mod outputs;
pub mod step;

pub use orchestrator::ChainOrchestrator;
pub use outputs::ChainOutputs;
pub use step::{Chain, ChainStep, FailurePolicy, RequestBuilder};
