//! Backend implementations of [`GenerationClient`](super::GenerationClient)

pub mod google;

pub use google::GoogleGenerationClient;
