//! Generation client abstractions and implementations

pub mod client;
pub mod decoder;
pub mod providers;
pub mod request;
mod wire;

pub use client::GenerationClient;
pub use decoder::ResponseDecoder;
pub use providers::*;
pub use request::{
    GenerationKind, GenerationRequest, GenerationResult, ImageBlob, InlineImage,
    DEFAULT_IMAGE_MIME,
};
