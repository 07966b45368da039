//! Single tool invocation command

use crate::config::CliConfigLoader;
use anyhow::{anyhow, bail, Context, Result};
use atelier_core::session::ToolState;
use atelier_core::{GoogleGenerationClient, InlineImage, ToolInput, ToolRegistry, ToolSession};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Run one tool invocation and print its outputs as JSON
pub async fn run_command(
    tool_name: String,
    inputs: Vec<String>,
    image: Option<PathBuf>,
    pretty: bool,
    config_loader: CliConfigLoader,
) -> Result<()> {
    let registry = ToolRegistry::default();
    let tool = registry.get(&tool_name).ok_or_else(|| {
        anyhow!(
            "Unknown tool '{}'. Available tools: {}",
            tool_name,
            registry.list_tools().join(", ")
        )
    })?;

    let mut input = parse_inputs(&inputs)?;
    input.check_known(&tool.inputs())?;
    if let Some(path) = &image {
        input = input.with_image(load_image(path).await?);
    }

    let config = config_loader.load().await?;
    info!("🎨 Running {} with {}", tool.title(), config.text_model);
    debug!("Backend base URL: {}", config.base_url);

    let client = GoogleGenerationClient::new(config)?;
    let session = ToolSession::new(tool, Arc::new(client));

    match session.invoke(input).await {
        ToolState::Success(outputs) => {
            let rendered = if pretty {
                serde_json::to_string_pretty(&outputs)?
            } else {
                serde_json::to_string(&outputs)?
            };
            println!("{}", rendered);
            Ok(())
        }
        ToolState::Error(message) => bail!(message),
        state => bail!("Invocation did not settle (state: {:?})", state),
    }
}

/// Parse repeated `key=value` arguments
fn parse_inputs(pairs: &[String]) -> Result<ToolInput> {
    let mut input = ToolInput::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Expected key=value, got '{}'", pair))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("Input name is empty in '{}'", pair);
        }
        input.set(key, value);
    }
    Ok(input)
}

/// Read an image file, guessing its MIME type from the extension
async fn load_image(path: &Path) -> Result<InlineImage> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let mime_type = match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => bail!("Unsupported image type: {}", path.display()),
    };

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image: {}", path.display()))?;

    Ok(InlineImage::from_bytes(mime_type, &bytes)?)
}
