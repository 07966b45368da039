//! Tools listing command

use anyhow::Result;
use atelier_core::ToolRegistry;
use tracing::info;

/// Show available tools
pub async fn tools_command() -> Result<()> {
    info!("Listing available tools");

    println!("🛠️  Available Tools\n");

    let registry = ToolRegistry::default();
    for tool in registry.iter() {
        println!("📦 {} ({})", tool.name(), tool.title());
        println!("   {}", tool.description());

        for field in tool.inputs() {
            println!(
                "   --input {}=...   {} (default: \"{}\")",
                field.name, field.label, field.default
            );
        }
        if tool.requires_image() {
            println!("   --image <path>   screenshot to analyze (required)");
        }
        println!();
    }

    println!("💡 Run a tool with: atelier run <tool> [--input key=value]... [--image path]");

    Ok(())
}
