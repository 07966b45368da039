//! Tool registry for looking up design tools

use crate::tools::catalog::*;
use crate::tools::DesignTool;
use std::sync::Arc;

/// Registry of available design tools, in registration order
pub struct ToolRegistry {
    tools: Vec<Arc<dyn DesignTool>>,
}

impl ToolRegistry {
    /// Create an empty tool registry
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn DesignTool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(index) => self.tools[index] = tool,
            None => self.tools.push(tool),
        }
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn DesignTool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// List all available tool names
    pub fn list_tools(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Get (title, description) for a tool
    pub fn get_tool_info(&self, name: &str) -> Option<(&str, &str)> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| (t.title(), t.description()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn DesignTool>> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(ColorPaletteTool));
        registry.register(Arc::new(FontPairingTool));
        registry.register(Arc::new(MoodboardTool));
        registry.register(Arc::new(DesignCritiqueTool));
        registry.register(Arc::new(MicrocopyTool));
        registry.register(Arc::new(PersonaTool));
        registry.register(Arc::new(UserFlowTool));
        registry.register(Arc::new(IconForgeTool));
        registry.register(Arc::new(LayoutTool));
        registry.register(Arc::new(UsabilityScriptTool));
        registry.register(Arc::new(SpecCheckTool));

        registry
    }
}
