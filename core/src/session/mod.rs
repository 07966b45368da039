//! Tool sessions: one tool, one client, one live state

pub mod state;

pub use state::{Invocation, ToolSlot, ToolState};

use crate::chain::{ChainOrchestrator, ChainOutputs};
use crate::generation::GenerationClient;
use crate::tools::{DesignTool, ToolInput};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Drives invocations of one design tool against an injected client.
///
/// Overlapping invocations are allowed; the most recently started one owns
/// the state and earlier ones are cancelled.
pub struct ToolSession {
    tool: Arc<dyn DesignTool>,
    orchestrator: ChainOrchestrator,
    slot: ToolSlot<ChainOutputs>,
}

impl ToolSession {
    pub fn new(tool: Arc<dyn DesignTool>, client: Arc<dyn GenerationClient>) -> Self {
        Self {
            tool,
            orchestrator: ChainOrchestrator::new(client),
            slot: ToolSlot::new(),
        }
    }

    pub fn tool(&self) -> &Arc<dyn DesignTool> {
        &self.tool
    }

    pub fn state(&self) -> ToolState<ChainOutputs> {
        self.slot.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ToolState<ChainOutputs>> {
        self.slot.subscribe()
    }

    pub fn reset(&self) {
        self.slot.reset();
    }

    /// Run one invocation and return the state observed once it settles.
    ///
    /// If a newer invocation superseded this one, the returned state is the
    /// newer invocation's.
    pub async fn invoke(&self, input: ToolInput) -> ToolState<ChainOutputs> {
        if self.tool.requires_image() && input.image().is_none() {
            self.slot.fail_fast(self.tool.missing_image_message());
            return self.slot.state();
        }

        let invocation = self.slot.begin();
        debug!(tool = self.tool.name(), generation = invocation.generation(), "Invoking tool");

        let outcome = match self.tool.build_chain(&input) {
            Ok(chain) => self.orchestrator.run(&chain, invocation.token()).await,
            Err(e) => Err(e),
        };

        self.slot
            .complete(&invocation, outcome, self.tool.failure_message());
        self.slot.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationResult;
    use crate::testing::ScriptedClient;
    use crate::tools::catalog::{microcopy, DesignCritiqueTool, MicrocopyTool, SpecCheckTool};
    use crate::tools::MISSING_IMAGE_MESSAGE;
    use serde_json::json;
    use std::time::Duration;

    fn copy(headline: &str) -> serde_json::Value {
        json!({ "suggestions": [{ "headline": headline, "body": "b", "primary_button": "OK" }] })
    }

    #[tokio::test]
    async fn test_missing_image_fails_without_client_call() {
        let tools: [Arc<dyn DesignTool>; 2] =
            [Arc::new(DesignCritiqueTool), Arc::new(SpecCheckTool)];
        for tool in tools {
            let client = Arc::new(ScriptedClient::new());
            let session = ToolSession::new(tool.clone(), client.clone());

            let state = session.invoke(ToolInput::new()).await;

            assert_eq!(state.error(), Some(MISSING_IMAGE_MESSAGE), "{}", tool.name());
            assert_eq!(client.call_count(), 0, "{}", tool.name());
        }
    }

    #[tokio::test]
    async fn test_failure_collapses_to_tool_message() {
        let client = Arc::new(ScriptedClient::new().fail_status(500));
        let session = ToolSession::new(Arc::new(MicrocopyTool), client);

        let state = session.invoke(ToolInput::new()).await;
        assert_eq!(
            state.error(),
            Some("Could not generate copy. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_success_exposes_outputs() {
        let client = Arc::new(ScriptedClient::new().reply_decoded(copy("Are you sure?")));
        let session = ToolSession::new(Arc::new(MicrocopyTool), client);

        let state = session.invoke(ToolInput::new()).await;
        let outputs = state.value().unwrap();
        let decoded: microcopy::CopySuggestions = outputs.decode(microcopy::STEP).unwrap();
        assert_eq!(decoded.suggestions[0].headline, "Are you sure?");
    }

    #[tokio::test]
    async fn test_last_request_sent_wins() {
        let client = Arc::new(
            ScriptedClient::new()
                .reply_after(
                    Duration::from_secs(30),
                    GenerationResult::Decoded(copy("older")),
                )
                .reply_decoded(copy("newer")),
        );
        let session = ToolSession::new(Arc::new(MicrocopyTool), client);

        let first = session.invoke(ToolInput::new().with("tone", "formal"));
        let second = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            session.invoke(ToolInput::new().with("tone", "casual")).await
        };
        let (_, second_state) = tokio::join!(first, second);

        let headline = |state: &ToolState<ChainOutputs>| {
            state
                .value()
                .and_then(|outputs| outputs.get(microcopy::STEP))
                .and_then(|result| result.str_at("/suggestions/0/headline"))
                .map(str::to_string)
        };
        assert_eq!(headline(&second_state).as_deref(), Some("newer"));
        assert_eq!(headline(&session.state()).as_deref(), Some("newer"));
    }
}
