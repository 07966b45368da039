//! Sequential execution of generation chains

use super::outputs::ChainOutputs;
use super::step::{Chain, ChainStep, FailurePolicy};
use crate::error::{ChainError, Error, Result};
use crate::generation::{GenerationClient, GenerationResult};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Runs chains of dependent generation steps against one client
#[derive(Clone)]
pub struct ChainOrchestrator {
    client: Arc<dyn GenerationClient>,
}

impl ChainOrchestrator {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<dyn GenerationClient> {
        &self.client
    }

    /// Run a chain that nothing can cancel
    pub async fn execute(&self, chain: &Chain) -> Result<ChainOutputs> {
        self.run(chain, &CancellationToken::new()).await
    }

    /// Run every step in order.
    ///
    /// Step `k + 1` is built only after step `k` has produced a result or a
    /// fallback. A failing `Abort` step ends the run without building later
    /// steps. Cancellation always ends the run, whatever the step's policy.
    pub async fn run(&self, chain: &Chain, cancel: &CancellationToken) -> Result<ChainOutputs> {
        chain.validate()?;

        let run_id = Uuid::new_v4();
        debug!(%run_id, steps = chain.len(), backend = self.client.backend_name(), "Starting chain");

        let mut outputs = ChainOutputs::default();
        for (index, step) in chain.steps().iter().enumerate() {
            if cancel.is_cancelled() {
                info!(%run_id, step = step.name(), "Chain cancelled before step");
                return Err(ChainError::Cancelled.into());
            }

            match self.run_step(step, &outputs, cancel).await {
                Ok(result) => {
                    debug!(%run_id, index, step = step.name(), result = result.kind_name(), "Step completed");
                    outputs.insert(step.name(), result);
                }
                Err(error) if error.is_cancelled() => {
                    info!(%run_id, step = step.name(), "Chain cancelled during step");
                    return Err(error);
                }
                Err(error) => match step.policy() {
                    FailurePolicy::Abort => {
                        warn!(%run_id, step = step.name(), "Step failed, aborting chain: {}", error);
                        return Err(ChainError::Step {
                            step: step.name().to_string(),
                            source: Box::new(error),
                        }
                        .into());
                    }
                    FailurePolicy::Fallback(value) => {
                        warn!(%run_id, step = step.name(), "Step failed, using fallback: {}", error);
                        outputs.insert_fallback(step.name(), value.clone());
                    }
                },
            }
        }

        debug!(%run_id, fallbacks = outputs.fallbacks().len(), "Chain finished");
        Ok(outputs)
    }

    async fn run_step(
        &self,
        step: &ChainStep,
        outputs: &ChainOutputs,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult> {
        let request = step.build_request(outputs)?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::from(ChainError::Cancelled)),
            result = self.client.generate(&request) => result,
        }
    }
}
