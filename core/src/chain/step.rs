//! Chain steps and failure policies

use super::outputs::ChainOutputs;
use crate::error::{ChainError, Result};
use crate::generation::{GenerationRequest, GenerationResult};
use std::collections::HashSet;
use std::fmt;

/// Builds a step's request from the outputs of earlier steps
pub type RequestBuilder = Box<dyn Fn(&ChainOutputs) -> Result<GenerationRequest> + Send + Sync>;

/// What to do when a step's request cannot be built, sent or decoded
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FailurePolicy {
    /// End the chain with this step's error
    #[default]
    Abort,
    /// Store the given value under the step's name and continue
    Fallback(GenerationResult),
}

/// One named generation call inside a [`Chain`]
pub struct ChainStep {
    name: String,
    builder: RequestBuilder,
    on_failure: FailurePolicy,
}

impl ChainStep {
    /// Create a step whose request depends on prior outputs
    pub fn new<F>(name: impl Into<String>, builder: F) -> Self
    where
        F: Fn(&ChainOutputs) -> Result<GenerationRequest> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            builder: Box::new(builder),
            on_failure: FailurePolicy::Abort,
        }
    }

    /// Create a step with a request known up front
    pub fn fixed(name: impl Into<String>, request: GenerationRequest) -> Self {
        Self::new(name, move |_| Ok(request.clone()))
    }

    /// Set the failure policy
    pub fn on_failure(mut self, policy: FailurePolicy) -> Self {
        self.on_failure = policy;
        self
    }

    /// Shorthand for `on_failure(FailurePolicy::Fallback(value))`
    pub fn with_fallback(self, value: GenerationResult) -> Self {
        self.on_failure(FailurePolicy::Fallback(value))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> &FailurePolicy {
        &self.on_failure
    }

    pub(crate) fn build_request(&self, outputs: &ChainOutputs) -> Result<GenerationRequest> {
        (self.builder)(outputs)
    }
}

impl fmt::Debug for ChainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainStep")
            .field("name", &self.name)
            .field("on_failure", &self.on_failure)
            .finish_non_exhaustive()
    }
}

/// Ordered sequence of dependent steps forming one logical operation
#[derive(Debug, Default)]
pub struct Chain {
    steps: Vec<ChainStep>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain of exactly one step
    pub fn single(step: ChainStep) -> Self {
        Self::new().step(step)
    }

    /// Append a step
    pub fn step(mut self, step: ChainStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Reject empty chains and duplicate step names
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(ChainError::InvalidChain {
                message: "chain has no steps".to_string(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.name()) {
                return Err(ChainError::InvalidChain {
                    message: format!("duplicate step name '{}'", step.name()),
                }
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_duplicates_and_empty() {
        assert!(Chain::new().validate().is_err());

        let chain = Chain::new()
            .step(ChainStep::fixed("a", GenerationRequest::text("one")))
            .step(ChainStep::fixed("a", GenerationRequest::text("two")));
        let err = chain.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate step name 'a'"));
    }

    #[test]
    fn test_default_policy_is_abort() {
        let step = ChainStep::fixed("only", GenerationRequest::text("x"));
        assert_eq!(step.policy(), &FailurePolicy::Abort);

        let step = step.with_fallback(GenerationResult::RawText("placeholder".into()));
        assert!(matches!(step.policy(), FailurePolicy::Fallback(_)));
    }
}
