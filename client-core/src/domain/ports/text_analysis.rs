//! Port for the external text-analysis collaborator.
//!
//! Journal analysis and step generation are produced elsewhere (a remote
//! model or heuristic backend); the core consumes them as opaque producers
//! of task-creation input and never implements their internals.

use async_trait::async_trait;

use crate::domain::journal::JournalAnalysis;
use crate::domain::StepDraft;

use super::define_port_error;

define_port_error! {
    /// Errors raised by text-analysis adapters.
    pub enum TextAnalysisError {
        /// The collaborator could not be reached.
        Unavailable { message: String } =>
            "text analysis unavailable: {message}",
        /// The collaborator answered with something undecodable.
        Decode { message: String } =>
            "text analysis response invalid: {message}",
    }
}

/// Port for journal analysis and step generation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextAnalysis: Send + Sync {
    /// Analyse free-form journal text into tasks, deadlines, obstacles,
    /// a schedule, and coping strategies.
    async fn analyze(&self, text: &str) -> Result<JournalAnalysis, TextAnalysisError>;

    /// Break a task title into 3-6 actionable steps.
    async fn generate_steps(&self, title: &str) -> Result<Vec<StepDraft>, TextAnalysisError>;
}

/// Fixture implementation producing an empty analysis and a single generic
/// step. Use it where analysis quality is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTextAnalysis;

#[async_trait]
impl TextAnalysis for FixtureTextAnalysis {
    async fn analyze(&self, _text: &str) -> Result<JournalAnalysis, TextAnalysisError> {
        Ok(JournalAnalysis::default())
    }

    async fn generate_steps(&self, title: &str) -> Result<Vec<StepDraft>, TextAnalysisError> {
        StepDraft::try_new(format!("Work on: {title}"), None)
            .map(|step| vec![step])
            .map_err(|err| TextAnalysisError::decode(err.to_string()))
    }
}
