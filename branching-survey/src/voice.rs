//! Speech-to-text capture for free-text questions.

use async_trait::async_trait;

use crate::QuestionId;

/// Error type for voice capture.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("Voice capture failed: {0}")]
    Capture(String),
}

/// Produces at most one transcript for the question on screen.
#[async_trait]
pub trait VoiceCapture: Send + Sync {
    /// Whether this platform can capture speech at all. Checked before every capture.
    fn is_supported(&self) -> bool;

    /// Listen once. `Ok(None)` means nothing was recognised.
    async fn transcribe(&self, question: &QuestionId) -> Result<Option<String>, VoiceError>;
}

/// Voice capture for platforms without a speech recogniser.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVoiceCapture;

#[async_trait]
impl VoiceCapture for NoVoiceCapture {
    fn is_supported(&self) -> bool {
        false
    }

    async fn transcribe(&self, _question: &QuestionId) -> Result<Option<String>, VoiceError> {
        Ok(None)
    }
}
