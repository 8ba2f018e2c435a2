/*!
 * Mock translator for testing.
 *
 * This module provides a translator that never leaves the process:
 * - `MockTranslator::working()` - Always succeeds with tagged text
 * - `MockTranslator::fail_after(n)` - Succeeds `n` times, then fails
 * - `MockTranslator::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Succeeds for the first `successes` requests, fails afterwards
    FailAfter { successes: usize },
    /// Always fails with an error
    Failing,
}

/// Mock translator for testing reconciliation behavior
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock translator that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that fails once `successes` requests have been served
    pub fn fail_after(successes: usize) -> Self {
        Self::new(MockBehavior::FailAfter { successes })
    }

    /// Create a failing mock translator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Number of translate calls received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// The text a working mock returns for `text`
    pub fn expected_translation(text: &str, target_language: &str) -> String {
        format!("[{}] {}", target_language, text)
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(Self::expected_translation(text, target_language)),

            MockBehavior::FailAfter { successes } if count < successes => {
                Ok(Self::expected_translation(text, target_language))
            }

            MockBehavior::FailAfter { .. } => Err(ProviderError::ApiError {
                message: format!("Simulated failure (request #{})", count + 1),
                status_code: 503,
            }),

            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated translator failure".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
