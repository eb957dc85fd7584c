/*!
 * Mock provider for tests and offline runs.
 *
 * The mock client completes requests in-process with configurable behavior,
 * so the translation pipeline can be exercised without network access.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;

use crate::errors::ProviderError;
use super::Provider;

/// How the mock client answers requests
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the user message unchanged
    Echo,

    /// Return a fixed response regardless of input
    Fixed(String),

    /// Fail every request with the given message
    Fail(String),
}

/// A request against the mock client
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// System prompt, carried for inspection in tests
    pub system: String,

    /// User message
    pub user: String,
}

/// Response from the mock client
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Generated text
    pub text: String,

    /// Simulated prompt token count (word count of the inputs)
    pub prompt_tokens: u32,

    /// Simulated completion token count (word count of the output)
    pub completion_tokens: u32,
}

/// In-process provider with scripted behavior
#[derive(Debug)]
pub struct MockClient {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockClient {
    /// Create a mock client with the given behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completion calls made against this client
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

#[async_trait]
impl Provider for MockClient {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: MockRequest) -> Result<MockResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let text = match &self.behavior {
            MockBehavior::Echo => request.user.clone(),
            MockBehavior::Fixed(response) => response.clone(),
            MockBehavior::Fail(message) => {
                return Err(ProviderError::RequestFailed(message.clone()));
            }
        };

        Ok(MockResponse {
            prompt_tokens: word_count(&request.system) + word_count(&request.user),
            completion_tokens: word_count(&text),
            text,
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.behavior {
            MockBehavior::Fail(message) => Err(ProviderError::RequestFailed(message.clone())),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &MockResponse) -> String {
        response.text.clone()
    }
}
