use async_trait::async_trait;

use crate::application::ports::{LlmClient, LlmClientError};

pub struct MockLlmClient;

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, LlmClientError> {
        Ok("Title: Mock Cluster\n\
            Explanation: Records share mock wording.\n\
            Detailed Analysis: The records in this cluster were grouped by the mock client.\n\
            Five Top Issues: 1. mock 2. mock 3. mock 4. mock 5. mock"
            .to_string())
    }
}
