use async_trait::async_trait;

use crate::errors::ServiceError;

/// An image ready to embed in a judgment request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Base64 (standard alphabet, padded) of the raw file bytes
    pub data: String,
    pub media_type: &'static str,
}

/// One ordered piece of a judgment request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    Image(EncodedImage),
}

/// The ordered content sent to the judgment service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgmentRequest {
    pub parts: Vec<ContentPart>,
}

/// A multimodal service that judges a reference/candidate pair and answers
/// with free-form text.
#[async_trait]
pub trait JudgmentService: Send + Sync {
    /// Send the request and return the raw response text
    async fn judge(&self, request: &JudgmentRequest) -> Result<String, ServiceError>;

    /// Model identifier recorded in report metadata
    fn model(&self) -> Option<&str> {
        None
    }
}
