use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::Serialize;
use std::time::Duration;

use crate::config::{ ApiKey, JudgeConfig };
use crate::errors::ServiceError;
use crate::traits::{ ContentPart, JudgmentRequest, JudgmentService };

/// Anthropic Messages API request types
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: usize,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock<'a> {
    Text {
        text: &'a str,
    },
    Image {
        source: ImageSource<'a>,
    },
}

#[derive(Debug, Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'a str,
    data: &'a str,
}

impl<'a> From<&'a ContentPart> for ContentBlock<'a> {
    fn from(part: &'a ContentPart) -> Self {
        match part {
            ContentPart::Text(text) => ContentBlock::Text { text: text.as_str() },
            ContentPart::Image(image) =>
                ContentBlock::Image {
                    source: ImageSource {
                        kind: "base64",
                        media_type: image.media_type,
                        data: image.data.as_str(),
                    },
                },
        }
    }
}

/// Judgment service backed by the Anthropic Messages API
///
/// Construction requires an [`ApiKey`], so no request can be issued
/// without a credential.
#[derive(Clone)]
pub struct AnthropicJudge {
    config: JudgeConfig,
    api_key: ApiKey,
    http_client: reqwest::Client,
}

impl AnthropicJudge {
    pub fn new(config: JudgeConfig, api_key: ApiKey) -> Result<Self, ServiceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| ServiceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            api_key,
            http_client,
        })
    }

    fn build_request<'a>(&'a self, request: &'a JudgmentRequest) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user",
                content: request.parts.iter().map(ContentBlock::from).collect(),
            }],
        }
    }
}

/// Text of the first content block of a Messages API response body
pub fn response_text(body: &serde_json::Value) -> Result<String, ServiceError> {
    let content = body["content"]
        .as_array()
        .ok_or_else(|| ServiceError::Envelope("Missing content in response".to_string()))?;

    let first = content
        .first()
        .ok_or_else(|| ServiceError::Envelope("Empty content array in response".to_string()))?;

    first["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ServiceError::Envelope("Missing text in response content".to_string()))
}

#[async_trait]
impl JudgmentService for AnthropicJudge {
    async fn judge(&self, request: &JudgmentRequest) -> Result<String, ServiceError> {
        let body = self.build_request(request);

        info!("Making judgment request with model {}", self.config.model);
        debug!("API endpoint: {}", self.config.api_endpoint);
        debug!("Max tokens: {}", self.config.max_tokens);
        debug!("Content parts: {}", request.parts.len());

        let response = self.http_client
            .post(self.config.api_endpoint.as_str())
            .header("content-type", "application/json")
            .header("x-api-key", self.api_key.as_str())
            .header("anthropic-version", self.config.api_version.as_str())
            .json(&body)
            .send().await
            .map_err(|e| {
                let error_msg = format!("Network error when calling judgment service: {}", e);
                warn!("{}", error_msg);
                if e.is_timeout() {
                    warn!("Request timed out");
                }
                if e.is_connect() {
                    warn!("Connection error - check network connectivity");
                }
                ServiceError::Network(error_msg)
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());

            warn!("API error: HTTP {} - {}", status, error_text);
            return Err(ServiceError::Http {
                status,
                message: error_text,
            });
        }

        let response_body = response.text().await.map_err(|e| {
            warn!("Failed to get response text: {}", e);
            ServiceError::Envelope(e.to_string())
        })?;
        debug!("Response length: {} characters", response_body.len());

        let response_json: serde_json::Value = serde_json
            ::from_str(&response_body)
            .map_err(|e| ServiceError::Envelope(e.to_string()))?;

        let text = response_text(&response_json)?;
        info!("Received judgment ({} characters)", text.len());
        Ok(text)
    }

    fn model(&self) -> Option<&str> {
        Some(&self.config.model)
    }
}
