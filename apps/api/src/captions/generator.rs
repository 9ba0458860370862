//! LLM-backed caption generation.
//!
//! Flow: build prompt → one chat call asking for `CAPTION_VARIANTS` completions →
//! trim each choice → attach extracted hashtags when the request asked for them.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::captions::error::{CaptionError, ServiceError};
use crate::captions::prompt_builder;
use crate::captions::prompts::{
    CAPTION_MAX_TOKENS, CAPTION_SYSTEM, CAPTION_TEMPERATURE, CAPTION_VARIANTS,
};
use crate::captions::service::{
    extract_hashtags, CaptionBatch, CaptionService, GeneratedCaption, GenerationRequest,
};
use crate::llm_client::{ChatParams, LlmClient};

/// Sampling parameters used for every caption call.
pub const CAPTION_PARAMS: ChatParams = ChatParams {
    max_tokens: CAPTION_MAX_TOKENS,
    temperature: CAPTION_TEMPERATURE,
    n: CAPTION_VARIANTS,
};

pub struct LlmCaptionService(pub LlmClient);

#[async_trait]
impl CaptionService for LlmCaptionService {
    async fn generate(&self, request: &GenerationRequest) -> Result<CaptionBatch, CaptionError> {
        let prompt = prompt_builder::build(&request.content, &request.options)?;

        let response = self
            .0
            .chat(CAPTION_SYSTEM, &prompt, CAPTION_PARAMS)
            .await
            .map_err(|e| {
                warn!("Caption LLM call failed: {e}");
                ServiceError::from(e)
            })?;

        let captions = shape_captions(response.texts(), request.options.include_hashtags);

        if captions.is_empty() {
            return Err(ServiceError::new(
                "The model returned no usable captions. Please try again.",
            )
            .into());
        }

        info!(
            "Generated {} caption variants ({} / {} / {})",
            captions.len(),
            request.options.platform,
            request.options.tone,
            request.options.length
        );

        Ok(CaptionBatch {
            captions,
            usage: response.usage,
        })
    }

    fn backend_name(&self) -> &'static str {
        "openai"
    }
}

/// Turns raw completion texts into captions. Hashtags are only attached when requested.
fn shape_captions(texts: Vec<String>, include_hashtags: bool) -> Vec<GeneratedCaption> {
    texts
        .into_iter()
        .filter(|text| !text.trim().is_empty())
        .map(|text| {
            let hashtags = include_hashtags.then(|| extract_hashtags(&text));
            GeneratedCaption { text, hashtags }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::style::StyleOptions;
    use crate::llm_client::DEFAULT_MODEL;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serves a canned `/chat/completions` response on an ephemeral port.
    async fn spawn_backend(status: StatusCode, body: Value) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |Json(request): Json<Value>| {
                let body = body.clone();
                async move {
                    assert_eq!(request["n"], 3);
                    assert_eq!(request["max_tokens"], 300);
                    assert_eq!(request["messages"][0]["content"], CAPTION_SYSTEM);
                    (status, Json(body))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn service(base_url: &str) -> LlmCaptionService {
        LlmCaptionService(
            LlmClient::new("test-key".to_string(), base_url, DEFAULT_MODEL.to_string()).unwrap(),
        )
    }

    fn service_message(err: CaptionError) -> String {
        match err {
            CaptionError::Service(e) => e.message,
            other => panic!("expected a service error, got {other:?}"),
        }
    }

    fn request(include_hashtags: bool) -> GenerationRequest {
        GenerationRequest {
            content: "a sunset over the ocean".to_string(),
            options: StyleOptions {
                include_hashtags,
                ..StyleOptions::default()
            },
        }
    }

    #[test]
    fn test_caption_params_match_backend_contract() {
        assert_eq!(CAPTION_PARAMS.max_tokens, 300);
        assert_eq!(CAPTION_PARAMS.n, 3);
        assert!((CAPTION_PARAMS.temperature - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_shape_captions_attaches_hashtags_only_when_requested() {
        let texts = vec!["Sun's out 🌅 #sunset #beach".to_string()];
        let with = shape_captions(texts.clone(), true);
        assert_eq!(
            with[0].hashtags,
            Some(vec!["#sunset".to_string(), "#beach".to_string()])
        );
        let without = shape_captions(texts, false);
        assert_eq!(without[0].hashtags, None);
    }

    #[tokio::test]
    async fn test_generate_returns_one_caption_per_choice() {
        let base_url = spawn_backend(
            StatusCode::OK,
            json!({
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "First 🌅 #sunset"}},
                    {"index": 1, "message": {"role": "assistant", "content": " Second "}},
                    {"index": 2, "message": {"role": "assistant", "content": ""}}
                ],
                "usage": {"prompt_tokens": 60, "completion_tokens": 40, "total_tokens": 100}
            }),
        )
        .await;

        let batch = service(&base_url).generate(&request(true)).await.unwrap();
        let captions = batch.captions;

        assert_eq!(captions.len(), 2);
        assert_eq!(captions[0].text, "First 🌅 #sunset");
        assert_eq!(captions[0].hashtags, Some(vec!["#sunset".to_string()]));
        assert_eq!(captions[1].text, "Second");
        assert_eq!(captions[1].hashtags, Some(vec![]));
        assert_eq!(batch.usage.map(|u| u.total_tokens), Some(100));
    }

    #[tokio::test]
    async fn test_generate_passes_api_error_message_through() {
        let base_url = spawn_backend(
            StatusCode::UNAUTHORIZED,
            json!({"error": {"message": "Incorrect API key provided"}}),
        )
        .await;

        let err = service(&base_url).generate(&request(false)).await.unwrap_err();
        assert_eq!(service_message(err), "Incorrect API key provided");
    }

    #[tokio::test]
    async fn test_generate_with_no_usable_choices_fails() {
        let base_url = spawn_backend(StatusCode::OK, json!({"choices": []})).await;
        let err = service(&base_url).generate(&request(false)).await.unwrap_err();
        assert!(service_message(err).contains("no usable captions"));
    }

    #[tokio::test]
    async fn test_blank_content_stays_a_validation_error() {
        let service = service("http://127.0.0.1:9");
        let blank = GenerationRequest {
            content: "  ".to_string(),
            options: StyleOptions::default(),
        };
        let err = service.generate(&blank).await.unwrap_err();
        assert_eq!(
            err,
            CaptionError::Validation("Content description is required".to_string())
        );
    }
}
