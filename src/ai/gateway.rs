/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Gateway to the external generation service
//!
//! One request, one response: no retries, no streaming, no
//! cancellation. The backend trait keeps the HTTP transport swappable
//! (tests use a stub).

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::ai::{
    GeneratedData, Generation, GenerationContext, GenerationError, GenerationMetadata,
    GenerationRequest, GenerationTarget, ServiceResponse,
};

/// Transport to the generation service
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Forward one generation request and return the raw service response
    async fn generate(&self, request: &GenerationRequest)
        -> Result<ServiceResponse, GenerationError>;
}

/// Error body returned by the service on HTTP error statuses
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServiceErrorBody {
    error: String,
    details: Option<String>,
}

/// HTTP transport: JSON POST to the configured endpoint
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpBackend {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        HttpBackend {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<ServiceResponse, GenerationError> {
        let mut call = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            call = call.bearer_auth(key);
        }

        let response = call.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body: ServiceErrorBody = response.json().await.unwrap_or_default();
            let mut message = if body.error.is_empty() {
                format!("Generation service returned {}", status)
            } else {
                body.error
            };
            if let Some(details) = body.details {
                message = format!("{}: {}", message, details);
            }
            return Err(GenerationError::Service(message));
        }

        Ok(response.json().await?)
    }
}

/// The generation gateway: prompt in, normalized entity out
pub struct AiGateway {
    backend: Arc<dyn GenerationBackend>,
}

impl AiGateway {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        AiGateway { backend }
    }

    /// Gateway talking HTTP to the configured service endpoint
    pub fn over_http(endpoint: String, api_key: Option<String>) -> Self {
        Self::new(Arc::new(HttpBackend::new(endpoint, api_key)))
    }

    /// Generate an entity of the requested kind from a prompt
    ///
    /// Fails fast on an empty/whitespace prompt without touching the
    /// network. On success the payload is normalized into the typed
    /// entity, provenance is stamped, and any service warning is
    /// carried through.
    pub async fn generate(
        &self,
        prompt: &str,
        target: GenerationTarget,
        context: Option<GenerationContext>,
    ) -> Result<Generation, GenerationError> {
        if prompt.trim().is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }

        let request = GenerationRequest {
            user_prompt: prompt.to_string(),
            target,
            context,
        };

        let response = self.backend.generate(&request).await?;

        if !response.success {
            return Err(GenerationError::Service(
                response
                    .error
                    .unwrap_or_else(|| "AI generation failed".to_string()),
            ));
        }

        let payload = response.data.ok_or_else(|| {
            GenerationError::Service("No content received from the generation service".to_string())
        })?;

        let mut data = GeneratedData::from_value(target, payload)?;
        data.stamp_provenance(prompt);

        Ok(Generation {
            data,
            metadata: GenerationMetadata {
                generated_at: Utc::now(),
                prompt: prompt.to_string(),
                target,
            },
            warning: response.warning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Stub backend that replays a canned response and counts calls
    struct StubBackend {
        response: Mutex<Option<Result<ServiceResponse, GenerationError>>>,
        calls: AtomicUsize,
    }

    impl StubBackend {
        fn returning(response: Result<ServiceResponse, GenerationError>) -> Arc<Self> {
            Arc::new(StubBackend {
                response: Mutex::new(Some(response)),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl GenerationBackend for StubBackend {
        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<ServiceResponse, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .lock()
                .unwrap()
                .take()
                .expect("stub called more than once")
        }
    }

    fn component_payload() -> serde_json::Value {
        serde_json::json!({
            "id": "component_generated",
            "type": "feature",
            "content": { "title": "Amazing Feature", "description": "Helps you ship" },
            "styles": { "backgroundColor": "#FFFFFF" },
            "position": { "x": 100.0, "y": 150.0 },
            "size": { "width": 350, "height": 250 }
        })
    }

    #[tokio::test]
    async fn empty_prompt_fails_without_calling_the_backend() {
        let backend = StubBackend::returning(Ok(ServiceResponse::default()));
        let gateway = AiGateway::new(backend.clone());

        let result = gateway
            .generate("   ", GenerationTarget::Component, None)
            .await;
        assert!(matches!(result, Err(GenerationError::EmptyPrompt)));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_normalizes_and_stamps_provenance() {
        let backend = StubBackend::returning(Ok(ServiceResponse {
            success: true,
            data: Some(component_payload()),
            error: None,
            warning: None,
        }));
        let gateway = AiGateway::new(backend.clone());

        let generation = gateway
            .generate("a feature card", GenerationTarget::Component, None)
            .await
            .unwrap();

        match &generation.data {
            GeneratedData::Component(component) => {
                assert_eq!(component.id, "component_generated");
                assert!(component.is_ai_generated);
                assert_eq!(component.ai_prompt.as_deref(), Some("a feature card"));
            }
            other => panic!("unexpected data: {:?}", other),
        }
        assert_eq!(generation.metadata.prompt, "a feature card");
        assert_eq!(generation.metadata.target, GenerationTarget::Component);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn service_failure_surfaces_its_message() {
        let backend = StubBackend::returning(Ok(ServiceResponse {
            success: false,
            data: None,
            error: Some("AI service unavailable".to_string()),
            warning: None,
        }));
        let gateway = AiGateway::new(backend);

        let result = gateway
            .generate("anything", GenerationTarget::Layout, None)
            .await;
        match result {
            Err(GenerationError::Service(message)) => {
                assert_eq!(message, "AI service unavailable")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn fallback_warning_is_carried_through() {
        let backend = StubBackend::returning(Ok(ServiceResponse {
            success: true,
            data: Some(component_payload()),
            error: None,
            warning: Some("Used fallback due to AI parsing error".to_string()),
        }));
        let gateway = AiGateway::new(backend);

        let generation = gateway
            .generate("a feature card", GenerationTarget::Component, None)
            .await
            .unwrap();
        assert_eq!(
            generation.warning.as_deref(),
            Some("Used fallback due to AI parsing error")
        );
    }

    #[tokio::test]
    async fn mismatched_payload_is_a_payload_error() {
        // a layout body cannot normalize as a component
        let backend = StubBackend::returning(Ok(ServiceResponse {
            success: true,
            data: Some(serde_json::json!({ "id": "layout_1", "sections": [] })),
            error: None,
            warning: None,
        }));
        let gateway = AiGateway::new(backend);

        let result = gateway
            .generate("a layout", GenerationTarget::Component, None)
            .await;
        assert!(matches!(result, Err(GenerationError::Payload(_))));
    }

    #[test]
    fn request_uses_the_wire_field_names() {
        let request = GenerationRequest {
            user_prompt: "hello".to_string(),
            target: GenerationTarget::Template,
            context: Some(GenerationContext {
                target_section: Some("section_hero".to_string()),
                ..Default::default()
            }),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["userPrompt"], "hello");
        assert_eq!(value["target"], "template");
        assert_eq!(value["context"]["targetSection"], "section_hero");
        assert!(value["context"].get("existingComponents").is_none());
    }
}
