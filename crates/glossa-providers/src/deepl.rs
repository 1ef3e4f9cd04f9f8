//! DeepL translation provider.
//!
//! One form-encoded `POST` per request against the `/v2/translate`
//! endpoint. No retries.
//! Docs: <https://developers.deepl.com/docs/api-reference/translate>

use async_trait::async_trait;
use glossa_core::{
    config::DeepLConfig, error::GlossaError, message::TranslationRequest, traits::Translator,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// DeepL provider.
pub struct DeepLTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

/// Form body sent to DeepL. Field order is kept on the wire.
#[derive(Serialize)]
pub(crate) struct TranslateForm<'a> {
    pub auth_key: &'a str,
    pub text: &'a str,
    pub target_lang: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct TranslateResponse {
    #[serde(default)]
    pub translations: Vec<TranslationItem>,
}

#[derive(Deserialize)]
pub(crate) struct TranslationItem {
    pub text: String,
}

impl DeepLTranslator {
    /// Create from config values.
    pub fn from_config(cfg: &DeepLConfig) -> Self {
        Self::new(cfg.api_url.clone(), cfg.api_key.clone())
    }

    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }

    /// Build the HTTP request without sending it.
    pub(crate) fn build_request(
        &self,
        request: &TranslationRequest,
    ) -> Result<reqwest::Request, GlossaError> {
        let form = TranslateForm {
            auth_key: &self.api_key,
            text: &request.text,
            target_lang: &request.target_lang,
        };

        self.client
            .post(&self.api_url)
            .form(&form)
            .build()
            .map_err(|e| GlossaError::Translator(format!("deepl: failed to build request: {e}")))
    }
}

/// Pull the first translation out of a DeepL response body.
pub(crate) fn parse_response(body: &str) -> Result<String, GlossaError> {
    let parsed: TranslateResponse = serde_json::from_str(body)
        .map_err(|e| GlossaError::Translator(format!("deepl: failed to parse response: {e}")))?;

    parsed
        .translations
        .into_iter()
        .next()
        .map(|t| t.text)
        .ok_or_else(|| GlossaError::Translator("no translation found".into()))
}

#[async_trait]
impl Translator for DeepLTranslator {
    fn name(&self) -> &str {
        "deepl"
    }

    fn requires_api_key(&self) -> bool {
        true
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String, GlossaError> {
        let start = Instant::now();
        let http_request = self.build_request(request)?;
        debug!(
            "deepl: POST {} target_lang={}",
            self.api_url, request.target_lang
        );

        let resp = self
            .client
            .execute(http_request)
            .await
            .map_err(|e| GlossaError::Translator(format!("deepl request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GlossaError::Translator(format!("deepl: failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(GlossaError::Translator(format!(
                "deepl returned {status}: {body}"
            )));
        }

        let text = parse_response(&body)?;
        debug!(
            "deepl: translated {} chars in {}ms",
            request.text.chars().count(),
            start.elapsed().as_millis()
        );
        Ok(text)
    }
}
