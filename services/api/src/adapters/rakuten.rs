//! services/api/src/adapters/rakuten.rs
//!
//! This module contains the adapter for the upstream Rakuten recipe API.
//! It implements the `RecipeApi` port from the `core` crate, classifying
//! every failure into the gateway's taxonomy. Fallback substitution is NOT
//! done here; that is the gateway's job.

use async_trait::async_trait;
use foodmatch_core::ports::{GatewayError, RawRecipe, RecipeApi};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

//=========================================================================================
// Wire Envelope
//=========================================================================================

/// The ranking endpoint answers with either a result sequence or an embedded
/// error object, both under HTTP 200 in some failure modes.
#[derive(Deserialize)]
struct RankingResponse {
    #[serde(default)]
    result: Option<Vec<RawRecipe>>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `RecipeApi` against the Rakuten recipe service.
#[derive(Clone)]
pub struct RakutenRecipeApi {
    client: reqwest::Client,
    base_url: String,
    app_id: Option<String>,
}

impl RakutenRecipeApi {
    /// Creates a new `RakutenRecipeApi`. `app_id` stays optional on purpose:
    /// the missing-credential case must surface as a classified error at
    /// call time, not prevent startup.
    pub fn new(client: reqwest::Client, base_url: String, app_id: Option<String>) -> Self {
        Self {
            client,
            base_url,
            app_id,
        }
    }
}

//=========================================================================================
// `RecipeApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl RecipeApi for RakutenRecipeApi {
    async fn category_ranking(
        &self,
        category_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<RawRecipe>, GatewayError> {
        let app_id = self
            .app_id
            .as_deref()
            .ok_or_else(|| GatewayError::Config("RAKUTEN_APP_ID is not set".to_string()))?;

        if cancel.is_cancelled() {
            return Err(GatewayError::Cancelled);
        }

        let url = format!("{}/Recipe/CategoryRanking/20170426", self.base_url);
        let request = self
            .client
            .get(&url)
            .query(&[
                ("format", "json"),
                ("applicationId", app_id),
                ("categoryId", category_id),
            ])
            .send();

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(GatewayError::Cancelled),
            response = request => response
                .map_err(|e| GatewayError::Upstream(format!("transport failure: {e}")))?,
        };

        if !response.status().is_success() {
            return Err(GatewayError::Upstream(format!(
                "http status {}",
                response.status()
            )));
        }

        let payload = tokio::select! {
            _ = cancel.cancelled() => return Err(GatewayError::Cancelled),
            payload = response.json::<RankingResponse>() => payload
                .map_err(|e| GatewayError::Upstream(format!("malformed payload: {e}")))?,
        };

        if let Some(code) = payload.error {
            let description = payload.error_description.unwrap_or_default();
            return Err(GatewayError::Upstream(format!(
                "api error {code}: {description}"
            )));
        }

        // An absent result sequence is a legitimate empty ranking.
        Ok(payload.result.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(app_id: Option<&str>) -> RakutenRecipeApi {
        RakutenRecipeApi::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9".to_string(),
            app_id.map(|s| s.to_string()),
        )
    }

    #[tokio::test]
    async fn missing_credential_is_a_config_error_before_any_request() {
        let result = api(None)
            .category_ranking("30", &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[tokio::test]
    async fn pre_cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();

        let result = api(Some("test-app-id")).category_ranking("30", &token).await;

        assert!(matches!(result, Err(GatewayError::Cancelled)));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_upstream_error() {
        // Port 9 (discard) refuses connections, so the transport fails fast.
        let result = api(Some("test-app-id"))
            .category_ranking("30", &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(GatewayError::Upstream(_))));
    }

    #[test]
    fn envelope_detects_embedded_errors() {
        let payload: RankingResponse = serde_json::from_str(
            r#"{"error": "wrong_parameter", "error_description": "applicationId is invalid"}"#,
        )
        .unwrap();

        assert_eq!(payload.error.as_deref(), Some("wrong_parameter"));
        assert!(payload.result.is_none());
    }
}
