use async_trait::async_trait;
use serde_json::json;

use crate::{config, services::PushMessage, utils};
use anyhow::bail;

/// Posts scheduled notifications to the configured push gateway. The
/// gateway holds the message until `trigger_at` and delivers it to the
/// device token; nothing is read back besides the HTTP status.
#[derive(Clone)]
pub struct PushGatewayHandler;

#[async_trait]
impl crate::services::PushService for PushGatewayHandler {
    async fn schedule_push(&self, message: &PushMessage) -> anyhow::Result<()> {
        let response = utils::REQUEST_CLIENT
            .post(&config::APP_CONFIG.push_gateway_endpoint)
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .bearer_auth(&config::APP_CONFIG.push_gateway_auth)
            .json(message)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let error_body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or_else(|_| json!({"error": "unknown error"}));

        log::error!("push_gateway_error={error}", error = error_body);

        bail!("push gateway error: {}", error_body)
    }
}
