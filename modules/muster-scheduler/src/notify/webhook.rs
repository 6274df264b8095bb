use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use muster_common::UserId;
use muster_engine::OutboundEffect;

use super::backend::Notifier;

/// Outbound webhook delivery: each effect becomes one JSON POST carrying
/// the target channel and the message text. The receiving bridge owns the
/// actual chat-platform session.
pub struct WebhookNotifier {
    webhook_url: String,
    http: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(webhook_url: String) -> Self {
        Self {
            webhook_url,
            http: reqwest::Client::new(),
        }
    }

    fn mentions(users: &[UserId]) -> String {
        if users.is_empty() {
            return "no one".to_string();
        }
        users
            .iter()
            .map(|u| format!("<@{u}>"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    async fn post(&self, payload: serde_json::Value) -> anyhow::Result<()> {
        let resp = self
            .http
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Webhook returned non-success");
            anyhow::bail!("webhook returned {status}");
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn dispatch(&self, effect: &OutboundEffect) -> anyhow::Result<()> {
        let payload = match effect {
            OutboundEffect::Reminder {
                channel,
                gathering,
                title,
                start,
            } => json!({
                "kind": "reminder",
                "channel": channel,
                "gathering": gathering,
                "text": format!("⏳ **{title}** starts <t:{}:R>!", start.timestamp()),
            }),
            OutboundEffect::DisableControls {
                channel,
                gathering,
                message,
            } => json!({
                "kind": "disable_controls",
                "channel": channel,
                "gathering": gathering,
                "message": message,
            }),
            OutboundEffect::StartingNow {
                channel,
                gathering,
                title,
                confirmed,
                waitlisted,
            } => json!({
                "kind": "starting_now",
                "channel": channel,
                "gathering": gathering,
                "text": format!(
                    "🎲 **{title}** is starting now!\nConfirmed: {}\nWaitlist: {}",
                    Self::mentions(confirmed),
                    Self::mentions(waitlisted),
                ),
            }),
        };

        self.post(payload).await
    }
}
