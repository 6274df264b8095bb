use async_trait::async_trait;
use tracing::info;

use muster_engine::OutboundEffect;

use super::backend::Notifier;

/// Logs effects instead of delivering them. The daemon default when no
/// webhook is configured; also handy for dry runs.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn dispatch(&self, effect: &OutboundEffect) -> anyhow::Result<()> {
        match effect {
            OutboundEffect::Reminder {
                channel,
                gathering,
                title,
                start,
            } => {
                info!(%channel, %gathering, title, start = %start, "Reminder (not delivered)");
            }
            OutboundEffect::DisableControls {
                channel,
                gathering,
                message,
            } => {
                info!(%channel, %gathering, %message, "Disable controls (not delivered)");
            }
            OutboundEffect::StartingNow {
                channel,
                gathering,
                title,
                confirmed,
                waitlisted,
            } => {
                info!(
                    %channel,
                    %gathering,
                    title,
                    confirmed = confirmed.len(),
                    waitlisted = waitlisted.len(),
                    "Starting now (not delivered)"
                );
            }
        }
        Ok(())
    }
}
