use async_trait::async_trait;

use muster_engine::OutboundEffect;

/// Pluggable delivery backend for lifecycle effects. Dispatch failures are
/// the caller's to log; they never roll back the sweep's state changes.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn dispatch(&self, effect: &OutboundEffect) -> anyhow::Result<()>;
}
