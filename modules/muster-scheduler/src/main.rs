use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use muster_common::{Config, UserId};
use muster_engine::Repository;
use muster_scheduler::notify::{LogNotifier, Notifier, WebhookNotifier};
use muster_scheduler::LifecycleScheduler;
use muster_store::JsonFileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("muster=info".parse()?))
        .init();

    info!("Muster lifecycle scheduler starting...");

    let config = Config::from_env();
    info!(
        data_path = %config.data_path.display(),
        interval_secs = config.sweep_interval_secs,
        lead_minutes = config.reminder_lead_minutes,
        "Loaded config"
    );

    let store = Arc::new(JsonFileStore::new(&config.data_path));
    let repo = Repository::new(store);

    let bootstrap_admin = config.bootstrap_admin.as_deref().map(UserId::from);
    repo.bootstrap(bootstrap_admin.as_ref()).await?;

    // Deliver through the webhook if configured, otherwise just log.
    let notifier: Box<dyn Notifier> = match &config.webhook_url {
        Some(url) => {
            info!("Webhook delivery enabled");
            Box::new(WebhookNotifier::new(url.clone()))
        }
        None => {
            info!("No MUSTER_WEBHOOK_URL set, logging effects only");
            Box::new(LogNotifier)
        }
    };

    let scheduler = LifecycleScheduler::new(repo, notifier, config.reminder_lead());
    scheduler.run(config.sweep_interval_secs).await;

    Ok(())
}
