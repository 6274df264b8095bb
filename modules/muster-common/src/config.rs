use std::env;
use std::path::PathBuf;

use chrono::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the persisted registry document.
    pub data_path: PathBuf,

    /// Seconds between lifecycle sweeps.
    pub sweep_interval_secs: u64,

    /// Minutes before start at which the reminder fires.
    pub reminder_lead_minutes: i64,

    /// Outbound webhook for notifications. None disables delivery.
    pub webhook_url: Option<String>,

    /// User id seeded into the admin set on first boot.
    pub bootstrap_admin: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    /// Everything has a default; malformed numbers panic with a clear message.
    pub fn from_env() -> Self {
        Self {
            data_path: env::var("MUSTER_DATA_PATH")
                .unwrap_or_else(|_| "muster_data.json".to_string())
                .into(),
            sweep_interval_secs: env::var("MUSTER_SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("MUSTER_SWEEP_INTERVAL_SECS must be a number"),
            reminder_lead_minutes: env::var("MUSTER_REMINDER_LEAD_MINUTES")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("MUSTER_REMINDER_LEAD_MINUTES must be a number"),
            webhook_url: env::var("MUSTER_WEBHOOK_URL").ok(),
            bootstrap_admin: env::var("MUSTER_BOOTSTRAP_ADMIN").ok(),
        }
    }

    pub fn reminder_lead(&self) -> Duration {
        Duration::minutes(self.reminder_lead_minutes)
    }
}
