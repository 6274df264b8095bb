//! The tick runner: load the registry, run the pure sweep, dispatch the
//! effects, save once. One gathering's delivery failure never aborts the
//! rest of the tick or the save.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use muster_common::Result;
use muster_engine::{sweep, OutboundEffect, Repository};

use crate::notify::Notifier;

/// What one sweep did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    pub reminders: u64,
    pub started: u64,
    pub dispatch_failures: u64,
}

impl std::fmt::Display for SweepStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "reminders={} started={} dispatch_failures={}",
            self.reminders, self.started, self.dispatch_failures
        )
    }
}

impl SweepStats {
    fn is_quiet(&self) -> bool {
        self.reminders == 0 && self.started == 0 && self.dispatch_failures == 0
    }
}

pub struct LifecycleScheduler {
    repo: Repository,
    notifier: Box<dyn Notifier>,
    reminder_lead: Duration,
}

impl LifecycleScheduler {
    pub fn new(repo: Repository, notifier: Box<dyn Notifier>, reminder_lead: Duration) -> Self {
        Self {
            repo,
            notifier,
            reminder_lead,
        }
    }

    /// One sweep against an explicit `now`. The registry is saved exactly
    /// once, after all transitions and dispatches.
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<SweepStats> {
        let mut registry = self.repo.registry().await?;
        let effects = sweep(&mut registry, now, self.reminder_lead);

        let mut stats = SweepStats::default();
        for effect in &effects {
            match effect {
                OutboundEffect::Reminder { .. } => stats.reminders += 1,
                OutboundEffect::StartingNow { .. } => stats.started += 1,
                OutboundEffect::DisableControls { .. } => {}
            }
            if let Err(e) = self.notifier.dispatch(effect).await {
                stats.dispatch_failures += 1;
                warn!(error = %e, ?effect, "Effect dispatch failed, continuing");
            }
        }

        self.repo.save(&registry).await?;
        Ok(stats)
    }

    /// Sweep forever on a fixed interval. A failed tick is logged and the
    /// next tick runs normally.
    pub async fn run(&self, interval_secs: u64) {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
        loop {
            ticker.tick().await;
            match self.run_once(Utc::now()).await {
                Ok(stats) if !stats.is_quiet() => info!("Sweep complete. {stats}"),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Sweep failed"),
            }
        }
    }
}
