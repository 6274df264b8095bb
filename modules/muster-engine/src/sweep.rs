//! The lifecycle sweep: a pure pass over every gathering that computes the
//! time-gated transitions against `now` and returns the side effects to
//! dispatch. Keeping it pure means the transition logic tests without a
//! timer or a network.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use muster_common::{ChannelId, GatheringId, MessageId, Registry, UserId};

/// A side effect the sweep wants dispatched. Effects are dispatched after
/// the sweep by the tick runner; a dispatch failure never rolls back the
/// state change it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEffect {
    /// One-hour-out reminder (lead is configurable).
    Reminder {
        channel: ChannelId,
        gathering: GatheringId,
        title: String,
        start: DateTime<Utc>,
    },
    /// Ask the presentation layer to disable the roster controls on the
    /// rendered message. A missing message is non-fatal.
    DisableControls {
        channel: ChannelId,
        gathering: GatheringId,
        message: MessageId,
    },
    /// The gathering is starting now; carries the final rosters.
    StartingNow {
        channel: ChannelId,
        gathering: GatheringId,
        title: String,
        confirmed: Vec<UserId>,
        waitlisted: Vec<UserId>,
    },
}

/// One sweep over all gatherings.
///
/// The reminder transition fires once, flag-guarded, when
/// `now >= start - lead`. The start transition fires when `now >= start`:
/// controls are disabled, the start is announced with the final rosters,
/// and the gathering is removed. Both can fire for the same gathering in
/// one pass, so a scheduler that was down through the whole reminder
/// window still reminds before it retires.
pub fn sweep(registry: &mut Registry, now: DateTime<Utc>, lead: Duration) -> Vec<OutboundEffect> {
    let mut effects = Vec::new();
    let ids: Vec<GatheringId> = registry.gatherings.keys().cloned().collect();

    for id in ids {
        let Some(gathering) = registry.gatherings.get_mut(&id) else {
            continue;
        };
        let channel = registry
            .notification_channel
            .clone()
            .unwrap_or_else(|| gathering.channel.clone());

        if now >= gathering.start - lead && !gathering.reminder_sent {
            debug!(gathering = %id, "Reminder due");
            effects.push(OutboundEffect::Reminder {
                channel: channel.clone(),
                gathering: id.clone(),
                title: gathering.title.clone(),
                start: gathering.start,
            });
            gathering.reminder_sent = true;
        }

        if now >= gathering.start {
            if let Some(gathering) = registry.gatherings.remove(&id) {
                debug!(gathering = %id, "Starting, retiring from the registry");
                if let Some(message) = gathering.message {
                    effects.push(OutboundEffect::DisableControls {
                        channel: channel.clone(),
                        gathering: id.clone(),
                        message,
                    });
                }
                effects.push(OutboundEffect::StartingNow {
                    channel,
                    gathering: id,
                    title: gathering.title,
                    confirmed: gathering.roster.confirmed,
                    waitlisted: gathering.roster.waitlisted,
                });
            }
        }
    }

    effects
}
