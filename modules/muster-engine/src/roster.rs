//! The roster state machine.
//!
//! One operation: reconcile a participant's choice against the roster.
//! It is a full set-reconciliation, not a delta, so retried calls converge
//! to the same state.

use muster_common::{Gathering, Rsvp, RosterCategory, UserId};

/// What happened when a choice was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpOutcome {
    /// Where the acting user landed.
    pub placed: RosterCategory,
    /// Waitlisted user promoted into a freed confirmed slot, if any.
    pub promoted: Option<UserId>,
    /// User-facing notice for the presentation layer to render.
    pub notice: Option<String>,
}

/// Apply a participant's choice to a gathering's roster.
///
/// A `Confirmed` choice against a full gathering is rerouted to the
/// waitlist rather than rejected. When the acting user moves away from
/// `confirmed` and a slot frees up, the longest-waiting waitlisted user is
/// promoted, unless that user is the actor themselves (leaving your own
/// waitlist slot must not promote you).
pub fn apply_rsvp(gathering: &mut Gathering, user: &UserId, choice: Rsvp) -> RsvpOutcome {
    let roster = &mut gathering.roster;
    let capacity = gathering.capacity as usize;

    roster.remove(user);

    let mut notice = None;
    let placed = if choice == Rsvp::Confirmed && roster.confirmed.len() >= capacity {
        roster.waitlisted.push(user.clone());
        notice = Some("This gathering is full. You were added to the waitlist.".to_string());
        RosterCategory::Waitlisted
    } else {
        let sequence = roster.sequence_mut(choice.into());
        if !sequence.contains(user) {
            sequence.push(user.clone());
        }
        choice.into()
    };

    let mut promoted = None;
    if choice != Rsvp::Confirmed && roster.confirmed.len() < capacity && !roster.waitlisted.is_empty()
    {
        let head = roster.waitlisted.remove(0);
        if &head == user {
            // The actor just left their own waitlist slot. Put them back.
            roster.waitlisted.insert(0, head);
        } else {
            roster.confirmed.push(head.clone());
            promoted = Some(head);
        }
    }

    RsvpOutcome {
        placed,
        promoted,
        notice,
    }
}
