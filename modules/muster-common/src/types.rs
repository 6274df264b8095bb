use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Identifiers ---
//
// Ids are opaque strings handed to us by the chat platform. We never parse
// them; they only need equality, ordering (map keys), and serde.

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }
    };
}

id_type!(
    /// A participant's platform user id.
    UserId
);
id_type!(
    /// A gathering's id, supplied by the triggering action or minted as a UUID.
    GatheringId
);
id_type!(
    /// A channel reference on the chat platform.
    ChannelId
);
id_type!(
    /// A rendered message reference on the chat platform.
    MessageId
);

// --- Roles ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Moderator,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Moderator => write!(f, "moderator"),
        }
    }
}

// --- RSVP ---

/// The three choices a participant can express on a gathering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rsvp {
    Confirmed,
    Tentative,
    Declined,
}

/// Where a participant can end up on the roster. A capacity overflow turns
/// a `Confirmed` choice into a `Waitlisted` placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterCategory {
    Confirmed,
    Tentative,
    Declined,
    Waitlisted,
}

impl From<Rsvp> for RosterCategory {
    fn from(choice: Rsvp) -> Self {
        match choice {
            Rsvp::Confirmed => RosterCategory::Confirmed,
            Rsvp::Tentative => RosterCategory::Tentative,
            Rsvp::Declined => RosterCategory::Declined,
        }
    }
}

impl std::fmt::Display for RosterCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterCategory::Confirmed => write!(f, "confirmed"),
            RosterCategory::Tentative => write!(f, "tentative"),
            RosterCategory::Declined => write!(f, "declined"),
            RosterCategory::Waitlisted => write!(f, "waitlisted"),
        }
    }
}

// --- Roster ---

/// The four-category participant list of a gathering. A user id appears in
/// at most one sequence; `waitlisted` keeps insertion order (queue order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub confirmed: Vec<UserId>,
    #[serde(default)]
    pub tentative: Vec<UserId>,
    #[serde(default)]
    pub declined: Vec<UserId>,
    #[serde(default)]
    pub waitlisted: Vec<UserId>,
}

impl Roster {
    /// The category currently holding the user, if any.
    pub fn category_of(&self, user: &UserId) -> Option<RosterCategory> {
        for category in [
            RosterCategory::Confirmed,
            RosterCategory::Tentative,
            RosterCategory::Declined,
            RosterCategory::Waitlisted,
        ] {
            if self.sequence(category).contains(user) {
                return Some(category);
            }
        }
        None
    }

    /// Remove the user from whichever sequence holds them. No-op if absent.
    pub fn remove(&mut self, user: &UserId) -> Option<RosterCategory> {
        let category = self.category_of(user)?;
        self.sequence_mut(category).retain(|u| u != user);
        Some(category)
    }

    pub fn sequence(&self, category: RosterCategory) -> &Vec<UserId> {
        match category {
            RosterCategory::Confirmed => &self.confirmed,
            RosterCategory::Tentative => &self.tentative,
            RosterCategory::Declined => &self.declined,
            RosterCategory::Waitlisted => &self.waitlisted,
        }
    }

    pub fn sequence_mut(&mut self, category: RosterCategory) -> &mut Vec<UserId> {
        match category {
            RosterCategory::Confirmed => &mut self.confirmed,
            RosterCategory::Tentative => &mut self.tentative,
            RosterCategory::Declined => &mut self.declined,
            RosterCategory::Waitlisted => &mut self.waitlisted,
        }
    }
}

// --- Gathering ---

/// A scheduled group activity and its roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gathering {
    pub id: GatheringId,
    pub title: String,
    /// Start instant, UTC.
    pub start: DateTime<Utc>,
    /// Optional end instant (start + duration). Always after `start`.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// Game or topic label.
    pub game: String,
    pub description: String,
    /// Optional rulebook / reference link.
    #[serde(default)]
    pub link: Option<String>,
    /// Maximum confirmed participants. At least 1.
    pub capacity: u32,
    /// Channel the gathering was created in.
    pub channel: ChannelId,
    /// Rendered message, set after the first render.
    #[serde(default)]
    pub message: Option<MessageId>,
    #[serde(default)]
    pub reminder_sent: bool,
    #[serde(default)]
    pub roster: Roster,
}

impl Gathering {
    pub fn has_free_slot(&self) -> bool {
        self.roster.confirmed.len() < self.capacity as usize
    }
}

// --- Registry ---

/// The aggregate root: everything the bot persists, as one document.
/// Every mutation is a full load-mutate-save cycle against this value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub gatherings: BTreeMap<GatheringId, Gathering>,
    #[serde(default)]
    pub admins: BTreeSet<UserId>,
    #[serde(default)]
    pub moderators: BTreeSet<UserId>,
    /// When set, lifecycle notifications go here instead of each
    /// gathering's origin channel.
    #[serde(default)]
    pub notification_channel: Option<ChannelId>,
}

impl Registry {
    /// The channel lifecycle notifications for this gathering should go to.
    pub fn notify_channel<'a>(&'a self, gathering: &'a Gathering) -> &'a ChannelId {
        self.notification_channel
            .as_ref()
            .unwrap_or(&gathering.channel)
    }
}
