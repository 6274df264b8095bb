//! Typed access to the registry, layered over a [`DocumentStore`].
//!
//! Every operation is a full load-mutate-save cycle. The cycle is not
//! atomic across interleavings: two concurrent mutations of the same
//! gathering can lose an update. Contention per gathering is a handful of
//! roster changes a minute, so this is an accepted risk rather than a
//! locking layer; a versioned save could be added here if that changes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use muster_common::{
    ChannelId, Gathering, GatheringId, MessageId, MusterError, Registry, Result, Role, Roster,
    Rsvp, UserId,
};
use muster_store::DocumentStore;

use crate::draft::GatheringDraft;
use crate::permissions;
use crate::roster::{apply_rsvp, RsvpOutcome};

#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Seed the first admin on a fresh registry, so role grants are
    /// reachable. Does nothing once any admin exists.
    pub async fn bootstrap(&self, admin: Option<&UserId>) -> Result<()> {
        let Some(admin) = admin else {
            return Ok(());
        };
        let mut registry = self.registry().await?;
        if !registry.admins.is_empty() {
            return Ok(());
        }
        info!(admin = %admin, "Seeding bootstrap admin");
        registry.admins.insert(admin.clone());
        self.save(&registry).await
    }

    pub async fn registry(&self) -> Result<Registry> {
        Ok(self.store.load().await?)
    }

    pub async fn save(&self, registry: &Registry) -> Result<()> {
        Ok(self.store.save(registry).await?)
    }

    pub async fn get(&self, id: &GatheringId) -> Result<Gathering> {
        let registry = self.registry().await?;
        registry
            .gatherings
            .get(id)
            .cloned()
            .ok_or_else(|| MusterError::NotFound(id.clone()))
    }

    /// Create a gathering from a validated draft. Moderator-gated. The id
    /// comes from the triggering action; callers without one get a minted
    /// UUID. Returns the id under which the gathering was stored.
    pub async fn create(
        &self,
        actor: &UserId,
        id: Option<GatheringId>,
        draft: &GatheringDraft,
        now: DateTime<Utc>,
    ) -> Result<GatheringId> {
        let mut registry = self.registry().await?;
        if !permissions::is_privileged(&registry, actor, Role::Moderator) {
            return Err(MusterError::Unauthorized(Role::Moderator));
        }

        let new = draft.validate(now)?;
        let id = id.unwrap_or_else(|| GatheringId::new(Uuid::new_v4().to_string()));
        if registry.gatherings.contains_key(&id) {
            return Err(MusterError::Validation(format!(
                "a gathering with id {id} already exists"
            )));
        }

        let gathering = Gathering {
            id: id.clone(),
            title: new.title,
            start: new.start,
            end: new.end,
            game: new.game,
            description: new.description,
            link: new.link,
            capacity: new.capacity,
            channel: new.channel,
            message: None,
            reminder_sent: false,
            roster: Roster::default(),
        };
        info!(gathering = %id, start = %gathering.start, "Gathering created");
        registry.gatherings.insert(id.clone(), gathering);
        self.save(&registry).await?;
        Ok(id)
    }

    /// Record the rendered message after the first render.
    pub async fn record_message(&self, id: &GatheringId, message: MessageId) -> Result<()> {
        let mut registry = self.registry().await?;
        let gathering = registry
            .gatherings
            .get_mut(id)
            .ok_or_else(|| MusterError::NotFound(id.clone()))?;
        gathering.message = Some(message);
        self.save(&registry).await
    }

    /// Apply an RSVP choice. Returns the updated gathering (the render
    /// model for the presentation layer) and the outcome.
    pub async fn rsvp(
        &self,
        id: &GatheringId,
        user: &UserId,
        choice: Rsvp,
    ) -> Result<(Gathering, RsvpOutcome)> {
        let mut registry = self.registry().await?;
        let gathering = registry
            .gatherings
            .get_mut(id)
            .ok_or_else(|| MusterError::NotFound(id.clone()))?;

        let outcome = apply_rsvp(gathering, user, choice);
        let updated = gathering.clone();
        self.save(&registry).await?;
        Ok((updated, outcome))
    }

    /// Point lifecycle notifications at a channel. Admin-gated.
    pub async fn set_notification_channel(
        &self,
        actor: &UserId,
        channel: ChannelId,
    ) -> Result<()> {
        let mut registry = self.registry().await?;
        if !permissions::is_privileged(&registry, actor, Role::Admin) {
            return Err(MusterError::Unauthorized(Role::Admin));
        }
        registry.notification_channel = Some(channel);
        self.save(&registry).await
    }

    pub async fn grant_role(&self, actor: &UserId, target: &UserId, role: Role) -> Result<()> {
        let mut registry = self.registry().await?;
        permissions::grant_role(&mut registry, actor, target, role)?;
        self.save(&registry).await
    }
}
