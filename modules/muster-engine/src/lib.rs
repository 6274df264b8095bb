pub mod draft;
pub mod permissions;
pub mod repository;
pub mod roster;
pub mod summary;
pub mod sweep;

pub use draft::{GatheringDraft, NewGathering};
pub use repository::Repository;
pub use roster::{apply_rsvp, RsvpOutcome};
pub use sweep::{sweep, OutboundEffect};
