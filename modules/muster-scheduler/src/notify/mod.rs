pub mod backend;
pub mod log;
pub mod webhook;

pub use backend::Notifier;
pub use log::LogNotifier;
pub use webhook::WebhookNotifier;
