//! Driver implementations

#[cfg(feature = "fake")]
mod fake;
#[cfg(feature = "webhook")]
mod webhook;

#[cfg(feature = "fake")]
pub use fake::{FAKE, FakeBackend};
#[cfg(feature = "webhook")]
pub use webhook::{WEBHOOK, WebhookBackend};
