//! User notification seam
//!
//! Every failure surfaces as a human-readable notification and every
//! progress indicator is dismissed on both success and failure paths; the
//! rendering itself belongs to the embedding application.

/// Sink for user-facing progress and outcome messages
pub trait Notifier: Send + Sync {
    /// Open a progress indicator
    fn loading(&self, message: &str);

    /// Dismiss the progress indicator
    fn loading_done(&self);

    /// Report a completed operation
    fn success(&self, message: &str);

    /// Report a failed operation, message verbatim
    fn error(&self, message: &str);
}

/// Notifier that drops everything, for headless use
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn loading(&self, _message: &str) {}
    fn loading_done(&self) {}
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
