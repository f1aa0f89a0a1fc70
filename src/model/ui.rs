//! UI Model
//!
//! This sub-model contains the transient interface state that is not owned
//! by a single screen: toast notifications and the quit flag.

use std::time::Instant;

use super::types::Alert;

/// Toasts and application lifecycle
#[derive(Clone, Debug)]
pub struct UiModel {
    /// Toast notification (message, timestamp)
    pub toast_message: Option<(Alert, Instant)>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new() -> Self {
        Self {
            toast_message: None,
            should_quit: false,
        }
    }

    /// Show toast message
    pub fn show_toast(&mut self, alert: Alert) {
        self.toast_message = Some((alert, Instant::now()));
    }

    /// Check if toast has been visible long enough
    pub fn should_dismiss_toast(&self) -> bool {
        if let Some((_, timestamp)) = &self.toast_message {
            crate::logic::ui::should_dismiss_toast(timestamp.elapsed().as_millis())
        } else {
            false
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}

impl Default for UiModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_ui_model_creation() {
        let model = UiModel::new();
        assert!(model.toast_message.is_none());
        assert!(!model.should_quit);
    }

    #[test]
    fn test_toast() {
        let mut model = UiModel::new();
        model.show_toast(Alert::success("Saved"));
        assert!(model.toast_message.is_some());
        assert!(!model.should_dismiss_toast());

        model.dismiss_toast();
        assert!(model.toast_message.is_none());
    }

    #[test]
    fn test_old_toast_is_due_for_dismissal() {
        let mut model = UiModel::new();
        let shown = Instant::now()
            .checked_sub(Duration::from_millis(2000))
            .unwrap_or_else(Instant::now);
        model.toast_message = Some((Alert::info("hello"), shown));
        // Instant may not reach back 2s right after boot; only assert when it did
        if shown.elapsed().as_millis() >= 1500 {
            assert!(model.should_dismiss_toast());
        }
    }
}
