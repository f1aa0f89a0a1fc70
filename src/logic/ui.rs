//! UI state transition logic
//!
//! Pure functions for toast timing and small UI transitions.

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u128 = 1500;

/// Delay between a successful login and switching to the dashboard
pub const LOGIN_REDIRECT_MS: u128 = 1500;

pub fn should_dismiss_toast(elapsed_ms: u128) -> bool {
    elapsed_ms >= TOAST_DURATION_MS
}

pub fn should_finish_login(elapsed_ms: u128) -> bool {
    elapsed_ms >= LOGIN_REDIRECT_MS
}

/// Step through a fixed option list; `None` (nothing chosen) enters at either end
///
/// # Examples
/// ```
/// use admintui::logic::ui::cycle_option;
///
/// let types = ["NORMAL", "DEMO", "LIVE"];
/// assert_eq!(cycle_option(&types, "", true), Some("NORMAL"));
/// assert_eq!(cycle_option(&types, "", false), Some("LIVE"));
/// assert_eq!(cycle_option(&types, "DEMO", true), Some("LIVE"));
/// assert_eq!(cycle_option(&types, "LIVE", true), Some("NORMAL"));
/// ```
pub fn cycle_option<'a>(options: &[&'a str], current: &str, forward: bool) -> Option<&'a str> {
    if options.is_empty() {
        return None;
    }
    let position = options.iter().position(|o| *o == current);
    let next = match (position, forward) {
        (None, true) => 0,
        (None, false) => options.len() - 1,
        (Some(i), true) => (i + 1) % options.len(),
        (Some(i), false) => (i + options.len() - 1) % options.len(),
    };
    Some(options[next])
}

/// Mask a secret for display
pub fn mask(value: &str) -> String {
    "•".repeat(value.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_dismissal_threshold() {
        assert!(!should_dismiss_toast(0));
        assert!(!should_dismiss_toast(1499));
        assert!(should_dismiss_toast(1500));
    }

    #[test]
    fn test_login_redirect_threshold() {
        assert!(!should_finish_login(1000));
        assert!(should_finish_login(2000));
    }

    #[test]
    fn test_cycle_option_backward_wraps() {
        let langs = ["ENGLISH", "HINDI"];
        assert_eq!(cycle_option(&langs, "ENGLISH", false), Some("HINDI"));
        assert_eq!(cycle_option(&langs, "HINDI", false), Some("ENGLISH"));
    }

    #[test]
    fn test_cycle_option_unknown_value_restarts() {
        let langs = ["ENGLISH", "HINDI"];
        assert_eq!(cycle_option(&langs, "FRENCH", true), Some("ENGLISH"));
        assert_eq!(cycle_option(&[], "x", true), None);
    }

    #[test]
    fn test_mask_counts_chars() {
        assert_eq!(mask("123"), "•••");
        assert_eq!(mask(""), "");
    }
}
