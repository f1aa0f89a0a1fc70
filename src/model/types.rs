//! Shared types for the Model
//!
//! These types are used across multiple sub-models and represent
//! fundamental concepts of the console: where the user is and what
//! the last operation reported.

use crate::Entity;

/// Banner colour for an operation result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Danger,
    Warning,
    Info,
}

/// The result banner shown under a screen's form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
}

impl Alert {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            text: text.into(),
        }
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Danger,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Warning,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == AlertKind::Success
    }
}

/// A screen reachable from the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    DataBrowser,
    Add(Entity),
    Delete(Entity),
    Modify(Entity),
}

impl Route {
    /// Dashboard menu order
    pub const ALL: [Route; 11] = [
        Route::Dashboard,
        Route::DataBrowser,
        Route::Add(Entity::Test),
        Route::Add(Entity::Course),
        Route::Add(Entity::Banner),
        Route::Delete(Entity::Test),
        Route::Delete(Entity::Course),
        Route::Delete(Entity::Banner),
        Route::Modify(Entity::Test),
        Route::Modify(Entity::Course),
        Route::Modify(Entity::Banner),
    ];

    pub fn title(&self) -> String {
        match self {
            Route::Dashboard => "Dashboard".to_string(),
            Route::DataBrowser => "Data Browser".to_string(),
            Route::Add(entity) => format!("Add {}", entity.as_str()),
            Route::Delete(entity) => format!("Delete {}", entity.as_str()),
            Route::Modify(entity) => format!("Modify {}", entity.as_str()),
        }
    }

    /// Screens listed on the dashboard menu (everything but the dashboard itself)
    pub fn menu() -> &'static [Route] {
        &Route::ALL[1..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_titles_follow_menu_order() {
        let titles: Vec<String> = Route::ALL.iter().map(Route::title).collect();
        assert_eq!(
            titles,
            vec![
                "Dashboard",
                "Data Browser",
                "Add Test",
                "Add Course",
                "Add Banner",
                "Delete Test",
                "Delete Course",
                "Delete Banner",
                "Modify Test",
                "Modify Course",
                "Modify Banner",
            ]
        );
    }

    #[test]
    fn test_menu_skips_dashboard() {
        assert_eq!(Route::menu().len(), 10);
        assert_eq!(Route::menu()[0], Route::DataBrowser);
    }
}
