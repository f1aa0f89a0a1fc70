//! Navigation Model
//!
//! This sub-model contains all state related to navigation:
//! the active route, the dashboard menu selection and the signed-in user.

use super::types::Route;
use crate::logic;

/// Navigation state (route, menu selection, session)
#[derive(Clone, Debug)]
pub struct NavigationModel {
    /// Screen currently shown once logged in
    pub route: Route,

    /// Highlighted entry in the dashboard menu
    pub menu_selection: Option<usize>,

    /// Logged-in username; `None` means the login gate is shown
    pub user: Option<String>,
}

impl NavigationModel {
    pub fn new() -> Self {
        Self {
            route: Route::Dashboard,
            menu_selection: Some(0),
            user: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn select_next(&mut self) {
        self.menu_selection = logic::navigation::next_selection(self.menu_selection, Route::menu().len());
    }

    pub fn select_prev(&mut self) {
        self.menu_selection = logic::navigation::prev_selection(self.menu_selection, Route::menu().len());
    }

    pub fn selected_route(&self) -> Option<Route> {
        self.menu_selection.and_then(|i| Route::menu().get(i)).copied()
    }
}

impl Default for NavigationModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Entity;

    #[test]
    fn test_navigation_model_creation() {
        let model = NavigationModel::new();
        assert_eq!(model.route, Route::Dashboard);
        assert!(!model.is_logged_in());
        assert_eq!(model.selected_route(), Some(Route::DataBrowser));
    }

    #[test]
    fn test_menu_selection_wraps() {
        let mut model = NavigationModel::new();
        model.select_prev();
        assert_eq!(model.selected_route(), Some(Route::Modify(Entity::Banner)));
        model.select_next();
        assert_eq!(model.selected_route(), Some(Route::DataBrowser));
        model.select_next();
        assert_eq!(model.selected_route(), Some(Route::Add(Entity::Test)));
    }
}
