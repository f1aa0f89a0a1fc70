//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the application.
//! The Model is organized into focused sub-models:
//!
//! - **NavigationModel**: Active route, dashboard menu, session
//! - **UiModel**: Toasts and the quit flag
//! - **Screens**: Per-screen forms, results and busy flags
//!
//! Key principles:
//! - Clone + Debug: Can snapshot and inspect state
//! - No services: All I/O lives in the runtime and the API service
//! - Screens never read each other's state

pub mod form;
pub mod navigation;
pub mod screens;
pub mod types;
pub mod ui;

use std::time::Instant;

pub use form::Form;
pub use navigation::NavigationModel;
pub use screens::{BrowserScreen, CreateScreen, DeleteScreen, EntityMap, ModifyScreen, Pane};
pub use types::*;
pub use ui::UiModel;

use crate::config::Credentials;
use crate::logic;

/// Login gate state
#[derive(Clone, Debug)]
pub struct LoginScreen {
    pub form: Form,
    /// Accepted username and when it was accepted; the dashboard opens after a short delay
    pub pending: Option<(String, Instant)>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            form: Form::login(),
            pending: None,
        }
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// State of every screen behind the login gate
#[derive(Clone, Debug)]
pub struct Screens {
    pub create: EntityMap<CreateScreen>,
    pub modify: EntityMap<ModifyScreen>,
    pub delete: EntityMap<DeleteScreen>,
    pub browser: BrowserScreen,
}

impl Screens {
    pub fn new(page_size: u32) -> Self {
        Self {
            create: EntityMap::new(CreateScreen::new),
            modify: EntityMap::new(ModifyScreen::new),
            delete: EntityMap::new(DeleteScreen::new),
            browser: BrowserScreen::new(page_size),
        }
    }
}

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub navigation: NavigationModel,
    pub ui: UiModel,
    pub login: LoginScreen,
    pub screens: Screens,

    /// Page size the data browser starts with
    pub default_page_size: u32,

    /// Bumped on every logout; replies tagged with an older value are stale
    pub session: u64,
}

impl Model {
    pub fn new(default_page_size: u32) -> Self {
        Self {
            navigation: NavigationModel::new(),
            ui: UiModel::new(),
            login: LoginScreen::new(),
            screens: Screens::new(default_page_size),
            default_page_size,
            session: 0,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.navigation.is_logged_in()
    }

    /// Check the login form against the configured credentials
    pub fn attempt_login(&mut self, expected: &Credentials) -> bool {
        if self.login.pending.is_some() {
            return false;
        }
        let username = self.login.form.value(form::keys::USERNAME).to_string();
        let password = self.login.form.value(form::keys::PASSWORD);

        if logic::auth::check_credentials(&username, password, expected) {
            self.show_toast(Alert::success("Login successful!"));
            self.login.pending = Some((username, Instant::now()));
            true
        } else {
            self.show_toast(Alert::danger("Error: Invalid username or password."));
            false
        }
    }

    /// Open the dashboard once the login toast has had its time
    pub fn finish_login_if_due(&mut self) -> bool {
        let due = match &self.login.pending {
            Some((_, accepted_at)) => {
                logic::ui::should_finish_login(accepted_at.elapsed().as_millis())
            }
            None => false,
        };
        if due {
            self.complete_login();
        }
        due
    }

    pub fn complete_login(&mut self) {
        if let Some((username, _)) = self.login.pending.take() {
            self.navigation.user = Some(username);
            self.navigation.route = Route::Dashboard;
            self.login = LoginScreen::new();
        }
    }

    /// Back to the login gate with every screen reset
    pub fn logout(&mut self) {
        let toast = self.ui.toast_message.take();
        let session = self.session.wrapping_add(1);
        *self = Model::new(self.default_page_size);
        self.ui.toast_message = toast;
        self.session = session;
    }

    /// Whether a reply issued under `session` still belongs to this model
    pub fn is_current_session(&self, session: u64) -> bool {
        self.is_logged_in() && session == self.session
    }

    pub fn navigate(&mut self, route: Route) {
        self.navigation.route = route;
        if let Some(index) = Route::menu().iter().position(|r| *r == route) {
            self.navigation.menu_selection = Some(index);
        }
    }

    /// Whether a dialog or popup on the current screen takes the keyboard
    pub fn has_modal(&self) -> bool {
        match self.navigation.route {
            Route::Delete(entity) => self.screens.delete.get(entity).confirming,
            Route::DataBrowser => self.screens.browser.detail.is_some(),
            _ => false,
        }
    }

    pub fn close_modal(&mut self) {
        match self.navigation.route {
            Route::Delete(entity) => self.screens.delete.get_mut(entity).cancel_delete(),
            Route::DataBrowser => self.screens.browser.close_detail(),
            _ => {}
        }
    }

    /// Whether the current screen is waiting on the backend
    pub fn is_busy(&self) -> bool {
        match self.navigation.route {
            Route::Dashboard => false,
            Route::DataBrowser => self.screens.browser.busy,
            Route::Add(entity) => self.screens.create.get(entity).busy,
            Route::Modify(entity) => self.screens.modify.get(entity).busy,
            Route::Delete(entity) => self.screens.delete.get(entity).busy,
        }
    }

    pub fn show_toast(&mut self, alert: Alert) {
        self.ui.show_toast(alert);
    }

    pub fn should_dismiss_toast(&self) -> bool {
        self.ui.should_dismiss_toast()
    }

    pub fn dismiss_toast(&mut self) {
        self.ui.dismiss_toast();
    }
}
