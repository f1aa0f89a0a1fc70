use ratatui::{layout::Rect, Frame};

use admintui::model::LoginScreen;

use super::form::{form_height, render_form};
use super::layout::centered;

/// Render the login gate centered in the content area
pub fn render_login(f: &mut Frame, area: Rect, login: &LoginScreen) {
    let form_area = centered(area, 60, form_height(&login.form));
    render_form(f, form_area, "Admin Login", &login.form, login.pending.is_none());
}
