use crate::App;
use ratatui::Frame;

use admintui::model::Route;

use super::{
    dashboard, data_table, dialogs, entity_screens,
    layout,
    legend::{self, LegendContext},
    login, nav_bar, status_bar, toast,
};

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();
    let model = &app.model;

    let legend_context = LegendContext::from_model(model);
    let layout_info = layout::calculate_layout(size, legend_context);

    nav_bar::render_nav_bar(
        f,
        layout_info.nav_area,
        model.navigation.route,
        model.navigation.user.as_deref(),
    );

    if !model.is_logged_in() {
        login::render_login(f, layout_info.content_area, &model.login);
    } else {
        match model.navigation.route {
            Route::Dashboard => {
                dashboard::render_dashboard(f, layout_info.content_area, &model.navigation)
            }
            Route::DataBrowser => {
                data_table::render_data_browser(f, layout_info.content_area, &model.screens.browser)
            }
            Route::Add(entity) => entity_screens::render_create_screen(
                f,
                layout_info.content_area,
                model.screens.create.get(entity),
            ),
            Route::Modify(entity) => entity_screens::render_modify_screen(
                f,
                layout_info.content_area,
                model.screens.modify.get(entity),
            ),
            Route::Delete(entity) => entity_screens::render_delete_screen(
                f,
                layout_info.content_area,
                model.screens.delete.get(entity),
            ),
        }
    }

    legend::render_legend(f, layout_info.legend_area, legend_context);

    status_bar::render_status_bar(
        f,
        layout_info.status_area,
        model,
        &app.backend_label,
        app.debug_log.as_deref(),
    );

    // Dialogs draw over everything else
    if model.is_logged_in() {
        match model.navigation.route {
            Route::Delete(entity) => {
                let screen = model.screens.delete.get(entity);
                if let (true, Some(id)) = (screen.confirming, screen.loaded_id.as_deref()) {
                    dialogs::render_delete_confirmation(f, entity, id);
                }
            }
            Route::DataBrowser => {
                if let Some(detail) = &model.screens.browser.detail {
                    dialogs::render_detail_popup(f, detail);
                }
            }
            _ => {}
        }
    }

    // Toast last so it is never hidden
    if let Some((alert, _)) = &model.ui.toast_message {
        toast::render_toast(f, size, alert);
    }
}
