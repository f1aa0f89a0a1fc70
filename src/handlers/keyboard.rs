//! Keyboard Input Handler
//!
//! Handles all keyboard input and user interactions. Keys reach, in order:
//! global shortcuts, the login gate, an open dialog, then the current screen.

use chrono::NaiveDateTime;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use admintui::config::EndpointGroup;
use admintui::log_debug;
use admintui::model::{Form, Pane, Route};
use admintui::services::ApiRequest;
use admintui::Entity;

use crate::App;

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Editing keys shared by every form; returns whether the key was used
fn edit_form(form: &mut Form, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left => form.cycle_option(false),
        KeyCode::Right => form.cycle_option(true),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => form.input_char(c),
        _ => return false,
    }
    true
}

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        app.model.ui.should_quit = true;
        return;
    }

    if !app.model.is_logged_in() {
        handle_login_key(app, key);
        return;
    }

    if app.model.has_modal() {
        handle_modal_key(app, key);
        return;
    }

    if ctrl && key.code == KeyCode::Char('l') {
        log_debug("DEBUG [Keyboard]: Logout");
        app.model.logout();
        return;
    }

    if key.code == KeyCode::Esc {
        app.model.navigate(Route::Dashboard);
        return;
    }

    match app.model.navigation.route {
        Route::Dashboard => handle_dashboard_key(app, key),
        Route::DataBrowser => handle_browser_key(app, key),
        Route::Add(entity) => handle_create_key(app, entity, key),
        Route::Modify(entity) => handle_modify_key(app, entity, key),
        Route::Delete(entity) => handle_delete_key(app, entity, key),
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    // Waiting out the success toast
    if app.model.login.pending.is_some() {
        return;
    }

    if key.code == KeyCode::Enter {
        let accepted = app.model.attempt_login(&app.config.credentials);
        log_debug(&format!("DEBUG [Login]: accepted={}", accepted));
        return;
    }

    edit_form(&mut app.model.login.form, &key);
}

fn handle_modal_key(app: &mut App, key: KeyEvent) {
    match app.model.navigation.route {
        Route::Delete(entity) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Some(id) = app.model.screens.delete.get_mut(entity).confirm_delete() {
                    app.send_request(ApiRequest::Delete { entity, id });
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.model.close_modal();
            }
            _ => {}
        },
        _ => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')
            ) {
                app.model.close_modal();
            }
        }
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => app.model.navigation.select_prev(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => app.model.navigation.select_next(),
        KeyCode::Enter => {
            if let Some(route) = app.model.navigation.selected_route() {
                app.model.navigate(route);
            }
        }
        KeyCode::Char('q') => app.model.ui.should_quit = true,
        _ => {}
    }
}

fn handle_create_key(app: &mut App, entity: Entity, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let screen = app.model.screens.create.get_mut(entity);

    let submit = match key.code {
        KeyCode::Enter if screen.form.on_submit() => true,
        KeyCode::Enter => {
            screen.form.focus_next();
            false
        }
        KeyCode::Char('s') if ctrl => true,
        _ => {
            edit_form(&mut screen.form, &key);
            false
        }
    };

    if !submit {
        return;
    }

    match screen.submit(now()) {
        Some(submission) => {
            let Some(image) = submission.image else {
                app.model.screens.create.get_mut(entity).busy = false;
                return;
            };
            app.send_request(ApiRequest::Create {
                draft: submission.draft,
                image,
            });
        }
        None => log_debug(&format!(
            "DEBUG [Add {}]: Rejected: {:?}",
            entity.as_str(),
            screen.alert
        )),
    }
}

fn handle_modify_key(app: &mut App, entity: Entity, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let screen = app.model.screens.modify.get_mut(entity);

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            screen.focus_next();
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            screen.focus_prev();
            return;
        }
        _ => {}
    }

    let in_editor = screen.pane == Pane::Editor && screen.editor.is_some();
    let wants_submit = (key.code == KeyCode::Enter && (!in_editor || screen.active_form().on_submit()))
        || (ctrl && key.code == KeyCode::Char('s'));

    if !wants_submit {
        if key.code == KeyCode::Enter {
            screen.focus_next();
        } else {
            edit_form(screen.active_form_mut(), &key);
        }
        return;
    }

    if in_editor || (ctrl && screen.editor.is_some()) {
        match screen.submit(now()) {
            Some((id, submission)) => app.send_request(ApiRequest::Update {
                id,
                draft: submission.draft,
                image: submission.image,
            }),
            None => log_debug(&format!(
                "DEBUG [Modify {}]: Rejected: {:?}",
                entity.as_str(),
                screen.alert
            )),
        }
    } else if let Some(id) = screen.begin_lookup() {
        app.send_request(ApiRequest::Fetch {
            entity,
            group: EndpointGroup::Modify,
            id,
        });
    }
}

fn handle_delete_key(app: &mut App, entity: Entity, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let screen = app.model.screens.delete.get_mut(entity);

    match key.code {
        KeyCode::Enter => {
            if let Some(id) = screen.begin_lookup() {
                app.send_request(ApiRequest::Fetch {
                    entity,
                    group: EndpointGroup::Delete,
                    id,
                });
            }
        }
        KeyCode::Char('d') if ctrl => {
            screen.request_delete();
        }
        KeyCode::Char('u') if ctrl => screen.clear(),
        _ => {
            edit_form(&mut screen.lookup, &key);
        }
    }
}

fn handle_browser_key(app: &mut App, key: KeyEvent) {
    let browser = &mut app.model.screens.browser;

    let request = match key.code {
        KeyCode::Left => {
            browser.cycle_entity(false);
            None
        }
        KeyCode::Right => {
            browser.cycle_entity(true);
            None
        }
        KeyCode::Char('f') | KeyCode::F(5) => browser.begin_fetch(),
        KeyCode::Up | KeyCode::Char('k') => {
            browser.select_prev();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            browser.select_next();
            None
        }
        KeyCode::Enter => {
            browser.open_detail();
            None
        }
        KeyCode::Char('[') => refetch_if(browser.step_page(false), browser),
        KeyCode::Char(']') => refetch_if(browser.step_page(true), browser),
        KeyCode::Home => refetch_if(browser.first_page(), browser),
        KeyCode::End => refetch_if(browser.last_page(), browser),
        KeyCode::Char('+') => refetch_if(browser.cycle_page_size(true), browser),
        KeyCode::Char('-') => refetch_if(browser.cycle_page_size(false), browser),
        KeyCode::Char('q') => {
            app.model.ui.should_quit = true;
            None
        }
        _ => None,
    };

    if let Some((entity, page)) = request {
        app.send_request(ApiRequest::List { entity, page });
    }
}

fn refetch_if(
    changed: bool,
    browser: &mut admintui::model::BrowserScreen,
) -> Option<(Entity, Option<(u32, u32)>)> {
    if changed {
        browser.begin_refresh()
    } else {
        None
    }
}
