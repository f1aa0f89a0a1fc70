//! API Response Handler
//!
//! Handles responses from the background API service and hands each one to
//! the screen that issued the request.

use admintui::config::EndpointGroup;
use admintui::log_debug;
use admintui::services::{ApiResponse, SessionResponse};

use crate::App;

/// Handle API response from background service
///
/// Response types:
/// - CreateResult: Add screen submission
/// - FetchResult: ID lookup for a modify or delete screen
/// - UpdateResult: Modify screen submission
/// - DeleteResult: Confirmed deletion
/// - ListResult: Data browser listing
pub fn handle_api_response(app: &mut App, reply: SessionResponse) {
    // Screens were discarded on logout; late replies have nowhere to go
    if !app.model.is_current_session(reply.session) {
        log_debug(&format!(
            "DEBUG [API Response]: Dropping reply from session {} (current {}, logged in: {})",
            reply.session,
            app.model.session,
            app.model.is_logged_in()
        ));
        return;
    }

    match reply.response {
        ApiResponse::CreateResult { entity, result } => {
            let screen = app.model.screens.create.get_mut(entity);
            screen.apply_result(&result);
            log_debug(&format!(
                "DEBUG [CreateResult]: entity={} alert={:?}",
                entity.as_str(),
                screen.alert
            ));
        }

        ApiResponse::FetchResult {
            entity,
            group,
            id,
            record,
        } => match group {
            EndpointGroup::Delete => {
                app.model.screens.delete.get_mut(entity).apply_lookup(&id, record);
            }
            _ => {
                app.model.screens.modify.get_mut(entity).apply_lookup(&id, record);
            }
        },

        ApiResponse::UpdateResult { entity, id, result } => {
            let screen = app.model.screens.modify.get_mut(entity);
            screen.apply_update(&id, &result);
            log_debug(&format!(
                "DEBUG [UpdateResult]: entity={} id={} alert={:?}",
                entity.as_str(),
                id,
                screen.alert
            ));
        }

        ApiResponse::DeleteResult { entity, id, result } => {
            let screen = app.model.screens.delete.get_mut(entity);
            screen.apply_delete(&id, &result);
            log_debug(&format!(
                "DEBUG [DeleteResult]: entity={} id={} alert={:?}",
                entity.as_str(),
                id,
                screen.alert
            ));
        }

        ApiResponse::ListResult { entity, listing } => {
            app.model.screens.browser.apply_listing(entity, listing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admintui::config::Config;
    use admintui::model::form::keys;
    use admintui::model::Model;
    use admintui::Entity;
    use tokio::sync::mpsc;

    fn app() -> App {
        let (api_tx, _requests) = mpsc::unbounded_channel();
        let (_replies, api_rx) = mpsc::unbounded_channel();
        let mut model = Model::new(10);
        model.navigation.user = Some("admin".to_string());
        App {
            model,
            config: Config::default(),
            backend_label: String::new(),
            debug_log: None,
            api_tx,
            api_rx,
        }
    }

    fn created(session: u64) -> SessionResponse {
        SessionResponse {
            session,
            response: ApiResponse::CreateResult {
                entity: Entity::Course,
                result: Ok(200),
            },
        }
    }

    #[test]
    fn test_reply_from_before_relogin_is_ignored() {
        let mut app = app();
        let old_session = app.model.session;
        app.model.screens.create.get_mut(Entity::Course).busy = true;

        app.model.logout();
        app.model.navigation.user = Some("admin".to_string());
        let screen = app.model.screens.create.get_mut(Entity::Course);
        screen.form.set_value(keys::NAME, "New draft");
        screen.busy = true;

        handle_api_response(&mut app, created(old_session));

        let screen = app.model.screens.create.get(Entity::Course);
        assert_eq!(screen.form.value(keys::NAME), "New draft");
        assert!(screen.alert.is_none());
        assert!(screen.busy);
    }

    #[test]
    fn test_reply_from_current_session_is_applied() {
        let mut app = app();
        let session = app.model.session;
        let screen = app.model.screens.create.get_mut(Entity::Course);
        screen.form.set_value(keys::NAME, "Rust");
        screen.busy = true;

        handle_api_response(&mut app, created(session));

        let screen = app.model.screens.create.get(Entity::Course);
        assert!(!screen.busy);
        assert_eq!(screen.form.value(keys::NAME), "");
        assert_eq!(
            screen.alert.as_ref().map(|a| a.text.as_str()),
            Some("Course added successfully!")
        );
    }

    #[test]
    fn test_reply_while_logged_out_is_ignored() {
        let mut app = app();
        let session = app.model.session;
        app.model.navigation.user = None;

        handle_api_response(&mut app, created(session));

        assert!(app.model.screens.create.get(Entity::Course).alert.is_none());
    }
}
