//! Operation outcomes
//!
//! Maps a finished backend call to the banner each screen shows. Only two
//! failure classes are told apart for the user: "not found" (HTTP 404) and
//! everything else.

use anyhow::{Error, Result};
use serde_json::Value;

use crate::api::Record;
use crate::config::EndpointGroup;
use crate::logic::errors::{
    format_error_message, format_status_line, is_not_found, is_transport_error, status_error,
};
use crate::logic::records::is_found;
use crate::model::types::Alert;
use crate::Entity;

fn lower(entity: Entity) -> String {
    entity.as_str().to_lowercase()
}

/// Statuses each create endpoint answers with on success
pub fn create_accepted(entity: Entity, status: u16) -> bool {
    match entity {
        Entity::Banner => status == 201,
        Entity::Course => status == 200,
        Entity::Test => status == 200 || status == 201,
    }
}

/// Readable text from a failed reply: a JSON `message`, the raw body, or the transport error
pub fn reply_message(error: &Error) -> String {
    if let Some(status_err) = status_error(error) {
        if let Ok(Value::Object(body)) = serde_json::from_str::<Value>(&status_err.body) {
            if let Some(Value::String(message)) = body.get("message") {
                return message.clone();
            }
        }
    }
    format_error_message(error)
}

pub fn not_found(entity: Entity, group: EndpointGroup, id: &str) -> Alert {
    match (entity, group) {
        (Entity::Banner, EndpointGroup::Delete) => {
            Alert::danger(format!("Banner not found for ID: {}", id))
        }
        _ => Alert::danger(format!("{} not found or invalid ID.", entity.as_str())),
    }
}

pub fn create_outcome(entity: Entity, result: &Result<u16>) -> Alert {
    match result {
        Ok(status) if create_accepted(entity, *status) => {
            Alert::success(format!("{} added successfully!", entity.as_str()))
        }
        Ok(_) => Alert::danger(format!("Failed to add {}.", lower(entity))),
        Err(e) => Alert::danger(format!("Error: {}", reply_message(e))),
    }
}

/// Result of an ID lookup: the record to show, or the banner explaining why not
pub fn lookup_outcome(
    entity: Entity,
    group: EndpointGroup,
    id: &str,
    result: Result<Option<Value>>,
) -> Result<(Record, Alert), Alert> {
    let value = match result {
        Ok(Some(value)) => value,
        Ok(None) => return Err(not_found(entity, group, id)),
        Err(e) => return Err(lookup_error(entity, group, id, &e)),
    };

    if !is_found(entity, group, &value) {
        return Err(not_found(entity, group, id));
    }

    let record = Record::from_value(entity, value)
        .map_err(|e| lookup_error(entity, group, id, &e))?;
    Ok((record, found(entity, group, id)))
}

fn found(entity: Entity, group: EndpointGroup, id: &str) -> Alert {
    match (entity, group) {
        (_, EndpointGroup::Modify) => Alert::success(format!(
            "{} found. You can now modify and confirm.",
            entity.as_str()
        )),
        (Entity::Banner, _) => Alert::success(format!("Banner found for ID: {}", id)),
        _ => Alert::success(format!("{} found.", entity.as_str())),
    }
}

fn lookup_error(entity: Entity, group: EndpointGroup, id: &str, error: &Error) -> Alert {
    if is_not_found(error) {
        return not_found(entity, group, id);
    }
    match (entity, group) {
        (_, EndpointGroup::Modify) => Alert::danger(format!("Error fetching {}.", lower(entity))),
        (Entity::Banner, _) => Alert::danger(format!(
            "Error while checking banner: {}",
            format_error_message(error)
        )),
        _ if status_error(error).is_some() => Alert::danger(format_status_line(error)),
        _ => Alert::danger("Network or unexpected error."),
    }
}

pub fn update_outcome(entity: Entity, id: &str, result: &Result<u16>) -> Alert {
    match result {
        Ok(200) => Alert::success(format!("{} updated successfully.", entity.as_str())),
        Ok(_) => Alert::danger(format!("Failed to update {}.", lower(entity))),
        Err(e) if is_not_found(e) => not_found(entity, EndpointGroup::Modify, id),
        Err(_) => Alert::danger(format!("Error updating {}.", lower(entity))),
    }
}

pub fn delete_outcome(entity: Entity, id: &str, result: &Result<u16>) -> Alert {
    match (entity, result) {
        (Entity::Banner, Ok(_)) => {
            Alert::success(format!("Banner deleted successfully for ID: {}", id))
        }
        (_, Ok(200)) => Alert::success(format!("{} deleted successfully.", entity.as_str())),
        (_, Ok(_)) => Alert::danger(format!("Failed to delete {}.", lower(entity))),
        (_, Err(e)) if is_not_found(e) => not_found(entity, EndpointGroup::Delete, id),
        (Entity::Banner, Err(e)) => Alert::danger(format!(
            "Failed to delete banner: {}",
            format_error_message(e)
        )),
        (_, Err(e)) if status_error(e).is_some() => Alert::danger(format_status_line(e)),
        (_, Err(_)) => Alert::danger(format!(
            "Failed to delete {} due to network or server issue.",
            lower(entity)
        )),
    }
}

pub fn listing_success(entity: Entity) -> Alert {
    Alert::success(format!(
        "Successfully fetched {} data!",
        entity.listing_label().to_lowercase()
    ))
}

pub fn listing_error(error: &Error) -> Alert {
    if let Some(status_err) = status_error(error) {
        return Alert::danger(format!(
            "Error {}: {}",
            status_err.status,
            reply_message(error)
        ));
    }
    if is_transport_error(error) {
        return Alert::danger("Network error: Unable to connect to the server.");
    }
    Alert::danger(format!("Error: {}", format_error_message(error)))
}
