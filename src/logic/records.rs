//! Record checks and listing columns
//!
//! Lookups come back as loose JSON. These functions decide whether a lookup
//! actually found something and pull display columns out of listing rows,
//! falling back across the alternate field names the backends use.

use serde_json::Value;

use crate::config::EndpointGroup;
use crate::Entity;

/// JavaScript-style truthiness for a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn field_is_truthy(value: &Value, key: &str) -> bool {
    value.get(key).map(is_truthy).unwrap_or(false)
}

/// Whether a lookup reply describes an existing record.
///
/// The banner delete check endpoint answers with an empty object for unknown
/// ids, so it is judged by its title fields; every other lookup by its `id`.
pub fn is_found(entity: Entity, group: EndpointGroup, value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    if object.is_empty() {
        return false;
    }
    match (entity, group) {
        (Entity::Banner, EndpointGroup::Delete) => {
            field_is_truthy(value, "title") && field_is_truthy(value, "title_detail")
        }
        _ => field_is_truthy(value, "id"),
    }
}

/// Render a scalar JSON value as plain text
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// First truthy field among `keys`, as text
pub fn first_text(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|v| is_truthy(v))
        .map(value_text)
}

fn text_or(value: &Value, keys: &[&str], fallback: &str) -> String {
    first_text(value, keys).unwrap_or_else(|| fallback.to_string())
}

/// Column headers for a listing table
pub fn columns(entity: Entity) -> &'static [&'static str] {
    match entity {
        Entity::Banner => &["ID", "Title", "Detail", "Redirect URL"],
        Entity::Course => &["ID", "Title", "Description", "Price", "Duration"],
        Entity::Test => &["ID", "Title", "Description", "Duration", "Questions", "Status"],
    }
}

/// Display cells for one listing row, matching `columns`
pub fn row_cells(entity: Entity, row: &Value) -> Vec<String> {
    let id = text_or(row, &["id"], "N/A");
    match entity {
        Entity::Banner => vec![
            id,
            text_or(row, &["title"], "Untitled Banner"),
            text_or(row, &["title_detail"], "No detail available"),
            text_or(row, &["urlToDirect"], "No URL"),
        ],
        Entity::Course => {
            let price = match first_text(row, &["price"]) {
                Some(price) => format!("${}", price),
                None => "Free".to_string(),
            };
            vec![
                id,
                text_or(row, &["title", "name"], "Untitled Course"),
                text_or(row, &["description", "desc"], "No description"),
                price,
                text_or(row, &["duration", "time"], "N/A"),
            ]
        }
        Entity::Test => vec![
            id,
            text_or(row, &["title", "name"], "Untitled Test"),
            text_or(row, &["description", "desc"], "No description"),
            text_or(row, &["duration", "time"], "N/A"),
            question_count(row).to_string(),
            if field_is_truthy(row, "active") {
                "Active".to_string()
            } else {
                "Inactive".to_string()
            },
        ],
    }
}

/// `questionCount`, else the length of `questions`, else 0
pub fn question_count(row: &Value) -> u64 {
    if let Some(count) = row.get("questionCount").and_then(Value::as_u64) {
        if count > 0 {
            return count;
        }
    }
    row.get("questions")
        .and_then(Value::as_array)
        .map(|q| q.len() as u64)
        .unwrap_or(0)
}

/// Pretty-printed JSON for the details popup
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_requires_id() {
        let group = EndpointGroup::Modify;
        assert!(is_found(Entity::Course, group, &json!({"id": 4, "name": "Rust"})));
        assert!(!is_found(Entity::Course, group, &json!({"name": "Rust"})));
        assert!(!is_found(Entity::Course, group, &json!({"id": 0})));
        assert!(!is_found(Entity::Course, group, &json!({"id": null})));
        assert!(!is_found(Entity::Test, group, &json!({})));
        assert!(!is_found(Entity::Test, group, &json!("not an object")));
    }

    #[test]
    fn test_banner_delete_check_uses_titles() {
        let group = EndpointGroup::Delete;
        assert!(is_found(
            Entity::Banner,
            group,
            &json!({"title": "Sale", "title_detail": "Big"})
        ));
        assert!(!is_found(Entity::Banner, group, &json!({"id": 1, "title": "Sale"})));
        assert!(!is_found(Entity::Banner, group, &json!({})));
    }

    #[test]
    fn test_course_row_fallbacks() {
        let cells = row_cells(Entity::Course, &json!({"id": 2, "name": "Algebra", "desc": "Basics"}));
        assert_eq!(cells, vec!["2", "Algebra", "Basics", "Free", "N/A"]);

        let cells = row_cells(
            Entity::Course,
            &json!({"id": 3, "title": "Geometry", "name": "ignored", "price": 250, "time": "3h"}),
        );
        assert_eq!(cells, vec!["3", "Geometry", "No description", "$250", "3h"]);
    }

    #[test]
    fn test_test_row_counts_and_status() {
        let cells = row_cells(
            Entity::Test,
            &json!({"id": 9, "title": "Mock", "questions": [1, 2, 3], "active": true}),
        );
        assert_eq!(cells[4], "3");
        assert_eq!(cells[5], "Active");

        let cells = row_cells(Entity::Test, &json!({"questionCount": 40}));
        assert_eq!(cells[0], "N/A");
        assert_eq!(cells[1], "Untitled Test");
        assert_eq!(cells[4], "40");
        assert_eq!(cells[5], "Inactive");
    }

    #[test]
    fn test_banner_row_defaults() {
        let cells = row_cells(Entity::Banner, &json!({"id": "b1"}));
        assert_eq!(cells, vec!["b1", "Untitled Banner", "No detail available", "No URL"]);
        assert_eq!(cells.len(), columns(Entity::Banner).len());
    }

    #[test]
    fn test_pretty_json_is_indented() {
        let text = pretty_json(&json!({"id": 1}));
        assert_eq!(text, "{\n  \"id\": 1\n}");
    }
}
