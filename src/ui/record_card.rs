use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use admintui::api::Record;
use admintui::logic::formatting::{format_discount, format_price, format_schedule};

/// Label/value rows describing a fetched record
fn record_rows(record: &Record) -> Vec<(&'static str, String)> {
    let id = |id: &Option<String>| id.clone().unwrap_or_else(|| "-".to_string());
    let image = record.image_url().unwrap_or("-").to_string();

    match record {
        Record::Banner(banner) => vec![
            ("ID", id(&banner.id)),
            ("Title", banner.title.clone()),
            ("Title Detail", banner.title_detail.clone()),
            ("Redirect URL", banner.url_to_direct.clone()),
            ("Image", image),
        ],
        Record::Course(course) => vec![
            ("ID", id(&course.id)),
            ("Name", course.name.clone()),
            ("Description", course.description.clone()),
            ("Price", format_price(course.price)),
            ("Discount", format_discount(course.discount_percentage)),
            ("Tags", course.tags.join(", ")),
            ("Image", image),
        ],
        Record::Test(test) => vec![
            ("ID", id(&test.id)),
            ("Title", test.title.clone()),
            ("Type", test.test_type.clone()),
            ("Language", test.language.clone()),
            ("Price", format_price(test.price)),
            ("Discount", format_discount(test.discount_percentage)),
            (
                "Duration",
                test.duration_in_minutes
                    .map(|m| format!("{} min", m))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ("Starts", format_schedule(test.scheduled_start.as_deref())),
            ("Ends", format_schedule(test.scheduled_end.as_deref())),
            (
                "Course ID",
                test.course
                    .as_ref()
                    .and_then(|c| c.id.clone())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ],
    }
}

/// Render the summary card of a record found by ID
pub fn render_record_card(f: &mut Frame, area: Rect, title: &str, record: &Record) {
    let lines: Vec<Line> = record_rows(record)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<14}", format!("{}:", label)), Style::default().fg(Color::Yellow)),
                Span::raw(value),
            ])
        })
        .collect();

    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: false });

    f.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use admintui::Entity;
    use serde_json::json;

    #[test]
    fn test_course_card_formats_money() {
        let record = Record::from_value(
            Entity::Course,
            json!({"id": 7, "name": "Rust", "price": 499, "discountPercentage": 10, "tags": ["a", "b"]}),
        )
        .unwrap();

        let rows = record_rows(&record);
        assert_eq!(rows[0], ("ID", "7".to_string()));
        assert!(rows.contains(&("Tags", "a, b".to_string())));
        let price = rows.iter().find(|(label, _)| *label == "Price").unwrap();
        assert_eq!(price.1, format_price(Some(499.0)));
    }

    #[test]
    fn test_test_card_shows_linked_course() {
        let record = Record::from_value(
            Entity::Test,
            json!({"id": "t1", "title": "Mock", "course": {"id": 3}, "durationInMinutes": 90}),
        )
        .unwrap();

        let rows = record_rows(&record);
        assert!(rows.contains(&("Course ID", "3".to_string())));
        assert!(rows.contains(&("Duration", "90 min".to_string())));
        assert!(rows.contains(&("Starts", "-".to_string())));
    }
}
