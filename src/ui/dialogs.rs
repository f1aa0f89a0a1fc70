use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use serde_json::Value;

use admintui::logic::records::pretty_json;
use admintui::Entity;

use super::layout::centered;

/// Render the delete confirmation dialog
pub fn render_delete_confirmation(f: &mut Frame, entity: Entity, id: &str) {
    let prompt_text = format!(
        "Delete {} {}?\n\n\
        WARNING: This action cannot be undone!\n\n\
        Continue? (y/n)",
        entity.as_str().to_lowercase(),
        id
    );

    let prompt_area = centered(f.area(), 50, 9);

    let prompt = Paragraph::new(prompt_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Delete")
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}

/// Render the full JSON of a listing row
pub fn render_detail_popup(f: &mut Frame, value: &Value) {
    let body = pretty_json(value);
    let area = f.area();
    let height = (body.lines().count() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered(area, area.width.saturating_sub(10).min(90), height.max(5));

    let popup = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Details (Esc to close)")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
}
