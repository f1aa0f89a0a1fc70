use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use admintui::logic::ui::mask;
use admintui::model::form::{FieldKind, FormField};
use admintui::model::{Alert, Form};

use super::toast::alert_style;

const LABEL_WIDTH: usize = 22;

fn field_value_span(field: &FormField, focused: bool) -> Span<'static> {
    if field.value.is_empty() {
        let placeholder = match field.kind {
            FieldKind::Select(_) => "Select an option",
            _ => field.placeholder,
        };
        return Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray));
    }

    let text = match field.kind {
        FieldKind::Secret => mask(&field.value),
        FieldKind::Select(_) if focused => format!("◀ {} ▶", field.value),
        _ => field.value.clone(),
    };
    Span::styled(text, Style::default().fg(Color::White))
}

/// One line per field plus the submit button
fn form_lines(form: &Form, active: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(form.fields.len() + 2);

    for (idx, field) in form.fields.iter().enumerate() {
        let focused = active && form.focus == idx;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<width$}", field.label, width = LABEL_WIDTH), label_style),
            field_value_span(field, focused),
        ];
        if focused && field.accepts_typing() {
            spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::raw(""));
    let on_submit = active && form.on_submit();
    let button_style = if on_submit {
        Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("[ {} ]", form.submit_label), button_style),
    ]));

    lines
}

/// Height a form needs inside its borders
pub fn form_height(form: &Form) -> u16 {
    form.fields.len() as u16 + 2 + 2
}

/// Render a single alert line in the alert's color
pub fn render_alert(f: &mut Frame, area: Rect, alert: &Alert) {
    let (icon, color) = alert_style(alert.kind);
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(alert.text.clone(), Style::default().fg(color)),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)))
    .wrap(Wrap { trim: false });

    f.render_widget(banner, area);
}

/// Render a titled form; `active` draws the focus marker
pub fn render_form(f: &mut Frame, area: Rect, title: &str, form: &Form, active: bool) {
    let border_color = if active { Color::Cyan } else { Color::DarkGray };
    let paragraph = Paragraph::new(form_lines(form, active)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(Style::default().fg(border_color)),
    );

    f.render_widget(paragraph, area);
}

/// Split off a three-row alert strip at the top when there is an alert
pub fn split_alert(area: Rect, alert: Option<&Alert>) -> (Option<Rect>, Rect) {
    match alert {
        Some(_) => {
            let [alert_area, rest] =
                Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
            (Some(alert_area), rest)
        }
        None => (None, area),
    }
}
