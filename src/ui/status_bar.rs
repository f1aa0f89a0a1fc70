use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use admintui::model::Model;

/// Label/value pairs shown in the status bar
fn status_parts(model: &Model, base_url: &str, debug_log: Option<&str>) -> Vec<String> {
    let mut parts = vec![format!("Backend: {}", base_url)];

    if model.is_logged_in() {
        parts.push(format!("Screen: {}", model.navigation.route.title()));
    }

    if model.is_busy() {
        parts.push("Loading...".to_string());
    }

    if let Some(path) = debug_log {
        parts.push(format!("Debug log: {}", path));
    }

    parts
}

/// Render the bottom status bar
pub fn render_status_bar(f: &mut Frame, area: Rect, model: &Model, base_url: &str, debug_log: Option<&str>) {
    let mut spans = vec![];
    for (idx, part) in status_parts(model, base_url, debug_log).iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" | "));
        }
        // Color the label before the first colon
        match part.find(':') {
            Some(colon_pos) => {
                spans.push(Span::styled(
                    part[..=colon_pos].to_string(),
                    Style::default().fg(Color::Yellow),
                ));
                spans.push(Span::raw(part[colon_pos + 1..].to_string()));
            }
            None => spans.push(Span::styled(part.clone(), Style::default().fg(Color::Cyan))),
        }
    }

    let status_bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use admintui::model::Route;

    #[test]
    fn test_signed_out_shows_only_backend() {
        let model = Model::new(10);
        let parts = status_parts(&model, "http://localhost:8080", None);
        assert_eq!(parts, vec!["Backend: http://localhost:8080".to_string()]);
    }

    #[test]
    fn test_busy_screen_shows_loading() {
        let mut model = Model::new(10);
        model.navigation.user = Some("admin".to_string());
        model.navigate(Route::DataBrowser);
        model.screens.browser.busy = true;

        let parts = status_parts(&model, "http://x", Some("/tmp/log"));
        assert!(parts.contains(&"Screen: Data Browser".to_string()));
        assert!(parts.contains(&"Loading...".to_string()));
        assert!(parts.contains(&"Debug log: /tmp/log".to_string()));
    }
}
