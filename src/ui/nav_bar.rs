use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use admintui::model::Route;

const BRAND: &str = "Mytestrank Admin";

/// Render the navigation bar at the top of the screen
pub fn render_nav_bar(f: &mut Frame, area: Rect, route: Route, user: Option<&str>) {
    let mut spans = vec![Span::styled(
        BRAND,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    match user {
        Some(name) => {
            spans.push(Span::raw(" | "));
            spans.push(Span::raw(route.title()));
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("User:", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(format!(" {}", name)));
        }
        None => {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("Signed out", Style::default().fg(Color::DarkGray)));
        }
    }

    let nav_widget = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Navigation"))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(nav_widget, area);
}
