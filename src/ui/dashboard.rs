use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use admintui::model::{NavigationModel, Route};

/// Render the dashboard menu of admin screens
pub fn render_dashboard(f: &mut Frame, area: Rect, navigation: &NavigationModel) {
    let [welcome_area, menu_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);

    let user = navigation.user.as_deref().unwrap_or("admin");
    let welcome = Paragraph::new(Line::from(vec![
        Span::raw("Welcome, "),
        Span::styled(user.to_string(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(". Choose what to manage."),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Dashboard"));
    f.render_widget(welcome, welcome_area);

    let items: Vec<ListItem> = Route::menu()
        .iter()
        .map(|route| ListItem::new(route.title()))
        .collect();

    let menu = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Menu"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(navigation.menu_selection);
    f.render_stateful_widget(menu, menu_area, &mut state);
}
