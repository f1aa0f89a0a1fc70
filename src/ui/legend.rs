use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use admintui::model::{Model, Pane, Route};

/// Which set of keys the legend describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendContext {
    Login,
    Dashboard,
    AddForm,
    Modify { editing: bool },
    Delete { has_record: bool },
    Browser { paginated: bool },
    Dialog,
}

impl LegendContext {
    pub fn from_model(model: &Model) -> Self {
        if !model.is_logged_in() {
            return LegendContext::Login;
        }
        if model.has_modal() {
            return LegendContext::Dialog;
        }
        match model.navigation.route {
            Route::Dashboard => LegendContext::Dashboard,
            Route::DataBrowser => LegendContext::Browser {
                paginated: model.screens.browser.is_paginated(),
            },
            Route::Add(_) => LegendContext::AddForm,
            Route::Modify(entity) => {
                let screen = model.screens.modify.get(entity);
                LegendContext::Modify {
                    editing: screen.pane == Pane::Editor && screen.editor.is_some(),
                }
            }
            Route::Delete(entity) => LegendContext::Delete {
                has_record: model.screens.delete.get(entity).record.is_some(),
            },
        }
    }
}

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().fg(Color::Yellow))
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(context: LegendContext) -> Vec<Span<'static>> {
    let mut hotkey_spans = vec![];

    match context {
        LegendContext::Login => {
            hotkey_spans.extend(vec![
                key("Tab/↓"),
                Span::raw(":Next field  "),
                key("Enter"),
                Span::raw(":Login  "),
            ]);
        }
        LegendContext::Dialog => {
            hotkey_spans.extend(vec![
                key("y/Enter"),
                Span::raw(":Confirm  "),
                key("n/Esc"),
                Span::raw(":Close  "),
            ]);
        }
        LegendContext::Dashboard => {
            hotkey_spans.extend(vec![
                key("↑/↓"),
                Span::raw(":Nav  "),
                key("Enter"),
                Span::raw(":Open  "),
                key("^L"),
                Span::raw(":Logout  "),
                key("q"),
                Span::raw(":Quit  "),
            ]);
        }
        LegendContext::AddForm | LegendContext::Modify { .. } => {
            hotkey_spans.extend(vec![
                key("Tab/↓"),
                Span::raw(":Next  "),
                key("⇧Tab/↑"),
                Span::raw(":Prev  "),
                key("←/→"),
                Span::raw(":Choose option  "),
            ]);
            let submit = match context {
                LegendContext::Modify { editing: false } => ":Fetch  ",
                LegendContext::Modify { editing: true } => ":Next/Update  ",
                _ => ":Next/Submit  ",
            };
            hotkey_spans.extend(vec![
                key("Enter"),
                Span::raw(submit),
                key("^S"),
                Span::raw(":Submit  "),
            ]);
        }
        LegendContext::Delete { has_record } => {
            hotkey_spans.extend(vec![key("Enter"), Span::raw(":Check ID  ")]);
            if has_record {
                hotkey_spans.extend(vec![key("^D"), Span::raw(":Delete  ")]);
            }
            hotkey_spans.extend(vec![key("^U"), Span::raw(":Clear  ")]);
        }
        LegendContext::Browser { paginated } => {
            hotkey_spans.extend(vec![
                key("←/→"),
                Span::raw(":Data type  "),
                key("f"),
                Span::raw(":Fetch  "),
                key("↑/↓"),
                Span::raw(":Row  "),
                key("Enter"),
                Span::raw(":Details  "),
            ]);
            if paginated {
                hotkey_spans.extend(vec![
                    key("[/]"),
                    Span::raw(":Prev/Next page  "),
                    key("Home/End"),
                    Span::raw(":First/Last  "),
                    key("+/-"),
                    Span::raw(":Page size  "),
                ]);
            }
        }
    }

    if !matches!(context, LegendContext::Login | LegendContext::Dialog | LegendContext::Dashboard) {
        hotkey_spans.extend(vec![
            key("Esc"),
            Span::raw(":Dashboard  "),
            key("^L"),
            Span::raw(":Logout  "),
        ]);
    }

    // Quit - always available
    hotkey_spans.extend(vec![key("^C"), Span::raw(":Quit")]);

    hotkey_spans
}

/// Build the legend paragraph (reusable for both rendering and height calculation)
pub fn build_legend_paragraph(context: LegendContext) -> Paragraph<'static> {
    let hotkey_line = Line::from(build_hotkey_spans(context));

    Paragraph::new(vec![hotkey_line])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

pub fn render_legend(f: &mut Frame, area: Rect, context: LegendContext) {
    f.render_widget(build_legend_paragraph(context), area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(terminal_width: u16, context: LegendContext) -> u16 {
    // Count lines without the block; line_count() does not account for borders
    let paragraph_for_counting = Paragraph::new(vec![Line::from(build_hotkey_spans(context))])
        .wrap(ratatui::widgets::Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    // Add top + bottom borders, ensure minimum of 3
    (line_count as u16).saturating_add(2).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_to_text(spans: &[Span]) -> String {
        spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect::<Vec<_>>()
            .join("")
    }

    #[test]
    fn test_delete_legend_offers_delete_only_with_record() {
        let without = spans_to_text(&build_hotkey_spans(LegendContext::Delete { has_record: false }));
        assert!(!without.contains("^D"));

        let with = spans_to_text(&build_hotkey_spans(LegendContext::Delete { has_record: true }));
        assert!(with.contains("^D:Delete"));
        assert!(with.contains("^U:Clear"));
    }

    #[test]
    fn test_browser_pager_keys_only_when_paginated() {
        let plain = spans_to_text(&build_hotkey_spans(LegendContext::Browser { paginated: false }));
        assert!(!plain.contains("Page size"));

        let paged = spans_to_text(&build_hotkey_spans(LegendContext::Browser { paginated: true }));
        assert!(paged.contains("Page size"));
    }

    #[test]
    fn test_login_legend_has_no_logout() {
        let text = spans_to_text(&build_hotkey_spans(LegendContext::Login));
        assert!(text.contains("Enter:Login"));
        assert!(!text.contains("Logout"));
    }

    #[test]
    fn test_legend_height_has_room_for_borders() {
        assert!(calculate_legend_height(200, LegendContext::Dashboard) >= 3);
        assert!(
            calculate_legend_height(30, LegendContext::Browser { paginated: true })
                > calculate_legend_height(200, LegendContext::Browser { paginated: true })
        );
    }
}
