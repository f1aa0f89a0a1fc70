use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use admintui::logic::formatting::truncate;
use admintui::logic::pagination;
use admintui::logic::records::{columns, row_cells};
use admintui::model::BrowserScreen;
use admintui::Entity;

use super::form::{render_alert, split_alert};

const CELL_MAX: usize = 40;

/// Selector line: every listing with the chosen one highlighted
fn selector_spans(browser: &BrowserScreen) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled("Data: ", Style::default().fg(Color::Yellow))];
    for entity in Entity::ALL {
        let label = format!(" {} ", entity.listing_label());
        if browser.entity == Some(entity) {
            spans.push(Span::styled(
                label,
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(Color::Gray)));
        }
        spans.push(Span::raw(" "));
    }
    if browser.entity.is_none() {
        spans.push(Span::styled("(choose with ←/→)", Style::default().fg(Color::DarkGray)));
    }
    spans
}

/// Pager line for the paginated listing; empty when there is a single page
fn pager_spans(browser: &BrowserScreen) -> Vec<Span<'static>> {
    let Some(listing) = browser.listing.as_ref() else {
        return vec![];
    };
    if !browser.is_paginated() {
        return vec![];
    }

    let total = listing.total_pages;
    let mut spans = vec![];

    if pagination::has_pager(total) {
        let enabled = |on: bool| {
            if on {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        };
        let back = pagination::can_go_back(browser.page);
        let forward = pagination::can_go_forward(browser.page, total);

        spans.push(Span::styled("« First ", enabled(back)));
        spans.push(Span::styled("‹ Prev ", enabled(back)));
        for page in pagination::page_window(browser.page, total) {
            if page == browser.page {
                spans.push(Span::styled(
                    format!("[{}]", page),
                    Style::default().fg(Color::Black).bg(Color::Yellow),
                ));
            } else {
                spans.push(Span::raw(format!(" {} ", page)));
            }
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("Next › ", enabled(forward)));
        spans.push(Span::styled("Last »  ", enabled(forward)));
    }

    spans.push(Span::raw(pagination::summary(
        browser.page,
        total,
        listing.total_elements,
    )));
    spans.push(Span::styled(
        format!("  Size: {}", browser.page_size),
        Style::default().fg(Color::Cyan),
    ));
    spans
}

fn column_widths(entity: Entity) -> Vec<Constraint> {
    columns(entity)
        .iter()
        .enumerate()
        .map(|(idx, _)| if idx == 0 { Constraint::Length(10) } else { Constraint::Fill(1) })
        .collect()
}

/// Render the data browser screen
pub fn render_data_browser(f: &mut Frame, area: Rect, browser: &BrowserScreen) {
    let block = Block::default().borders(Borders::ALL).title("Data Browser");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (alert_area, rest) = split_alert(inner, browser.alert.as_ref());
    if let (Some(alert_area), Some(alert)) = (alert_area, browser.alert.as_ref()) {
        render_alert(f, alert_area, alert);
    }

    let [selector_area, table_area, pager_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(rest);

    f.render_widget(Paragraph::new(Line::from(selector_spans(browser))), selector_area);
    f.render_widget(Paragraph::new(Line::from(pager_spans(browser))), pager_area);

    if browser.busy {
        f.render_widget(
            Paragraph::new("Loading...").style(Style::default().fg(Color::Cyan)),
            table_area,
        );
        return;
    }

    let (Some(entity), Some(_)) = (browser.listed_entity, browser.listing.as_ref()) else {
        f.render_widget(
            Paragraph::new("Choose a data type and press f to fetch.")
                .style(Style::default().fg(Color::DarkGray)),
            table_area,
        );
        return;
    };

    let header = Row::new(
        columns(entity)
            .iter()
            .map(|title| Cell::from(*title).style(Style::default().fg(Color::Yellow))),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = browser
        .rows()
        .iter()
        .map(|row| Row::new(row_cells(entity, row).into_iter().map(|cell| truncate(&cell, CELL_MAX))))
        .collect();

    if rows.is_empty() {
        f.render_widget(
            Paragraph::new("No records found.").style(Style::default().fg(Color::DarkGray)),
            table_area,
        );
        return;
    }

    let table = Table::new(rows, column_widths(entity))
        .header(header)
        .block(Block::default().borders(Borders::TOP))
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(browser.selected);
    f.render_stateful_widget(table, table_area, &mut state);
}
