//! Add, modify and delete screens for a single entity

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use admintui::model::{CreateScreen, DeleteScreen, ModifyScreen, Pane};

use super::form::{form_height, render_alert, render_form, split_alert};
use super::record_card::render_record_card;

fn busy_title(base: String, busy: bool) -> String {
    if busy {
        format!("{} (working...)", base)
    } else {
        base
    }
}

pub fn render_create_screen(f: &mut Frame, area: Rect, screen: &CreateScreen) {
    let (alert_area, rest) = split_alert(area, screen.alert.as_ref());
    if let (Some(alert_area), Some(alert)) = (alert_area, screen.alert.as_ref()) {
        render_alert(f, alert_area, alert);
    }

    let title = busy_title(format!("Add {}", screen.entity.as_str()), screen.busy);
    render_form(f, rest, &title, &screen.form, !screen.busy);
}

pub fn render_modify_screen(f: &mut Frame, area: Rect, screen: &ModifyScreen) {
    let (alert_area, rest) = split_alert(area, screen.alert.as_ref());
    if let (Some(alert_area), Some(alert)) = (alert_area, screen.alert.as_ref()) {
        render_alert(f, alert_area, alert);
    }

    let [lookup_area, editor_area] = Layout::vertical([
        Constraint::Length(form_height(&screen.lookup)),
        Constraint::Min(3),
    ])
    .areas(rest);

    let lookup_title = busy_title(format!("Find {}", screen.entity.as_str()), screen.busy);
    render_form(
        f,
        lookup_area,
        &lookup_title,
        &screen.lookup,
        screen.pane == Pane::Lookup && !screen.busy,
    );

    match (&screen.editor, &screen.loaded_id) {
        (Some(editor), Some(id)) => {
            let mut title = format!("Modify {} {}", screen.entity.as_str(), id);
            if let Some(url) = screen.record.as_ref().and_then(|r| r.image_url()) {
                title.push_str(&format!(" | current image: {}", url));
            }
            render_form(
                f,
                editor_area,
                &title,
                editor,
                screen.pane == Pane::Editor && !screen.busy,
            );
        }
        _ => {
            let hint = format!(
                "Enter a {} ID and press Enter to load it for editing.",
                screen.entity.as_str().to_lowercase()
            );
            f.render_widget(
                Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
                editor_area,
            );
        }
    }
}

pub fn render_delete_screen(f: &mut Frame, area: Rect, screen: &DeleteScreen) {
    let (alert_area, rest) = split_alert(area, screen.alert.as_ref());
    if let (Some(alert_area), Some(alert)) = (alert_area, screen.alert.as_ref()) {
        render_alert(f, alert_area, alert);
    }

    let [lookup_area, record_area] = Layout::vertical([
        Constraint::Length(form_height(&screen.lookup)),
        Constraint::Min(3),
    ])
    .areas(rest);

    let lookup_title = busy_title(format!("Delete {}", screen.entity.as_str()), screen.busy);
    render_form(f, lookup_area, &lookup_title, &screen.lookup, !screen.busy);

    match &screen.record {
        Some(record) => {
            let title = format!("{} found (Ctrl+D to delete)", screen.entity.as_str());
            render_record_card(f, record_area, &title, record);
        }
        None => {
            f.render_widget(
                Paragraph::new("Check an ID to see the record before deleting it.")
                    .style(Style::default().fg(Color::DarkGray)),
                record_area,
            );
        }
    }
}
