//! Screen Models
//!
//! State for each screen family. A screen holds its own form, the last
//! result banner and a `busy` flag; while `busy` is set the screen refuses
//! to start another request, so each screen has at most one call in flight.
//!
//! Screens never perform I/O. `submit`/`begin_*` methods validate and hand
//! back what should be sent; `apply_*` methods take the finished reply.

use anyhow::Result;
use chrono::NaiveDateTime;
use serde_json::Value;

use super::form::{keys, Form};
use super::types::Alert;
use crate::api::{Listing, Record};
use crate::config::EndpointGroup;
use crate::logic;
use crate::logic::validation::{validate, validate_id, Mode, Submission};
use crate::{Entity, PAGE_SIZES};

/// One value per entity
#[derive(Clone, Debug)]
pub struct EntityMap<T> {
    banner: T,
    course: T,
    test: T,
}

impl<T> EntityMap<T> {
    pub fn new(mut build: impl FnMut(Entity) -> T) -> Self {
        Self {
            banner: build(Entity::Banner),
            course: build(Entity::Course),
            test: build(Entity::Test),
        }
    }

    pub fn get(&self, entity: Entity) -> &T {
        match entity {
            Entity::Banner => &self.banner,
            Entity::Course => &self.course,
            Entity::Test => &self.test,
        }
    }

    pub fn get_mut(&mut self, entity: Entity) -> &mut T {
        match entity {
            Entity::Banner => &mut self.banner,
            Entity::Course => &mut self.course,
            Entity::Test => &mut self.test,
        }
    }
}

// ============================================
// ADD
// ============================================

#[derive(Clone, Debug)]
pub struct CreateScreen {
    pub entity: Entity,
    pub form: Form,
    pub alert: Option<Alert>,
    pub busy: bool,
}

impl CreateScreen {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            form: Form::for_entity(entity, true),
            alert: None,
            busy: false,
        }
    }

    /// Validate the form; on success the screen is marked busy
    pub fn submit(&mut self, now: NaiveDateTime) -> Option<Submission> {
        if self.busy {
            return None;
        }
        match validate(self.entity, Mode::Create, &self.form, now) {
            Ok(submission) => {
                self.busy = true;
                self.alert = None;
                Some(submission)
            }
            Err(e) => {
                self.alert = Some(Alert::danger(e.to_string()));
                None
            }
        }
    }

    pub fn apply_result(&mut self, result: &Result<u16>) {
        self.busy = false;
        let alert = logic::outcome::create_outcome(self.entity, result);
        if alert.is_success() {
            self.form.clear();
        }
        self.alert = Some(alert);
    }
}

// ============================================
// MODIFY
// ============================================

/// Which form of a lookup screen has keyboard focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    Lookup,
    Editor,
}

#[derive(Clone, Debug)]
pub struct ModifyScreen {
    pub entity: Entity,
    pub lookup: Form,
    /// Edit form, present once a record has been fetched
    pub editor: Option<Form>,
    pub record: Option<Record>,
    /// ID the editor was filled from; updates go to this ID
    pub loaded_id: Option<String>,
    pub pane: Pane,
    pub alert: Option<Alert>,
    pub busy: bool,
}

impl ModifyScreen {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            lookup: Form::lookup(entity, EndpointGroup::Modify),
            editor: None,
            record: None,
            loaded_id: None,
            pane: Pane::Lookup,
            alert: None,
            busy: false,
        }
    }

    pub fn active_form(&self) -> &Form {
        match (self.pane, &self.editor) {
            (Pane::Editor, Some(editor)) => editor,
            _ => &self.lookup,
        }
    }

    pub fn active_form_mut(&mut self) -> &mut Form {
        match (self.pane, &mut self.editor) {
            (Pane::Editor, Some(editor)) => editor,
            _ => &mut self.lookup,
        }
    }

    /// Tab order runs through the ID field, its button, then the edit form
    pub fn focus_next(&mut self) {
        match (self.pane, &mut self.editor) {
            (Pane::Lookup, Some(editor)) if self.lookup.on_submit() => {
                editor.focus = 0;
                self.pane = Pane::Editor;
            }
            (Pane::Editor, Some(editor)) if editor.on_submit() => {
                self.lookup.focus = 0;
                self.pane = Pane::Lookup;
            }
            (Pane::Editor, Some(editor)) => editor.focus_next(),
            _ => self.lookup.focus_next(),
        }
    }

    pub fn focus_prev(&mut self) {
        match (self.pane, &mut self.editor) {
            (Pane::Lookup, Some(editor)) if self.lookup.focus == 0 => {
                editor.focus = editor.fields.len();
                self.pane = Pane::Editor;
            }
            (Pane::Editor, Some(editor)) if editor.focus == 0 => {
                self.lookup.focus = self.lookup.fields.len();
                self.pane = Pane::Lookup;
            }
            (Pane::Editor, Some(editor)) => editor.focus_prev(),
            _ => self.lookup.focus_prev(),
        }
    }

    /// Start fetching the record named in the ID field
    pub fn begin_lookup(&mut self) -> Option<String> {
        if self.busy {
            return None;
        }
        match validate_id(self.entity, self.lookup.value(keys::ID)) {
            Ok(id) => {
                self.busy = true;
                self.alert = None;
                self.editor = None;
                self.record = None;
                self.loaded_id = None;
                self.pane = Pane::Lookup;
                Some(id)
            }
            Err(e) => {
                self.alert = Some(Alert::warning(e.to_string()));
                None
            }
        }
    }

    pub fn apply_lookup(&mut self, id: &str, result: Result<Option<Value>>) {
        self.busy = false;
        match logic::outcome::lookup_outcome(self.entity, EndpointGroup::Modify, id, result) {
            Ok((record, alert)) => {
                let mut editor = Form::for_entity(self.entity, false);
                editor.fill_from_record(&record);
                self.editor = Some(editor);
                self.record = Some(record);
                self.loaded_id = Some(id.to_string());
                self.pane = Pane::Editor;
                self.alert = Some(alert);
            }
            Err(alert) => self.alert = Some(alert),
        }
    }

    /// Validate the edit form; returns the target ID and the submission
    pub fn submit(&mut self, now: NaiveDateTime) -> Option<(String, Submission)> {
        if self.busy {
            return None;
        }
        let (Some(editor), Some(id)) = (&self.editor, &self.loaded_id) else {
            return None;
        };
        match validate(self.entity, Mode::Update, editor, now) {
            Ok(submission) => {
                let id = id.clone();
                self.busy = true;
                self.alert = None;
                Some((id, submission))
            }
            Err(e) => {
                self.alert = Some(Alert::danger(e.to_string()));
                None
            }
        }
    }

    pub fn apply_update(&mut self, id: &str, result: &Result<u16>) {
        self.busy = false;
        let alert = logic::outcome::update_outcome(self.entity, id, result);
        if alert.is_success() {
            self.reset();
        }
        self.alert = Some(alert);
    }

    /// Back to an empty ID field; the banner is left alone
    pub fn reset(&mut self) {
        self.lookup.clear();
        self.editor = None;
        self.record = None;
        self.loaded_id = None;
        self.pane = Pane::Lookup;
    }
}

// ============================================
// DELETE
// ============================================

#[derive(Clone, Debug)]
pub struct DeleteScreen {
    pub entity: Entity,
    pub lookup: Form,
    pub record: Option<Record>,
    pub loaded_id: Option<String>,
    /// Confirmation dialog is open
    pub confirming: bool,
    pub alert: Option<Alert>,
    pub busy: bool,
}

impl DeleteScreen {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            lookup: Form::lookup(entity, EndpointGroup::Delete),
            record: None,
            loaded_id: None,
            confirming: false,
            alert: None,
            busy: false,
        }
    }

    pub fn begin_lookup(&mut self) -> Option<String> {
        if self.busy {
            return None;
        }
        match validate_id(self.entity, self.lookup.value(keys::ID)) {
            Ok(id) => {
                self.busy = true;
                self.alert = None;
                self.record = None;
                self.loaded_id = None;
                self.confirming = false;
                Some(id)
            }
            Err(e) => {
                self.alert = Some(Alert::warning(e.to_string()));
                None
            }
        }
    }

    pub fn apply_lookup(&mut self, id: &str, result: Result<Option<Value>>) {
        self.busy = false;
        match logic::outcome::lookup_outcome(self.entity, EndpointGroup::Delete, id, result) {
            Ok((record, alert)) => {
                self.record = Some(record);
                self.loaded_id = Some(id.to_string());
                self.alert = Some(alert);
            }
            Err(alert) => {
                self.record = None;
                self.loaded_id = None;
                self.alert = Some(alert);
            }
        }
    }

    /// Open the confirmation step for the checked record
    pub fn request_delete(&mut self) -> bool {
        if self.busy || self.record.is_none() {
            return false;
        }
        self.confirming = true;
        true
    }

    pub fn cancel_delete(&mut self) {
        self.confirming = false;
    }

    /// Confirmed: returns the ID to delete
    pub fn confirm_delete(&mut self) -> Option<String> {
        if !self.confirming || self.busy {
            return None;
        }
        self.confirming = false;
        let id = self.loaded_id.clone()?;
        self.busy = true;
        Some(id)
    }

    pub fn apply_delete(&mut self, id: &str, result: &Result<u16>) {
        self.busy = false;
        let alert = logic::outcome::delete_outcome(self.entity, id, result);
        if alert.is_success() {
            self.reset();
        }
        self.alert = Some(alert);
    }

    fn reset(&mut self) {
        self.lookup.clear();
        self.record = None;
        self.loaded_id = None;
        self.confirming = false;
    }

    /// The "Clear" action: empty the screen including its banner
    pub fn clear(&mut self) {
        if self.busy {
            return;
        }
        self.reset();
        self.alert = None;
    }
}

// ============================================
// DATA BROWSER
// ============================================

#[derive(Clone, Debug)]
pub struct BrowserScreen {
    /// Entity chosen in the selector; nothing is chosen initially
    pub entity: Option<Entity>,
    pub page: u32,
    pub page_size: u32,
    pub listing: Option<Listing>,
    /// Entity the current listing belongs to
    pub listed_entity: Option<Entity>,
    pub selected: Option<usize>,
    /// Record shown in the details popup
    pub detail: Option<Value>,
    pub alert: Option<Alert>,
    pub busy: bool,
}

impl BrowserScreen {
    pub fn new(page_size: u32) -> Self {
        Self {
            entity: None,
            page: 1,
            page_size,
            listing: None,
            listed_entity: None,
            selected: None,
            detail: None,
            alert: None,
            busy: false,
        }
    }

    pub fn cycle_entity(&mut self, forward: bool) {
        let labels: Vec<&str> = Entity::ALL.iter().map(|e| e.listing_label()).collect();
        let current = self.entity.map(|e| e.listing_label()).unwrap_or("");
        if let Some(next) = logic::ui::cycle_option(&labels, current, forward) {
            self.entity = Entity::ALL.iter().copied().find(|e| e.listing_label() == next);
        }
    }

    /// Step the page size; the page goes back to 1. Returns whether to refetch.
    pub fn cycle_page_size(&mut self, forward: bool) -> bool {
        if self.busy {
            return false;
        }
        let position = PAGE_SIZES.iter().position(|s| *s == self.page_size);
        let next = if forward {
            logic::navigation::next_selection(position, PAGE_SIZES.len())
        } else {
            logic::navigation::prev_selection(position, PAGE_SIZES.len())
        };
        if let Some(index) = next {
            self.page_size = PAGE_SIZES[index];
        }
        self.page = 1;
        self.is_paginated()
    }

    /// Whether the current listing is the paginated tests listing
    pub fn is_paginated(&self) -> bool {
        self.listed_entity == Some(Entity::Test)
    }

    pub fn total_pages(&self) -> u32 {
        self.listing.as_ref().map(|l| l.total_pages).unwrap_or(0)
    }

    pub fn rows(&self) -> &[Value] {
        self.listing.as_ref().map(|l| l.items.as_slice()).unwrap_or(&[])
    }

    /// `(page, size)` sent with a listing request for `entity`
    pub fn page_request(&self, entity: Entity) -> Option<(u32, u32)> {
        match entity {
            Entity::Test => Some((self.page, self.page_size)),
            _ => None,
        }
    }

    pub fn begin_fetch(&mut self) -> Option<(Entity, Option<(u32, u32)>)> {
        if self.busy {
            return None;
        }
        let Some(entity) = self.entity else {
            self.alert = Some(Alert::danger("Please select an option from the dropdown."));
            return None;
        };
        if self.listed_entity != Some(entity) {
            self.page = 1;
        }
        self.busy = true;
        self.alert = None;
        self.listing = None;
        self.selected = None;
        self.detail = None;
        Some((entity, self.page_request(entity)))
    }

    /// Refetch the current listing at the current page
    pub fn begin_refresh(&mut self) -> Option<(Entity, Option<(u32, u32)>)> {
        let entity = self.listed_entity?;
        self.entity = Some(entity);
        self.begin_fetch()
    }

    pub fn apply_listing(&mut self, entity: Entity, result: Result<Listing>) {
        self.busy = false;
        match result {
            Ok(listing) => {
                self.selected = logic::navigation::clamp_selection(Some(0), listing.items.len());
                self.listing = Some(listing);
                self.listed_entity = Some(entity);
                self.alert = Some(logic::outcome::listing_success(entity));
            }
            Err(e) => {
                self.listing = None;
                self.alert = Some(logic::outcome::listing_error(&e));
            }
        }
    }

    /// Move to `page` when the pager allows it; returns whether it changed
    pub fn go_to_page(&mut self, page: u32) -> bool {
        let total = self.total_pages();
        if self.busy || !self.is_paginated() || !logic::pagination::has_pager(total) {
            return false;
        }
        let page = page.clamp(1, total);
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn step_page(&mut self, forward: bool) -> bool {
        let target = logic::pagination::step(self.page, self.total_pages(), forward);
        self.go_to_page(target)
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        self.go_to_page(self.total_pages())
    }

    pub fn select_next(&mut self) {
        self.selected = logic::navigation::next_selection(self.selected, self.rows().len());
    }

    pub fn select_prev(&mut self) {
        self.selected = logic::navigation::prev_selection(self.selected, self.rows().len());
    }

    pub fn open_detail(&mut self) {
        self.detail = self.selected.and_then(|i| self.rows().get(i)).cloned();
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiStatusError;
    use chrono::NaiveDate;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn not_found() -> anyhow::Error {
        ApiStatusError {
            status: 404,
            reason: "Not Found".to_string(),
            body: String::new(),
        }
        .into()
    }

    #[test]
    fn test_busy_screen_refuses_second_submit() {
        let mut screen = CreateScreen::new(Entity::Banner);
        screen.form.set_value(keys::TITLE, "Sale");
        screen.form.set_value(keys::TITLE_DETAIL, "Half price");
        screen.form.set_value(keys::URL_TO_DIRECT, "https://example.com");
        screen.form.set_value(keys::IMAGE, "/tmp/a.png");
        assert!(screen.submit(now()).is_some());
        assert!(screen.busy);
        assert!(screen.submit(now()).is_none());
    }

    #[test]
    fn test_failed_create_keeps_form() {
        let mut screen = CreateScreen::new(Entity::Course);
        screen.form.set_value(keys::NAME, "Rust");
        screen.busy = true;
        screen.apply_result(&Ok(201));
        assert!(!screen.busy);
        assert_eq!(screen.form.value(keys::NAME), "Rust");
        assert_eq!(screen.alert.unwrap().text, "Failed to add course.");
    }

    #[test]
    fn test_modify_lookup_fills_editor() {
        let mut screen = ModifyScreen::new(Entity::Banner);
        screen.lookup.set_value(keys::ID, " 12 ");
        let id = screen.begin_lookup().unwrap();
        assert_eq!(id, "12");

        screen.apply_lookup(
            &id,
            Ok(Some(json!({"id": 12, "title": "Sale", "title_detail": "Big", "urlToDirect": "https://x"}))),
        );
        let editor = screen.editor.as_ref().unwrap();
        assert_eq!(editor.value(keys::TITLE), "Sale");
        assert_eq!(screen.pane, Pane::Editor);
        assert_eq!(screen.loaded_id.as_deref(), Some("12"));
    }

    #[test]
    fn test_modify_empty_id_warns() {
        let mut screen = ModifyScreen::new(Entity::Test);
        assert!(screen.begin_lookup().is_none());
        assert_eq!(screen.alert.unwrap().text, "Please enter a Test ID.");
    }

    #[test]
    fn test_modify_focus_crosses_panes() {
        let mut screen = ModifyScreen::new(Entity::Banner);
        screen.lookup.set_value(keys::ID, "1");
        screen.begin_lookup();
        screen.apply_lookup("1", Ok(Some(json!({"id": 1, "title": "a"}))));
        screen.pane = Pane::Lookup;
        screen.lookup.focus = 1;

        screen.focus_next();
        assert_eq!(screen.pane, Pane::Editor);
        assert_eq!(screen.active_form().focus, 0);

        screen.focus_prev();
        assert_eq!(screen.pane, Pane::Lookup);
        assert!(screen.lookup.on_submit());
    }

    #[test]
    fn test_successful_update_resets_screen() {
        let mut screen = ModifyScreen::new(Entity::Banner);
        screen.lookup.set_value(keys::ID, "1");
        screen.begin_lookup();
        screen.apply_lookup(
            "1",
            Ok(Some(json!({"id": 1, "title": "a", "title_detail": "b", "urlToDirect": "c"}))),
        );
        let (id, submission) = screen.submit(now()).unwrap();
        assert_eq!(id, "1");
        assert!(submission.image.is_none());

        screen.apply_update(&id, &Ok(200));
        assert!(screen.editor.is_none());
        assert_eq!(screen.lookup.value(keys::ID), "");
        assert_eq!(screen.alert.unwrap().text, "Banner updated successfully.");
    }

    #[test]
    fn test_delete_flow_requires_confirmation() {
        let mut screen = DeleteScreen::new(Entity::Course);
        assert!(!screen.request_delete());

        screen.lookup.set_value(keys::ID, "5");
        let id = screen.begin_lookup().unwrap();
        screen.apply_lookup(&id, Ok(Some(json!({"id": 5, "name": "Rust"}))));
        assert_eq!(screen.alert.as_ref().unwrap().text, "Course found.");

        assert!(screen.confirm_delete().is_none());
        assert!(screen.request_delete());
        assert_eq!(screen.confirm_delete().as_deref(), Some("5"));

        screen.apply_delete("5", &Ok(200));
        assert!(screen.record.is_none());
        assert_eq!(screen.alert.unwrap().text, "Course deleted successfully.");
    }

    #[test]
    fn test_delete_lookup_404_clears_record() {
        let mut screen = DeleteScreen::new(Entity::Banner);
        screen.lookup.set_value(keys::ID, "9");
        let id = screen.begin_lookup().unwrap();
        screen.apply_lookup(&id, Err(not_found()));
        assert!(screen.record.is_none());
        assert_eq!(screen.alert.unwrap().text, "Banner not found for ID: 9");
    }

    #[test]
    fn test_delete_clear_drops_banner() {
        let mut screen = DeleteScreen::new(Entity::Test);
        screen.lookup.set_value(keys::ID, "3");
        screen.alert = Some(Alert::danger("x"));
        screen.clear();
        assert!(screen.alert.is_none());
        assert_eq!(screen.lookup.value(keys::ID), "");
    }

    #[test]
    fn test_browser_requires_selection() {
        let mut screen = BrowserScreen::new(10);
        assert!(screen.begin_fetch().is_none());
        assert_eq!(
            screen.alert.unwrap().text,
            "Please select an option from the dropdown."
        );
    }

    #[test]
    fn test_browser_tests_listing_is_paginated() {
        let mut screen = BrowserScreen::new(10);
        screen.cycle_entity(false);
        assert_eq!(screen.entity, Some(Entity::Test));
        assert_eq!(screen.begin_fetch(), Some((Entity::Test, Some((1, 10)))));

        screen.apply_listing(
            Entity::Test,
            Ok(Listing {
                items: vec![json!({"id": 1}), json!({"id": 2})],
                total_pages: 4,
                total_elements: 40,
            }),
        );
        assert_eq!(screen.selected, Some(0));
        assert!(screen.step_page(true));
        assert_eq!(screen.page, 2);
        assert!(screen.last_page());
        assert_eq!(screen.page, 4);
        assert!(!screen.step_page(true));
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut screen = BrowserScreen::new(10);
        screen.page = 3;
        screen.cycle_page_size(true);
        assert_eq!(screen.page_size, 20);
        assert_eq!(screen.page, 1);
    }

    #[test]
    fn test_page_size_is_locked_while_fetching() {
        let mut screen = BrowserScreen::new(10);
        screen.entity = Some(Entity::Test);
        screen.listed_entity = Some(Entity::Test);
        screen.page = 3;
        screen.busy = true;

        assert!(!screen.cycle_page_size(true));
        assert_eq!(screen.page_size, 10);
        assert_eq!(screen.page, 3);

        screen.busy = false;
        assert!(screen.cycle_page_size(false));
        assert_eq!(screen.page_size, 5);
        assert_eq!(screen.page, 1);
    }

    #[test]
    fn test_entity_selector_wraps_both_ways() {
        let mut screen = BrowserScreen::new(10);
        screen.cycle_entity(false);
        assert_eq!(screen.entity, Some(Entity::Test));
        screen.cycle_entity(true);
        assert_eq!(screen.entity, Some(Entity::Banner));
        screen.cycle_entity(true);
        assert_eq!(screen.entity, Some(Entity::Course));
    }

    #[test]
    fn test_other_listings_are_not_paginated() {
        let mut screen = BrowserScreen::new(10);
        screen.cycle_entity(true);
        assert_eq!(screen.entity, Some(Entity::Banner));
        assert_eq!(screen.begin_fetch(), Some((Entity::Banner, None)));
    }

    #[test]
    fn test_detail_popup_shows_selected_row() {
        let mut screen = BrowserScreen::new(10);
        screen.apply_listing(
            Entity::Course,
            Ok(Listing {
                items: vec![json!({"id": 1}), json!({"id": 2})],
                ..Listing::default()
            }),
        );
        screen.select_next();
        screen.open_detail();
        assert_eq!(screen.detail, Some(json!({"id": 2})));
        screen.close_detail();
        assert!(screen.detail.is_none());
    }
}
