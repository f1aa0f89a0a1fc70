//! Form state
//!
//! A form is an ordered list of fields plus a focus cursor. The cursor has
//! one extra slot past the last field: the submit button.

use crate::api::Record;
use crate::config::EndpointGroup;
use crate::logic;
use crate::Entity;

pub const TEST_TYPES: &[&str] = &["NORMAL", "DEMO", "LIVE"];
pub const TEST_LANGUAGES: &[&str] = &["ENGLISH", "HINDI"];

/// Field keys shared by the form builders, validation and record filling
pub mod keys {
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const TITLE: &str = "title";
    pub const TITLE_DETAIL: &str = "title_detail";
    pub const URL_TO_DIRECT: &str = "urlToDirect";
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const PRICE: &str = "price";
    pub const DISCOUNT: &str = "discountPercentage";
    pub const TAGS: &str = "tags";
    pub const TYPE: &str = "type";
    pub const LANGUAGE: &str = "language";
    pub const DURATION: &str = "durationInMinutes";
    pub const CONTAIN: &str = "contain";
    pub const SCHEDULED_START: &str = "scheduledStart";
    pub const SCHEDULED_END: &str = "scheduledEnd";
    pub const COURSE_ID: &str = "courseId";
    pub const IMAGE: &str = "image";
    pub const ID: &str = "id";
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Url,
    Number,
    Select(&'static [&'static str]),
    DateTime,
    /// Local path of an image file to upload
    Image,
    Secret,
}

#[derive(Clone, Debug)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    pub value: String,
}

impl FormField {
    fn new(key: &'static str, label: &'static str, kind: FieldKind, placeholder: &'static str) -> Self {
        Self {
            key,
            label,
            kind,
            placeholder,
            value: String::new(),
        }
    }

    pub fn accepts_typing(&self) -> bool {
        !matches!(self.kind, FieldKind::Select(_))
    }
}

#[derive(Clone, Debug)]
pub struct Form {
    pub fields: Vec<FormField>,
    /// Focused slot; `fields.len()` is the submit button
    pub focus: usize,
    pub submit_label: &'static str,
}

impl Form {
    pub fn new(fields: Vec<FormField>, submit_label: &'static str) -> Self {
        Self {
            fields,
            focus: 0,
            submit_label,
        }
    }

    pub fn login() -> Self {
        Self::new(
            vec![
                FormField::new(keys::USERNAME, "Username", FieldKind::Text, "Enter username"),
                FormField::new(keys::PASSWORD, "Password", FieldKind::Secret, "Enter password"),
            ],
            "Login",
        )
    }

    /// Single ID field used by the modify and delete screens to find a record
    pub fn lookup(entity: Entity, group: EndpointGroup) -> Self {
        let label = match entity {
            Entity::Banner => "Banner ID",
            Entity::Course => "Course ID",
            Entity::Test => "Test ID",
        };
        let submit = match (entity, group) {
            (Entity::Banner, EndpointGroup::Delete) => "Check Banner",
            (Entity::Course, EndpointGroup::Delete) => "Check Course",
            (Entity::Test, EndpointGroup::Delete) => "Check Test",
            (Entity::Banner, _) => "Fetch Banner",
            (Entity::Course, _) => "Fetch Course",
            (Entity::Test, _) => "Fetch Test",
        };
        Self::new(
            vec![FormField::new(keys::ID, label, FieldKind::Text, "Enter ID")],
            submit,
        )
    }

    /// Entity form; update forms make the image optional
    pub fn for_entity(entity: Entity, image_required: bool) -> Self {
        match entity {
            Entity::Banner => Self::banner(image_required),
            Entity::Course => Self::course(image_required),
            Entity::Test => Self::test(image_required),
        }
    }

    fn banner(image_required: bool) -> Self {
        let (image_label, submit) = if image_required {
            ("Banner Image", "Add Banner")
        } else {
            ("Banner Image (optional)", "Confirm & Update Banner")
        };
        Self::new(
            vec![
                FormField::new(keys::TITLE, "Title", FieldKind::Text, "Enter banner title"),
                FormField::new(keys::TITLE_DETAIL, "Title Detail", FieldKind::Text, "Enter banner detail"),
                FormField::new(keys::URL_TO_DIRECT, "URL to Direct", FieldKind::Url, "Enter redirect URL"),
                FormField::new(keys::IMAGE, image_label, FieldKind::Image, "Path to an image file"),
            ],
            submit,
        )
    }

    fn course(image_required: bool) -> Self {
        let (image_label, submit) = if image_required {
            ("Course Image", "Add Course")
        } else {
            ("Course Image (optional)", "Confirm & Update Course")
        };
        Self::new(
            vec![
                FormField::new(keys::NAME, "Course Name", FieldKind::Text, "Enter course name"),
                FormField::new(keys::DESCRIPTION, "Description", FieldKind::TextArea, "Enter course description"),
                FormField::new(keys::PRICE, "Price", FieldKind::Number, "Enter price"),
                FormField::new(keys::DISCOUNT, "Discount Percentage", FieldKind::Number, "Enter discount percentage"),
                FormField::new(keys::TAGS, "Tags (comma separated)", FieldKind::Text, "e.g. java, programming, backend, spring"),
                FormField::new(keys::IMAGE, image_label, FieldKind::Image, "Path to an image file"),
            ],
            submit,
        )
    }

    fn test(image_required: bool) -> Self {
        let (image_label, submit) = if image_required {
            ("Test Image", "Add Test")
        } else {
            ("Test Image (optional)", "Confirm & Update Test")
        };
        Self::new(
            vec![
                FormField::new(keys::TITLE, "Title", FieldKind::Text, "Enter test title"),
                FormField::new(keys::DESCRIPTION, "Description", FieldKind::TextArea, "Enter test description"),
                FormField::new(keys::TYPE, "Type", FieldKind::Select(TEST_TYPES), "Select type"),
                FormField::new(keys::LANGUAGE, "Language", FieldKind::Select(TEST_LANGUAGES), "Select language"),
                FormField::new(keys::PRICE, "Price", FieldKind::Number, "Enter price"),
                FormField::new(keys::DISCOUNT, "Discount Percentage", FieldKind::Number, "Enter discount percentage"),
                FormField::new(keys::DURATION, "Duration (minutes)", FieldKind::Number, "Enter duration in minutes"),
                FormField::new(keys::CONTAIN, "Contain", FieldKind::TextArea, "Enter test content"),
                FormField::new(keys::SCHEDULED_START, "Scheduled Start", FieldKind::DateTime, "YYYY-MM-DDTHH:MM"),
                FormField::new(keys::SCHEDULED_END, "Scheduled End", FieldKind::DateTime, "YYYY-MM-DDTHH:MM"),
                FormField::new(keys::COURSE_ID, "Course ID", FieldKind::Number, "Enter course ID"),
                FormField::new(keys::IMAGE, image_label, FieldKind::Image, "Path to an image file"),
            ],
            submit,
        )
    }

    /// Current value of a field, empty when the form has no such field
    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.key == key) {
            field.value = value.into();
        }
    }

    pub fn on_submit(&self) -> bool {
        self.focus >= self.fields.len()
    }

    pub fn focus_next(&mut self) {
        let slots = self.fields.len() + 1;
        self.focus = logic::navigation::next_selection(Some(self.focus), slots).unwrap_or(0);
    }

    pub fn focus_prev(&mut self) {
        let slots = self.fields.len() + 1;
        self.focus = logic::navigation::prev_selection(Some(self.focus), slots).unwrap_or(0);
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.accepts_typing() {
                field.value.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            match field.kind {
                FieldKind::Select(_) => field.value.clear(),
                _ => {
                    field.value.pop();
                }
            }
        }
    }

    /// Step a select field through its options
    pub fn cycle_option(&mut self, forward: bool) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if let FieldKind::Select(options) = field.kind {
                if let Some(next) = logic::ui::cycle_option(options, &field.value, forward) {
                    field.value = next.to_string();
                }
            }
        }
    }

    /// Empty every field and move focus back to the top
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }

    /// Pre-fill the form from a fetched record
    pub fn fill_from_record(&mut self, record: &Record) {
        use logic::formatting::{number_field, truncate_to_minutes};

        match record {
            Record::Banner(banner) => {
                self.set_value(keys::TITLE, banner.title.clone());
                self.set_value(keys::TITLE_DETAIL, banner.title_detail.clone());
                self.set_value(keys::URL_TO_DIRECT, banner.url_to_direct.clone());
            }
            Record::Course(course) => {
                self.set_value(keys::NAME, course.name.clone());
                self.set_value(keys::DESCRIPTION, course.description.clone());
                self.set_value(keys::PRICE, number_field(course.price));
                self.set_value(keys::DISCOUNT, number_field(course.discount_percentage));
                self.set_value(keys::TAGS, course.tags.join(", "));
            }
            Record::Test(test) => {
                self.set_value(keys::TITLE, test.title.clone());
                self.set_value(keys::DESCRIPTION, test.description.clone());
                self.set_value(keys::TYPE, test.test_type.clone());
                self.set_value(keys::LANGUAGE, test.language.clone());
                self.set_value(keys::PRICE, number_field(test.price));
                self.set_value(keys::DISCOUNT, number_field(test.discount_percentage));
                self.set_value(
                    keys::DURATION,
                    test.duration_in_minutes.map(|d| d.to_string()).unwrap_or_default(),
                );
                self.set_value(keys::CONTAIN, test.contain.clone().unwrap_or_default());
                self.set_value(
                    keys::SCHEDULED_START,
                    test.scheduled_start.as_deref().map(truncate_to_minutes).unwrap_or_default(),
                );
                self.set_value(
                    keys::SCHEDULED_END,
                    test.scheduled_end.as_deref().map(truncate_to_minutes).unwrap_or_default(),
                );
                self.set_value(
                    keys::COURSE_ID,
                    test.course.as_ref().and_then(|c| c.id.clone()).unwrap_or_default(),
                );
            }
        }
        self.set_value(keys::IMAGE, "");
        self.focus = 0;
    }
}
