//! Form validation
//!
//! Turns a filled-in form into a `Draft` the client can send, or the message
//! to show when the form is not acceptable. Date checks take `now` as input
//! so they stay deterministic under test.

use chrono::NaiveDateTime;
use std::fmt;
use std::path::PathBuf;

use crate::api::{BannerPayload, CourseLink, CoursePayload, Draft, TestPayload};
use crate::logic::formatting::parse_datetime;
use crate::model::form::{keys, Form, TEST_LANGUAGES, TEST_TYPES};
use crate::Entity;

/// Whether the form creates a new record or updates a fetched one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingFields { image_required: bool },
    EndNotAfterStart,
    StartInPast,
    InvalidNumber(&'static str),
    NegativePrice,
    PriceNotPositive,
    DiscountOutOfRange { min: u32, max: u32 },
    DurationTooShort,
    InvalidCourseId,
    InvalidDate(&'static str),
    InvalidOption(&'static str),
    MissingId(Entity),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingFields { image_required: true } => {
                write!(f, "Please fill all fields and select an image.")
            }
            ValidationError::MissingFields { image_required: false } => {
                write!(f, "Please fill all fields.")
            }
            ValidationError::EndNotAfterStart => {
                write!(f, "Scheduled End must be after Scheduled Start.")
            }
            ValidationError::StartInPast => {
                write!(f, "Scheduled Start must be today or in the future.")
            }
            ValidationError::InvalidNumber(label) => write!(f, "{} must be a number.", label),
            ValidationError::NegativePrice => write!(f, "Price cannot be negative."),
            ValidationError::PriceNotPositive => write!(f, "Price must be a positive number."),
            ValidationError::DiscountOutOfRange { min, max } => {
                write!(f, "Discount Percentage must be between {} and {}.", min, max)
            }
            ValidationError::DurationTooShort => {
                write!(f, "Duration must be at least 1 minute.")
            }
            ValidationError::InvalidCourseId => {
                write!(f, "Course ID must be a positive whole number.")
            }
            ValidationError::InvalidDate(label) => {
                write!(f, "{} must be a date and time (YYYY-MM-DDTHH:MM).", label)
            }
            ValidationError::InvalidOption(label) => write!(f, "Please select a valid {}.", label),
            ValidationError::MissingId(entity) => write!(f, "Please enter a {} ID.", entity.as_str()),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validated form ready to submit
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub draft: Draft,
    pub image: Option<PathBuf>,
}

/// Trimmed id entered on a lookup screen
pub fn validate_id(entity: Entity, raw: &str) -> Result<String, ValidationError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ValidationError::MissingId(entity));
    }
    Ok(id.to_string())
}

/// Split comma-separated tags, dropping blanks
///
/// # Examples
/// ```
/// use admintui::logic::validation::parse_tags;
///
/// assert_eq!(parse_tags(" java, spring ,,backend"), vec!["java", "spring", "backend"]);
/// ```
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number(raw: &str, label: &'static str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::InvalidNumber(label))
}

/// Whole number, truncating a fractional entry ("90.5" -> 90)
fn parse_whole(raw: &str, label: &'static str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return Ok(v);
    }
    parse_number(raw, label).map(|v| v.trunc() as i64)
}

fn require_all(form: &Form, fields: &[&str], image_required: bool) -> Result<(), ValidationError> {
    let missing_field = fields.iter().any(|key| form.value(key).trim().is_empty());
    let missing_image = image_required && form.value(keys::IMAGE).trim().is_empty();
    if missing_field || missing_image {
        return Err(ValidationError::MissingFields { image_required });
    }
    Ok(())
}

fn image_path(form: &Form) -> Option<PathBuf> {
    let raw = form.value(keys::IMAGE).trim();
    if raw.is_empty() {
        None
    } else {
        Some(PathBuf::from(raw))
    }
}

fn text(form: &Form, key: &str) -> String {
    form.value(key).trim().to_string()
}

/// Validate a form for `entity` and build its submission
pub fn validate(
    entity: Entity,
    mode: Mode,
    form: &Form,
    now: NaiveDateTime,
) -> Result<Submission, ValidationError> {
    let draft = match entity {
        Entity::Banner => validate_banner(form, mode)?,
        Entity::Course => validate_course(form, mode)?,
        Entity::Test => validate_test(form, mode, now)?,
    };
    Ok(Submission {
        draft,
        image: image_path(form),
    })
}

fn validate_banner(form: &Form, mode: Mode) -> Result<Draft, ValidationError> {
    require_all(
        form,
        &[keys::TITLE, keys::TITLE_DETAIL, keys::URL_TO_DIRECT],
        mode == Mode::Create,
    )?;

    Ok(Draft::Banner(BannerPayload {
        title: text(form, keys::TITLE),
        title_detail: text(form, keys::TITLE_DETAIL),
        url_to_direct: text(form, keys::URL_TO_DIRECT),
    }))
}

fn validate_course(form: &Form, mode: Mode) -> Result<Draft, ValidationError> {
    require_all(
        form,
        &[keys::NAME, keys::DESCRIPTION, keys::PRICE, keys::DISCOUNT, keys::TAGS],
        mode == Mode::Create,
    )?;

    let price = parse_number(form.value(keys::PRICE), "Price")?;
    let discount = parse_number(form.value(keys::DISCOUNT), "Discount Percentage")?;

    match mode {
        Mode::Create => {
            if price < 0.0 {
                return Err(ValidationError::NegativePrice);
            }
            if !(0.0..=100.0).contains(&discount) {
                return Err(ValidationError::DiscountOutOfRange { min: 0, max: 100 });
            }
        }
        Mode::Update => {
            if price <= 0.0 {
                return Err(ValidationError::PriceNotPositive);
            }
            let whole_discount = discount.trunc();
            if !(1.0..=100.0).contains(&whole_discount) {
                return Err(ValidationError::DiscountOutOfRange { min: 1, max: 100 });
            }
        }
    }

    let tags = parse_tags(form.value(keys::TAGS));
    if tags.is_empty() {
        return Err(ValidationError::MissingFields {
            image_required: mode == Mode::Create,
        });
    }

    Ok(Draft::Course(CoursePayload {
        name: text(form, keys::NAME),
        description: text(form, keys::DESCRIPTION),
        price,
        discount_percentage: discount,
        tags,
    }))
}

/// Date ordering checks; only applied when both dates are present and readable
fn check_schedule(form: &Form, mode: Mode, now: NaiveDateTime) -> Result<(), ValidationError> {
    let start = parse_datetime(form.value(keys::SCHEDULED_START));
    let end = parse_datetime(form.value(keys::SCHEDULED_END));
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(());
    };

    if end <= start {
        return Err(ValidationError::EndNotAfterStart);
    }

    if mode == Mode::Create {
        let today_start = now.date().and_hms_opt(0, 0, 0).unwrap_or(now);
        if start < today_start {
            return Err(ValidationError::StartInPast);
        }
    }

    Ok(())
}

fn validate_test(form: &Form, mode: Mode, now: NaiveDateTime) -> Result<Draft, ValidationError> {
    check_schedule(form, mode, now)?;

    require_all(
        form,
        &[
            keys::TITLE,
            keys::DESCRIPTION,
            keys::TYPE,
            keys::LANGUAGE,
            keys::PRICE,
            keys::DISCOUNT,
            keys::DURATION,
            keys::CONTAIN,
            keys::SCHEDULED_START,
            keys::SCHEDULED_END,
            keys::COURSE_ID,
        ],
        mode == Mode::Create,
    )?;

    let test_type = text(form, keys::TYPE);
    if !TEST_TYPES.contains(&test_type.as_str()) {
        return Err(ValidationError::InvalidOption("type"));
    }
    let language = text(form, keys::LANGUAGE);
    if !TEST_LANGUAGES.contains(&language.as_str()) {
        return Err(ValidationError::InvalidOption("language"));
    }

    let price = parse_number(form.value(keys::PRICE), "Price")?;
    if price < 0.0 {
        return Err(ValidationError::NegativePrice);
    }
    let discount = parse_number(form.value(keys::DISCOUNT), "Discount Percentage")?;
    if !(0.0..=100.0).contains(&discount) {
        return Err(ValidationError::DiscountOutOfRange { min: 0, max: 100 });
    }

    let duration = parse_whole(form.value(keys::DURATION), "Duration")?;
    if duration < 1 {
        return Err(ValidationError::DurationTooShort);
    }

    let course_id = parse_whole(form.value(keys::COURSE_ID), "Course ID")
        .map_err(|_| ValidationError::InvalidCourseId)?;
    if course_id < 1 {
        return Err(ValidationError::InvalidCourseId);
    }

    let scheduled_start = text(form, keys::SCHEDULED_START);
    if parse_datetime(&scheduled_start).is_none() {
        return Err(ValidationError::InvalidDate("Scheduled Start"));
    }
    let scheduled_end = text(form, keys::SCHEDULED_END);
    if parse_datetime(&scheduled_end).is_none() {
        return Err(ValidationError::InvalidDate("Scheduled End"));
    }

    Ok(Draft::Test(TestPayload {
        title: text(form, keys::TITLE),
        description: text(form, keys::DESCRIPTION),
        test_type,
        language,
        price,
        discount_percentage: discount,
        duration_in_minutes: duration,
        contain: text(form, keys::CONTAIN),
        scheduled_start,
        scheduled_end,
        course: CourseLink { id: course_id },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 6, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn filled_course(mode: Mode) -> Form {
        let mut form = Form::for_entity(Entity::Course, mode == Mode::Create);
        form.set_value(keys::NAME, "Rust");
        form.set_value(keys::DESCRIPTION, "Systems programming");
        form.set_value(keys::PRICE, "499");
        form.set_value(keys::DISCOUNT, "10");
        form.set_value(keys::TAGS, "rust, systems");
        form.set_value(keys::IMAGE, "/tmp/cover.png");
        form
    }

    fn filled_test() -> Form {
        let mut form = Form::for_entity(Entity::Test, true);
        form.set_value(keys::TITLE, "Mock 1");
        form.set_value(keys::DESCRIPTION, "Full length");
        form.set_value(keys::TYPE, "LIVE");
        form.set_value(keys::LANGUAGE, "ENGLISH");
        form.set_value(keys::PRICE, "99.5");
        form.set_value(keys::DISCOUNT, "5");
        form.set_value(keys::DURATION, "90");
        form.set_value(keys::CONTAIN, "100 questions");
        form.set_value(keys::SCHEDULED_START, "2030-06-15T09:00");
        form.set_value(keys::SCHEDULED_END, "2030-06-15T10:30");
        form.set_value(keys::COURSE_ID, "7");
        form.set_value(keys::IMAGE, "/tmp/test.png");
        form
    }

    #[test]
    fn test_banner_create_requires_image() {
        let mut form = Form::for_entity(Entity::Banner, true);
        form.set_value(keys::TITLE, "Sale");
        form.set_value(keys::TITLE_DETAIL, "Half price");
        form.set_value(keys::URL_TO_DIRECT, "https://example.com");
        let err = validate(Entity::Banner, Mode::Create, &form, now()).unwrap_err();
        assert_eq!(err.to_string(), "Please fill all fields and select an image.");
    }

    #[test]
    fn test_banner_update_image_optional() {
        let mut form = Form::for_entity(Entity::Banner, false);
        form.set_value(keys::TITLE, " Sale ");
        form.set_value(keys::TITLE_DETAIL, "Half price");
        form.set_value(keys::URL_TO_DIRECT, "https://example.com");
        let submission = validate(Entity::Banner, Mode::Update, &form, now()).unwrap();
        assert!(submission.image.is_none());
        let Draft::Banner(payload) = submission.draft else { panic!("expected banner") };
        assert_eq!(payload.title, "Sale");
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut form = filled_course(Mode::Update);
        form.set_value(keys::NAME, "   ");
        let err = validate(Entity::Course, Mode::Update, &form, now()).unwrap_err();
        assert_eq!(err.to_string(), "Please fill all fields.");
    }

    #[test]
    fn test_course_update_price_must_be_positive() {
        let mut form = filled_course(Mode::Update);
        form.set_value(keys::PRICE, "0");
        let err = validate(Entity::Course, Mode::Update, &form, now()).unwrap_err();
        assert_eq!(err, ValidationError::PriceNotPositive);
    }

    #[test]
    fn test_course_create_allows_free_price() {
        let mut form = filled_course(Mode::Create);
        form.set_value(keys::PRICE, "0");
        form.set_value(keys::DISCOUNT, "0");
        assert!(validate(Entity::Course, Mode::Create, &form, now()).is_ok());
    }

    #[test]
    fn test_course_update_discount_range_truncates() {
        let mut form = filled_course(Mode::Update);
        form.set_value(keys::DISCOUNT, "0.9");
        let err = validate(Entity::Course, Mode::Update, &form, now()).unwrap_err();
        assert_eq!(err.to_string(), "Discount Percentage must be between 1 and 100.");

        form.set_value(keys::DISCOUNT, "100.5");
        assert!(validate(Entity::Course, Mode::Update, &form, now()).is_ok());

        form.set_value(keys::DISCOUNT, "101");
        assert!(validate(Entity::Course, Mode::Update, &form, now()).is_err());
    }

    #[test]
    fn test_course_rejects_non_numeric_price() {
        let mut form = filled_course(Mode::Create);
        form.set_value(keys::PRICE, "abc");
        let err = validate(Entity::Course, Mode::Create, &form, now()).unwrap_err();
        assert_eq!(err.to_string(), "Price must be a number.");
    }

    #[test]
    fn test_course_payload_tags() {
        let form = filled_course(Mode::Create);
        let submission = validate(Entity::Course, Mode::Create, &form, now()).unwrap();
        let Draft::Course(payload) = submission.draft else { panic!("expected course") };
        assert_eq!(payload.tags, vec!["rust", "systems"]);
        assert_eq!(payload.price, 499.0);
        assert_eq!(submission.image, Some(PathBuf::from("/tmp/cover.png")));
    }

    #[test]
    fn test_schedule_end_must_follow_start() {
        let mut form = filled_test();
        form.set_value(keys::SCHEDULED_END, "2030-06-15T09:00");
        let err = validate(Entity::Test, Mode::Create, &form, now()).unwrap_err();
        assert_eq!(err, ValidationError::EndNotAfterStart);
    }

    #[test]
    fn test_schedule_checked_before_required_fields() {
        let mut form = filled_test();
        form.set_value(keys::TITLE, "");
        form.set_value(keys::SCHEDULED_END, "2030-06-14T09:00");
        let err = validate(Entity::Test, Mode::Create, &form, now()).unwrap_err();
        assert_eq!(err, ValidationError::EndNotAfterStart);
    }

    #[test]
    fn test_start_earlier_today_is_allowed() {
        let form = filled_test();
        // 09:00 is before "now" (14:30) but still today
        assert!(validate(Entity::Test, Mode::Create, &form, now()).is_ok());
    }

    #[test]
    fn test_start_yesterday_rejected_on_create_only() {
        let mut form = filled_test();
        form.set_value(keys::SCHEDULED_START, "2030-06-14T23:59");
        let err = validate(Entity::Test, Mode::Create, &form, now()).unwrap_err();
        assert_eq!(err.to_string(), "Scheduled Start must be today or in the future.");

        assert!(validate(Entity::Test, Mode::Update, &form, now()).is_ok());
    }

    #[test]
    fn test_test_payload_values() {
        let form = filled_test();
        let submission = validate(Entity::Test, Mode::Create, &form, now()).unwrap();
        let Draft::Test(payload) = submission.draft else { panic!("expected test") };
        assert_eq!(payload.duration_in_minutes, 90);
        assert_eq!(payload.course, CourseLink { id: 7 });
        assert_eq!(payload.scheduled_start, "2030-06-15T09:00");
    }

    #[test]
    fn test_test_rejects_zero_duration_and_course() {
        let mut form = filled_test();
        form.set_value(keys::DURATION, "0");
        assert_eq!(
            validate(Entity::Test, Mode::Create, &form, now()).unwrap_err(),
            ValidationError::DurationTooShort
        );

        let mut form = filled_test();
        form.set_value(keys::COURSE_ID, "x1");
        assert_eq!(
            validate(Entity::Test, Mode::Create, &form, now()).unwrap_err(),
            ValidationError::InvalidCourseId
        );
    }

    #[test]
    fn test_test_rejects_unreadable_date() {
        let mut form = filled_test();
        form.set_value(keys::SCHEDULED_END, "tomorrow");
        assert_eq!(
            validate(Entity::Test, Mode::Create, &form, now()).unwrap_err(),
            ValidationError::InvalidDate("Scheduled End")
        );
    }

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id(Entity::Banner, " 42 ").unwrap(), "42");
        assert_eq!(
            validate_id(Entity::Course, "  ").unwrap_err().to_string(),
            "Please enter a Course ID."
        );
    }
}
