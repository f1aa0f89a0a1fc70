use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::config::{EndpointGroup, Endpoints};
use crate::Entity;

/// Helper function to deserialize null as the type's default
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Backend ids arrive as numbers or strings; keep them as text
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Numbers may arrive as JSON numbers or numeric strings; anything else is absent
fn deserialize_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}

/// Like `deserialize_number`, but for whole counts such as minutes
fn deserialize_whole<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let truncate = |f: f64| f.is_finite().then(|| f.trunc() as i64);
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    })
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Banner {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub title_detail: String,
    #[serde(rename = "urlToDirect", default, deserialize_with = "deserialize_null_default")]
    pub url_to_direct: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub discount_percentage: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CourseRef {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub description: String,
    #[serde(rename = "type", default, deserialize_with = "deserialize_null_default")]
    pub test_type: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub language: String,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub discount_percentage: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_whole")]
    pub duration_in_minutes: Option<i64>,
    #[serde(default)]
    pub contain: Option<String>,
    #[serde(default)]
    pub scheduled_start: Option<String>,
    #[serde(default)]
    pub scheduled_end: Option<String>,
    #[serde(default)]
    pub course: Option<CourseRef>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// A catalog record returned by a lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Banner(Banner),
    Course(Course),
    Test(TestRecord),
}

impl Record {
    pub fn from_value(entity: Entity, value: Value) -> Result<Self> {
        let record = match entity {
            Entity::Banner => Record::Banner(serde_json::from_value(value)?),
            Entity::Course => Record::Course(serde_json::from_value(value)?),
            Entity::Test => Record::Test(serde_json::from_value(value)?),
        };
        Ok(record)
    }

    pub fn entity(&self) -> Entity {
        match self {
            Record::Banner(_) => Entity::Banner,
            Record::Course(_) => Entity::Course,
            Record::Test(_) => Entity::Test,
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            Record::Banner(b) => b.image_url.as_deref(),
            Record::Course(c) => c.image_url.as_deref(),
            Record::Test(t) => t.image_url.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BannerPayload {
    pub title: String,
    pub title_detail: String,
    #[serde(rename = "urlToDirect")]
    pub url_to_direct: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CourseLink {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestPayload {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub test_type: String,
    pub language: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub duration_in_minutes: i64,
    pub contain: String,
    pub scheduled_start: String,
    pub scheduled_end: String,
    pub course: CourseLink,
}

/// Validated entity body ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    Banner(BannerPayload),
    Course(CoursePayload),
    Test(TestPayload),
}

impl Draft {
    pub fn entity(&self) -> Entity {
        match self {
            Draft::Banner(_) => Entity::Banner,
            Draft::Course(_) => Entity::Course,
            Draft::Test(_) => Entity::Test,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let json = match self {
            Draft::Banner(p) => serde_json::to_string(p)?,
            Draft::Course(p) => serde_json::to_string(p)?,
            Draft::Test(p) => serde_json::to_string(p)?,
        };
        Ok(json)
    }
}

/// Image file attached to a multipart submission
#[derive(Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    /// Accept the bytes only if they decode as a known image format
    pub fn from_bytes(file_name: String, bytes: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&bytes)
            .map_err(|_| anyhow::anyhow!("{} is not a supported image file", file_name))?;
        Ok(Self {
            file_name,
            mime: format.to_mime_type().to_string(),
            bytes,
        })
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Self::from_bytes(file_name, bytes)
    }
}

/// Listing returned by the "get all" endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub items: Vec<Value>,
    pub total_pages: u32,
    pub total_elements: u64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingBody {
    Plain(Vec<Value>),
    Paged {
        #[serde(default, deserialize_with = "deserialize_null_default")]
        content: Vec<Value>,
        #[serde(rename = "totalPages", default)]
        total_pages: u32,
        #[serde(rename = "totalElements", default)]
        total_elements: u64,
    },
}

impl From<ListingBody> for Listing {
    fn from(body: ListingBody) -> Self {
        match body {
            ListingBody::Plain(items) => Listing {
                items,
                total_pages: 0,
                total_elements: 0,
            },
            ListingBody::Paged {
                content,
                total_pages,
                total_elements,
            } => Listing {
                items: content,
                total_pages,
                total_elements,
            },
        }
    }
}

/// Non-2xx reply from the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiStatusError {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl fmt::Display for ApiStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            write!(f, "HTTP {} {}", self.status, self.reason)
        } else {
            write!(f, "HTTP {} {}: {}", self.status, self.reason, self.body)
        }
    }
}

impl std::error::Error for ApiStatusError {}

fn create_path(entity: Entity) -> &'static str {
    match entity {
        Entity::Banner => "banner/addbanner",
        Entity::Course => "courses/addcourse",
        Entity::Test => "tests/addtest",
    }
}

fn lookup_path(entity: Entity, group: EndpointGroup, id: &str) -> String {
    match (entity, group) {
        (Entity::Banner, EndpointGroup::Delete) => format!("banner/{}", id),
        (Entity::Banner, _) => format!("banner/getbannerbyid/{}", id),
        (Entity::Course, _) => format!("courses/getcoursebyid/{}", id),
        (Entity::Test, EndpointGroup::Delete) => format!("fetch/testbyId/{}", id),
        (Entity::Test, _) => format!("tests/gettestbyid/{}", id),
    }
}

fn update_path(entity: Entity, id: &str) -> String {
    match entity {
        Entity::Banner => format!("banner/updatebanner/{}", id),
        Entity::Course => format!("courses/updatecourse/{}", id),
        Entity::Test => format!("tests/updatetest/{}", id),
    }
}

fn delete_path(entity: Entity, id: &str) -> String {
    match entity {
        Entity::Banner => format!("banner/removeBanner/{}", id),
        Entity::Course => format!("courses/removecourse/{}", id),
        Entity::Test => format!("tests/deletetest/{}", id),
    }
}

fn list_path(entity: Entity) -> &'static str {
    match entity {
        Entity::Banner => "banner/getBanners",
        Entity::Course => "courses/getallcourse",
        Entity::Test => "fetch/alltests",
    }
}

#[derive(Clone)]
pub struct CatalogClient {
    endpoints: Endpoints,
    client: Client,
}

impl CatalogClient {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { endpoints, client })
    }

    fn url(&self, entity: Entity, group: EndpointGroup, path: &str) -> String {
        format!("{}/{}", self.endpoints.host(entity, group), path)
    }

    /// Turn a non-success reply into an `ApiStatusError`
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiStatusError {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body,
        }
        .into())
    }

    async fn send_multipart(
        &self,
        method: Method,
        url: String,
        draft: &Draft,
        image: Option<ImageUpload>,
    ) -> Result<u16> {
        let json_part = Part::text(draft.to_json()?)
            .file_name("blob")
            .mime_str("application/json")?;
        let mut form = Form::new().part(draft.entity().part_name(), json_part);

        if let Some(image) = image {
            let image_part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime)?;
            form = form.part("image", image_part);
        }

        let response = self
            .client
            .request(method, &url)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let response = Self::check_status(response).await?;
        Ok(response.status().as_u16())
    }

    /// Create a record; returns the HTTP status of the successful reply
    pub async fn create(&self, draft: &Draft, image: ImageUpload) -> Result<u16> {
        let entity = draft.entity();
        let url = self.url(entity, EndpointGroup::Create, create_path(entity));
        self.send_multipart(Method::POST, url, draft, Some(image)).await
    }

    pub async fn update(&self, id: &str, draft: &Draft, image: Option<ImageUpload>) -> Result<u16> {
        let entity = draft.entity();
        let id = urlencoding::encode(id.trim());
        let url = self.url(entity, EndpointGroup::Modify, &update_path(entity, &id));
        self.send_multipart(Method::PUT, url, draft, image).await
    }

    /// Look up a record by id for the given screen family.
    ///
    /// Returns `None` when the backend answers with an empty or null body.
    pub async fn fetch(
        &self,
        entity: Entity,
        group: EndpointGroup,
        id: &str,
    ) -> Result<Option<Value>> {
        let id = urlencoding::encode(id.trim());
        let url = self.url(entity, group, &lookup_path(entity, group, &id));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;
        let response = Self::check_status(response).await?;

        let text = response.text().await.context("Failed to read response body")?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(&text).context("Failed to parse record")?;
        Ok(if value.is_null() { None } else { Some(value) })
    }

    pub async fn delete(&self, entity: Entity, id: &str) -> Result<u16> {
        let id = urlencoding::encode(id.trim());
        let url = self.url(entity, EndpointGroup::Delete, &delete_path(entity, &id));

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to delete via {}", url))?;
        let response = Self::check_status(response).await?;
        Ok(response.status().as_u16())
    }

    /// Fetch a listing; `page` is `(page_no, page_size)` for paginated endpoints
    pub async fn list(&self, entity: Entity, page: Option<(u32, u32)>) -> Result<Listing> {
        let mut url = self.url(entity, EndpointGroup::List, list_path(entity));
        if let Some((page_no, size)) = page {
            url.push_str(&format!("?page={}&size={}", page_no, size));
        }

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch listing from {}", url))?;
        let response = Self::check_status(response).await?;

        let body: ListingBody = response.json().await.context("Failed to parse listing")?;
        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_banner_payload_field_names() {
        let payload = BannerPayload {
            title: "Sale".to_string(),
            title_detail: "50% off".to_string(),
            url_to_direct: "https://example.com".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({"title": "Sale", "title_detail": "50% off", "urlToDirect": "https://example.com"})
        );
    }

    #[test]
    fn test_test_payload_field_names() {
        let payload = TestPayload {
            title: "Mock 1".to_string(),
            description: "Full length".to_string(),
            test_type: "LIVE".to_string(),
            language: "HINDI".to_string(),
            price: 99.5,
            discount_percentage: 10.0,
            duration_in_minutes: 90,
            contain: "100 questions".to_string(),
            scheduled_start: "2030-01-01T10:00".to_string(),
            scheduled_end: "2030-01-01T11:30".to_string(),
            course: CourseLink { id: 7 },
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "LIVE");
        assert_eq!(value["discountPercentage"], 10.0);
        assert_eq!(value["durationInMinutes"], 90);
        assert_eq!(value["scheduledStart"], "2030-01-01T10:00");
        assert_eq!(value["course"], json!({"id": 7}));
        assert!(value.get("test_type").is_none());
    }

    #[test]
    fn test_record_ids_accept_numbers_and_strings() {
        let numeric = Record::from_value(Entity::Banner, json!({"id": 12, "title": "a"})).unwrap();
        let Record::Banner(banner) = numeric else { panic!("expected banner") };
        assert_eq!(banner.id.as_deref(), Some("12"));

        let text = Record::from_value(Entity::Course, json!({"id": "c-9", "name": "x"})).unwrap();
        let Record::Course(course) = text else { panic!("expected course") };
        assert_eq!(course.id.as_deref(), Some("c-9"));
    }

    #[test]
    fn test_record_nulls_become_defaults() {
        let record = Record::from_value(
            Entity::Course,
            json!({"id": 1, "name": null, "tags": null, "price": null}),
        )
        .unwrap();
        let Record::Course(course) = record else { panic!("expected course") };
        assert_eq!(course.name, "");
        assert!(course.tags.is_empty());
        assert_eq!(course.price, None);
    }

    #[test]
    fn test_record_numbers_accept_floats_and_strings() {
        let record = Record::from_value(
            Entity::Test,
            json!({
                "id": 3,
                "price": "199",
                "discountPercentage": 12.5,
                "durationInMinutes": 90.0
            }),
        )
        .unwrap();
        let Record::Test(test) = record else { panic!("expected test") };
        assert_eq!(test.price, Some(199.0));
        assert_eq!(test.discount_percentage, Some(12.5));
        assert_eq!(test.duration_in_minutes, Some(90));

        let record = Record::from_value(
            Entity::Test,
            json!({"durationInMinutes": "45", "price": "free"}),
        )
        .unwrap();
        let Record::Test(test) = record else { panic!("expected test") };
        assert_eq!(test.duration_in_minutes, Some(45));
        assert_eq!(test.price, None);

        let record = Record::from_value(Entity::Course, json!({"discountPercentage": "5"})).unwrap();
        let Record::Course(course) = record else { panic!("expected course") };
        assert_eq!(course.discount_percentage, Some(5.0));
    }

    #[test]
    fn test_listing_accepts_envelope_and_array() {
        let paged: ListingBody = serde_json::from_value(json!({
            "content": [{"id": 1}, {"id": 2}],
            "totalPages": 3,
            "totalElements": 25
        }))
        .unwrap();
        let listing = Listing::from(paged);
        assert_eq!(listing.items.len(), 2);
        assert_eq!(listing.total_pages, 3);
        assert_eq!(listing.total_elements, 25);

        let plain: ListingBody = serde_json::from_value(json!([{"id": 1}])).unwrap();
        let listing = Listing::from(plain);
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.total_pages, 0);
    }

    #[test]
    fn test_image_upload_rejects_non_images() {
        let err = ImageUpload::from_bytes("notes.txt".to_string(), b"hello".to_vec()).unwrap_err();
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn test_image_upload_detects_png() {
        let png_header = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        let upload = ImageUpload::from_bytes("logo.png".to_string(), png_header).unwrap();
        assert_eq!(upload.mime, "image/png");
    }

    #[test]
    fn test_status_error_display() {
        let err = ApiStatusError {
            status: 404,
            reason: "Not Found".to_string(),
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found");
    }

    #[test]
    fn test_lookup_paths_differ_per_screen() {
        assert_eq!(lookup_path(Entity::Banner, EndpointGroup::Delete, "3"), "banner/3");
        assert_eq!(
            lookup_path(Entity::Banner, EndpointGroup::Modify, "3"),
            "banner/getbannerbyid/3"
        );
        assert_eq!(lookup_path(Entity::Test, EndpointGroup::Delete, "3"), "fetch/testbyId/3");
        assert_eq!(
            lookup_path(Entity::Test, EndpointGroup::Modify, "3"),
            "tests/gettestbyid/3"
        );
    }
}
