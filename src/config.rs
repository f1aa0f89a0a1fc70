use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::{Entity, PAGE_SIZES};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub endpoints: Endpoints,
    /// When set, every endpoint group talks to this host instead
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "123".to_string(),
        }
    }
}

/// Which screen family an endpoint host serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointGroup {
    Create,
    Modify,
    Delete,
    List,
}

/// Backend hosts per entity and screen family.
///
/// The deployed backends are not unified, so each group keeps its own host.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub banner_create: String,
    pub banner_modify: String,
    pub banner_delete: String,
    pub banner_list: String,
    pub course_create: String,
    pub course_modify: String,
    pub course_delete: String,
    pub course_list: String,
    pub test_create: String,
    pub test_modify: String,
    pub test_delete: String,
    pub test_list: String,
}

const PUBLIC_HTTP: &str = "http://www.srv620732.hstgr.cloud";
const PUBLIC_HTTPS: &str = "https://www.srv620732.hstgr.cloud";
const LOCAL: &str = "http://localhost:8080";
const BANNER_DELETE_HOST: &str = "http://88.222.214.204:8085";

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            banner_create: PUBLIC_HTTP.to_string(),
            banner_modify: LOCAL.to_string(),
            banner_delete: BANNER_DELETE_HOST.to_string(),
            banner_list: PUBLIC_HTTPS.to_string(),
            course_create: PUBLIC_HTTPS.to_string(),
            course_modify: PUBLIC_HTTPS.to_string(),
            course_delete: PUBLIC_HTTP.to_string(),
            course_list: PUBLIC_HTTPS.to_string(),
            test_create: LOCAL.to_string(),
            test_modify: LOCAL.to_string(),
            test_delete: LOCAL.to_string(),
            test_list: PUBLIC_HTTPS.to_string(),
        }
    }
}

impl Endpoints {
    /// Every group pointed at one host
    pub fn unified(base_url: &str) -> Self {
        let host = base_url.trim_end_matches('/').to_string();
        Self {
            banner_create: host.clone(),
            banner_modify: host.clone(),
            banner_delete: host.clone(),
            banner_list: host.clone(),
            course_create: host.clone(),
            course_modify: host.clone(),
            course_delete: host.clone(),
            course_list: host.clone(),
            test_create: host.clone(),
            test_modify: host.clone(),
            test_delete: host.clone(),
            test_list: host,
        }
    }

    pub fn host(&self, entity: Entity, group: EndpointGroup) -> &str {
        let host = match (entity, group) {
            (Entity::Banner, EndpointGroup::Create) => &self.banner_create,
            (Entity::Banner, EndpointGroup::Modify) => &self.banner_modify,
            (Entity::Banner, EndpointGroup::Delete) => &self.banner_delete,
            (Entity::Banner, EndpointGroup::List) => &self.banner_list,
            (Entity::Course, EndpointGroup::Create) => &self.course_create,
            (Entity::Course, EndpointGroup::Modify) => &self.course_modify,
            (Entity::Course, EndpointGroup::Delete) => &self.course_delete,
            (Entity::Course, EndpointGroup::List) => &self.course_list,
            (Entity::Test, EndpointGroup::Create) => &self.test_create,
            (Entity::Test, EndpointGroup::Modify) => &self.test_modify,
            (Entity::Test, EndpointGroup::Delete) => &self.test_delete,
            (Entity::Test, EndpointGroup::List) => &self.test_list,
        };
        host.trim_end_matches('/')
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            endpoints: Endpoints::default(),
            base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            default_page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Parse a YAML config document and check its values
    pub fn from_yaml(source: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(source).context("Invalid config file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&source)
    }

    fn validate(&self) -> Result<()> {
        if !PAGE_SIZES.contains(&self.default_page_size) {
            anyhow::bail!(
                "default_page_size must be one of {:?}, got {}",
                PAGE_SIZES,
                self.default_page_size
            );
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero");
        }
        if self.credentials.username.is_empty() {
            anyhow::bail!("credentials.username must not be empty");
        }
        Ok(())
    }

    /// Endpoint hosts after applying the `base_url` override
    pub fn resolved_endpoints(&self) -> Endpoints {
        match &self.base_url {
            Some(base_url) if !base_url.is_empty() => Endpoints::unified(base_url),
            _ => self.endpoints.clone(),
        }
    }
}
