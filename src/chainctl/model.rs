use crate::error::{ChainError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A chain's configuration document. Always a JSON object once decoded.
pub type ConfigDocument = serde_json::Map<String, serde_json::Value>;

pub const DEFAULT_CHAIN_TYPE: &str = "solana";

/// The namespace a chain lives under, e.g. `/v2/chains/solana`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainType(String);

impl ChainType {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// JSON:API `type` member the backend uses for resources of this namespace.
    pub fn resource_kind(&self) -> String {
        format!("{}_chain", self.0)
    }

    pub fn collection_path(&self) -> String {
        format!("/v2/chains/{}", self.0)
    }

    /// Path of a single chain. The id is percent-encoded as one path segment.
    pub fn resource_path(&self, id: &str) -> String {
        format!("/v2/chains/{}/{}", self.0, urlencoding::encode(id))
    }
}

impl Default for ChainType {
    fn default() -> Self {
        ChainType(DEFAULT_CHAIN_TYPE.to_string())
    }
}

impl FromStr for ChainType {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ChainError::validation("chain type cannot be empty"));
        }
        let valid = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ChainError::validation(format!(
                "invalid chain type: {}",
                name
            )));
        }
        Ok(ChainType(name.to_lowercase()))
    }
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A chain as exposed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainResource {
    pub id: String,
    pub enabled: bool,
    pub config: ConfigDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChainResource {
    pub fn new(id: impl Into<String>, config: ConfigDocument) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            enabled: true,
            config,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_resource_object(&self, kind: &str) -> ResourceObject {
        ResourceObject {
            kind: kind.to_string(),
            id: self.id.clone(),
            attributes: ChainAttributes {
                enabled: self.enabled,
                config: self.config.clone(),
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}

impl From<ResourceObject> for ChainResource {
    fn from(object: ResourceObject) -> Self {
        Self {
            id: object.id,
            enabled: object.attributes.enabled,
            config: object.attributes.config,
            created_at: object.attributes.created_at,
            updated_at: object.attributes.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// One page of a chain listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePage {
    pub resources: Vec<ChainResource>,
    /// The page that was requested; 0 means the backend default.
    pub page: u32,
    pub links: PageLinks,
    pub count: Option<u64>,
}

impl ResourcePage {
    pub fn has_next(&self) -> bool {
        self.links.next.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.links.prev.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// The page number to request for the next page, if there is one.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page.max(1) + 1)
    }
}

// --- JSON:API wire types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<D> {
    pub data: D,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<DocumentMeta>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub attributes: ChainAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainAttributes {
    pub enabled: bool,
    #[serde(default)]
    pub config: ConfigDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorObject {
    pub detail: String,
}

/// Body of `POST /v2/chains/{type}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChainRequest {
    #[serde(rename = "chainID")]
    pub chain_id: String,
    pub config: serde_json::Value,
}

/// Body of `PATCH /v2/chains/{type}/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateChainRequest {
    pub enabled: bool,
    pub config: ConfigDocument,
}
