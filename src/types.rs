// src/types.rs
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payment-requirement descriptor, kept as an opaque JSON object.
pub type PaymentRequirements = Map<String, Value>;

/// One discovered endpoint as served by the facilitator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    #[serde(rename = "resource")]
    pub resource_url: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    /// RFC 3339; a timestamp without offset is rejected at decode time.
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<FixedOffset>,
    #[serde(rename = "x402Version")]
    pub protocol_version: u32,
    pub accepts: Vec<PaymentRequirements>,
    /// `None` when the facilitator sent no metadata; `Some(empty)` for `{}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Snapshot returned by one list call, in the order received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceListing {
    items: Vec<ResourceRecord>,
}

impl ResourceListing {
    pub fn new(items: Vec<ResourceRecord>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceRecord> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[ResourceRecord] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<ResourceRecord> {
        self.items
    }
}

impl IntoIterator for ResourceListing {
    type Item = ResourceRecord;
    type IntoIter = std::vec::IntoIter<ResourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResourceListing {
    type Item = &'a ResourceRecord;
    type IntoIter = std::slice::Iter<'a, ResourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Server-side paging info. Logged only; the client keeps no paging state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub(crate) struct Pagination {
    pub limit: u64,
    pub offset: u64,
    pub total: u64,
}

/// Wire envelope of `GET /discovery/resources`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(rename = "x402Version", default)]
    pub x402_version: Option<u32>,
    pub items: Vec<ResourceRecord>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}
