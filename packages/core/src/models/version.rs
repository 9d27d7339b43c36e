//! Node Versions
//!
//! Versioned snapshots of translatable content. A translation links to the
//! version that is currently public; older and draft versions keep the
//! history.

use super::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VersionType {
    #[default]
    Public,
    Draft,
}

impl VersionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionType::Public => "public",
            VersionType::Draft => "draft",
        }
    }
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(VersionType::Public),
            "draft" => Ok(VersionType::Draft),
            other => Err(ValidationError::InvalidVersionType(other.to_string())),
        }
    }
}

/// Snapshot of a content entity attached to a translation.
///
/// `ref_entity_name` and `ref_id` identify the content the snapshot was taken
/// from; `origin_id` points at the version it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeVersion {
    pub id: i64,
    pub node_translation_id: i64,
    pub owner: String,
    pub ref_id: i64,
    pub ref_entity_name: String,
    pub version_type: VersionType,
    pub origin_id: Option<i64>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Parameters for inserting a version row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNodeVersion {
    pub node_translation_id: i64,
    pub owner: String,
    pub ref_id: i64,
    pub ref_entity_name: String,
    pub version_type: VersionType,
    pub origin_id: Option<i64>,
}
