//! Contact graph types and data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::spam::SpamVerdict;
use crate::velocity::Velocity;

/// Direction of a message relative to the account owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    /// The owner sent this message to the contact.
    Sent,
    /// The owner received this message from the contact.
    Received,
}

/// One recorded message event on a contact's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,
}

/// Canonical contact entity, one per real-world correspondent.
///
/// `email` is the canonical key. `last_contacted` always equals the maximum
/// date across `interactions`; `interactions` is append-only during
/// aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contacted: Option<DateTime<Utc>>,
    pub interactions: Vec<Interaction>,
    #[serde(default)]
    pub velocity: Velocity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spam: Option<SpamVerdict>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub custom_fields: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl Contact {
    pub fn new(email: String) -> Self {
        Self {
            email,
            name: String::new(),
            company: None,
            industry: None,
            last_contacted: None,
            interactions: Vec::new(),
            velocity: Velocity::default(),
            spam: None,
            custom_fields: HashMap::new(),
            tags: Vec::new(),
            notes: String::new(),
        }
    }
}

/// Raw address headers of one message. Values are present-but-possibly-
/// malformed strings owned by the ingestion collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageHeaders {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub cc: String,
    #[serde(default)]
    pub bcc: String,
    #[serde(default)]
    pub date: String,
}

/// One message-metadata record as delivered by the ingestion collaborator.
/// Never mutated by the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    pub headers: MessageHeaders,
}
