//! FIX schema model types and loading.
//!
//! The generator never parses a FIX dictionary itself. It consumes a model
//! that has already been built elsewhere: per message type, the repeating
//! groups the message declares, plus an ordered map of message types that
//! decides which artifacts are produced.
//!
//! [`SchemaFile`] is a JSON-backed [`SchemaModel`] holding one such model per
//! FIX version. Key order in the document is preserved, so iteration order of
//! every map equals document order.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Reserved pseudo message type whose groups are shared by every message.
pub const HEADER: &str = "HEADER";

/// Immutable descriptor of one repeating group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatingGroupBuilder {
    group_id: String,
    delimiter: String,
    members: Vec<String>,
}

impl RepeatingGroupBuilder {
    /// Build a group descriptor. `members` keeps declaration order.
    pub fn new(
        group_id: impl Into<String>,
        delimiter: impl Into<String>,
        members: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            delimiter: delimiter.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Tag of the NumInGroup field that identifies the group (e.g. `"627"`).
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Tag of the field that starts every repetition.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Member field tags in declaration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }
}

/// Groups of one message type keyed by group id.
pub type GroupMap = IndexMap<String, RepeatingGroupBuilder>;

/// Message type → group id → group descriptor.
///
/// The [`HEADER`] entry holds groups of the standard header.
#[derive(Debug, Clone, Default)]
pub struct RepeatingGroupBuilderMap {
    groups: IndexMap<String, GroupMap>,
}

impl RepeatingGroupBuilderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group under `msg_type`, replacing any group with the same id.
    pub fn insert(&mut self, msg_type: impl Into<String>, group: RepeatingGroupBuilder) {
        self.groups
            .entry(msg_type.into())
            .or_default()
            .insert(group.group_id.clone(), group);
    }

    /// Groups native to `msg_type`, if it declares any.
    pub fn groups_for(&self, msg_type: &str) -> Option<&GroupMap> {
        self.groups.get(msg_type)
    }

    /// Groups of the standard header, if any.
    pub fn header_groups(&self) -> Option<&GroupMap> {
        self.groups_for(HEADER)
    }

    /// Iterate `(msg_type, groups)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupMap)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Opaque per-message context. Only its presence matters to the emitter.
pub type MessageContext = serde_json::Map<String, serde_json::Value>;

/// Ordered map of message types. Its key order drives artifact order.
#[derive(Debug, Clone, Default)]
pub struct ContextOrderMap {
    messages: IndexMap<String, MessageContext>,
}

impl ContextOrderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, msg_type: impl Into<String>, ctx: MessageContext) {
        self.messages.insert(msg_type.into(), ctx);
    }

    /// Message types in iteration order.
    pub fn message_types(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn get(&self, msg_type: &str) -> Option<&MessageContext> {
        self.messages.get(msg_type)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Read-only provider of the per-version schema model.
pub trait SchemaModel {
    /// Repeating groups for every message type of `version`.
    fn repeating_group_map(&self, version: &str) -> Result<&RepeatingGroupBuilderMap>;

    /// Message types of `version` in artifact order.
    fn context_order_map(&self, version: &str) -> Result<&ContextOrderMap>;
}

/// Schema model for a single FIX version.
#[derive(Debug, Clone, Default)]
pub struct VersionModel {
    pub groups: RepeatingGroupBuilderMap,
    pub messages: ContextOrderMap,
}

/// JSON-backed schema model holding one [`VersionModel`] per FIX version.
#[derive(Debug, Clone, Default)]
pub struct SchemaFile {
    versions: IndexMap<String, VersionModel>,
}

impl SchemaFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the model for `version`.
    pub fn insert_version(&mut self, version: impl Into<String>, model: VersionModel) {
        self.versions.insert(version.into(), model);
    }

    /// FIX versions present, in document order.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(String::as_str)
    }

    /// Parse a schema document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSchemaFile = serde_json::from_str(json)?;
        raw.try_into_schema()
    }

    fn version(&self, version: &str) -> Result<&VersionModel> {
        self.versions
            .get(version)
            .ok_or_else(|| Error::VersionNotFound {
                version: version.to_string(),
                available: self.versions().collect::<Vec<_>>().join(", "),
            })
    }
}

impl SchemaModel for SchemaFile {
    fn repeating_group_map(&self, version: &str) -> Result<&RepeatingGroupBuilderMap> {
        Ok(&self.version(version)?.groups)
    }

    fn context_order_map(&self, version: &str) -> Result<&ContextOrderMap> {
        Ok(&self.version(version)?.messages)
    }
}

/// Load a schema model document from disk.
pub fn load_schema(path: &Path) -> Result<SchemaFile> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    SchemaFile::from_json(&content)
}

// ── On-disk representation ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawSchemaFile {
    versions: IndexMap<String, RawVersion>,
}

#[derive(Debug, Deserialize)]
struct RawVersion {
    #[serde(default)]
    groups: IndexMap<String, IndexMap<String, RawGroup>>,
    #[serde(default)]
    messages: IndexMap<String, MessageContext>,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    delimiter: String,
    #[serde(default)]
    members: Vec<String>,
}

impl RawSchemaFile {
    fn try_into_schema(self) -> Result<SchemaFile> {
        let mut schema = SchemaFile::new();
        for (version, raw) in self.versions {
            let mut groups = RepeatingGroupBuilderMap::new();
            for (msg_type, msg_groups) in raw.groups {
                for (group_id, group) in msg_groups {
                    if group.delimiter.is_empty() {
                        return Err(Error::Schema(format!(
                            "group '{group_id}' of message type '{msg_type}' in FIX {version} has no delimiter"
                        )));
                    }
                    groups.insert(
                        msg_type.clone(),
                        RepeatingGroupBuilder::new(group_id, group.delimiter, group.members),
                    );
                }
            }
            let mut messages = ContextOrderMap::new();
            for (msg_type, ctx) in raw.messages {
                messages.insert(msg_type, ctx);
            }
            schema.insert_version(version, VersionModel { groups, messages });
        }
        Ok(schema)
    }
}
