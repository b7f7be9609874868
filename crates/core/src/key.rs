//! Wire key types
//!
//! A [`Key`] addresses one entity: a partition (project + optional namespace)
//! and an ordered, non-empty path of `(kind, id | name)` elements. The JSON
//! shape matches the datastore REST API:
//!
//! ```json
//! {"partitionId": {"projectId": "p", "namespaceId": "ns"},
//!  "path": [{"kind": "Parent", "name": "a"}, {"kind": "Child", "id": "42"}]}
//! ```
//!
//! ## Namespace normalization
//!
//! The API treats an absent `namespaceId` and `namespaceId: ""` as the same
//! default namespace. [`PartitionId`] folds `""` to `None` on construction and
//! on deserialization so that equal keys compare equal.
//!
//! ## Incomplete keys
//!
//! A path element with a kind but neither id nor name (`{"kind": "Task"}`)
//! asks the server to allocate an id on insert. Such keys travel on the
//! wire but have no key expression form.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Project and namespace a key lives in
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionId {
    /// Project identifier
    #[serde(default)]
    pub project_id: String,
    /// Namespace; `None` is the default namespace
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_namespace"
    )]
    pub namespace_id: Option<String>,
}

impl PartitionId {
    /// Create a partition, folding an empty namespace into the default one
    pub fn new(project_id: impl Into<String>, namespace_id: Option<&str>) -> Self {
        Self {
            project_id: project_id.into(),
            namespace_id: normalize_namespace(namespace_id).map(str::to_string),
        }
    }
}

/// Fold the empty-string namespace into `None`
pub fn normalize_namespace(namespace: Option<&str>) -> Option<&str> {
    namespace.filter(|ns| !ns.is_empty())
}

fn deserialize_namespace<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let namespace = Option::<String>::deserialize(deserializer)?;
    Ok(namespace.filter(|ns| !ns.is_empty()))
}

/// Identifier of one path element: numeric id or string name, never both
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathId {
    /// Numeric id as an unsigned decimal string (may exceed 64 bits)
    Id(String),
    /// String name
    Name(String),
}

/// One `(kind, identifier)` step of a key path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPathElement", into = "RawPathElement")]
pub struct PathElement {
    /// Kind name
    pub kind: String,
    /// Id or name; `None` until the server allocates one
    pub id: Option<PathId>,
}

impl PathElement {
    /// Path element with a numeric id
    pub fn with_id(kind: impl Into<String>, id: impl fmt::Display) -> Self {
        Self {
            kind: kind.into(),
            id: Some(PathId::Id(id.to_string())),
        }
    }

    /// Path element with a string name
    pub fn with_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: Some(PathId::Name(name.into())),
        }
    }

    /// Path element awaiting an allocated id
    pub fn incomplete(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
        }
    }
}

/// Wire shape of a path element: `id` and `name` are sibling optional fields
#[derive(Serialize, Deserialize)]
struct RawPathElement {
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl TryFrom<RawPathElement> for PathElement {
    type Error = String;

    fn try_from(raw: RawPathElement) -> Result<Self, Self::Error> {
        let id = match (raw.id, raw.name) {
            (Some(_), Some(_)) => {
                return Err(format!("path element {} has both id and name", raw.kind))
            }
            (Some(id), None) => Some(PathId::Id(id)),
            (None, Some(name)) => Some(PathId::Name(name)),
            (None, None) => None,
        };
        Ok(Self { kind: raw.kind, id })
    }
}

impl From<PathElement> for RawPathElement {
    fn from(element: PathElement) -> Self {
        let (id, name) = match element.id {
            Some(PathId::Id(id)) => (Some(id), None),
            Some(PathId::Name(name)) => (None, Some(name)),
            None => (None, None),
        };
        Self {
            kind: element.kind,
            id,
            name,
        }
    }
}

/// Entity key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    /// Partition the key belongs to
    pub partition_id: PartitionId,
    /// Ancestor path, root first
    pub path: Vec<PathElement>,
}

impl Key {
    /// Create a key from a partition and path
    pub fn new(partition_id: PartitionId, path: Vec<PathElement>) -> Self {
        Self { partition_id, path }
    }

    /// Single-element key with a numeric id
    pub fn with_id(partition_id: PartitionId, kind: impl Into<String>, id: impl fmt::Display) -> Self {
        Self::new(partition_id, vec![PathElement::with_id(kind, id)])
    }

    /// Single-element key with a string name
    pub fn with_name(
        partition_id: PartitionId,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::new(partition_id, vec![PathElement::with_name(kind, name)])
    }

    /// Single-element key whose id the server allocates on insert
    pub fn incomplete(partition_id: PartitionId, kind: impl Into<String>) -> Self {
        Self::new(partition_id, vec![PathElement::incomplete(kind)])
    }

    /// Whether every path element carries an id or name
    pub fn is_complete(&self) -> bool {
        self.path.iter().all(|e| e.id.is_some())
    }

    /// Key of a child entity in the same partition
    pub fn child(&self, element: PathElement) -> Self {
        let mut path = self.path.clone();
        path.push(element);
        Self::new(self.partition_id.clone(), path)
    }

    /// Kind of the addressed entity (last path element)
    pub fn kind(&self) -> Option<&str> {
        self.path.last().map(|e| e.kind.as_str())
    }

    /// Namespace, with `None` for the default namespace
    pub fn namespace(&self) -> Option<&str> {
        normalize_namespace(self.partition_id.namespace_id.as_deref())
    }

    /// Short display form of the last element's identifier
    ///
    /// Names are double-quoted, ids are shown bare. An incomplete last
    /// element has no identifier to show.
    pub fn display_id(&self) -> Option<String> {
        self.path.last()?.id.as_ref().map(|id| match id {
            PathId::Id(id) => id.clone(),
            PathId::Name(name) => format!("\"{}\"", name),
        })
    }
}
