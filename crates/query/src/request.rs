//! Request and response bodies of the datastore REST API
//!
//! Every method is `POST {endpoint}/v1/projects/{project}:{method}` with a JSON
//! body:
//!
//! | Method | Request | Response |
//! |--------|---------|----------|
//! | `runQuery` | [`RunQueryRequest`] | [`RunQueryResponse`] |
//! | `lookup` | [`LookupRequest`] | [`LookupResponse`] |
//! | `commit` | [`CommitRequest`] | [`CommitResponse`] |
//! | `import` | [`ImportRequest`] | [`Operation`] |
//! | `export` | [`ExportRequest`] | [`Operation`] |

use dsadmin_core::{Entity, Key};
use serde::{Deserialize, Serialize};

// ============================================================================
// runQuery
// ============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

/// Sort on one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Property name
    pub property: String,
    /// Sort direction
    pub direction: Direction,
}

impl Order {
    /// Ascending order on `property`
    pub fn ascending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Ascending,
        }
    }

    /// Descending order on `property`
    pub fn descending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Descending,
        }
    }
}

/// Namespace selector sent with a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionRef {
    /// Namespace to query
    pub namespace_id: String,
}

/// Name wrapper used for kinds and properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    /// The name
    pub name: String,
}

/// Wire form of an [`Order`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyOrder {
    /// Property to sort on
    pub property: NameRef,
    /// Sort direction
    pub direction: Direction,
}

impl From<&Order> for PropertyOrder {
    fn from(order: &Order) -> Self {
        Self {
            property: NameRef {
                name: order.property.clone(),
            },
            direction: order.direction,
        }
    }
}

/// Structured query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Kinds to query (at most one is supported by the API)
    pub kind: Vec<NameRef>,
    /// Maximum number of results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of results to skip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Cursor to resume from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    /// Sort orders
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<PropertyOrder>,
}

impl Query {
    /// Unbounded query over one kind
    pub fn kind(kind: impl Into<String>) -> Self {
        Self {
            kind: vec![NameRef { name: kind.into() }],
            ..Self::default()
        }
    }
}

/// GQL query text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlQuery {
    /// Query string
    pub query_string: String,
    /// Allow literal values in the query string
    pub allow_literals: bool,
}

/// `runQuery` request: exactly one of `query` / `gql_query` is set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryRequest {
    /// Namespace; omitted for the default namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_id: Option<PartitionRef>,
    /// Structured query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    /// GQL query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gql_query: Option<GqlQuery>,
}

impl RunQueryRequest {
    /// Structured query in a namespace
    pub fn structured(namespace: Option<&str>, query: Query) -> Self {
        Self {
            partition_id: partition(namespace),
            query: Some(query),
            gql_query: None,
        }
    }

    /// GQL query in a namespace, literals allowed
    pub fn gql(namespace: Option<&str>, query_string: impl Into<String>) -> Self {
        Self {
            partition_id: partition(namespace),
            query: None,
            gql_query: Some(GqlQuery {
                query_string: query_string.into(),
                allow_literals: true,
            }),
        }
    }
}

fn partition(namespace: Option<&str>) -> Option<PartitionRef> {
    namespace.map(|ns| PartitionRef {
        namespace_id: ns.to_string(),
    })
}

/// Whether more results may follow a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoreResults {
    /// There may be more results after the batch's end cursor
    NotFinished,
    /// The query limit was reached
    MoreResultsAfterLimit,
    /// The query end cursor was reached
    MoreResultsAfterCursor,
    /// The query is exhausted
    NoMoreResults,
    /// Unspecified or unrecognized value
    #[default]
    #[serde(other)]
    MoreResultsTypeUnspecified,
}

impl MoreResults {
    /// Anything but `NOT_FINISHED` ends a paged fetch
    pub fn is_terminal(self) -> bool {
        self != MoreResults::NotFinished
    }
}

/// One entity in a result batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityResult {
    /// The entity
    pub entity: Entity,
}

/// One batch of query results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResultBatch {
    /// Entities, in server order
    #[serde(default)]
    pub entity_results: Vec<EntityResult>,
    /// Continuation status
    #[serde(default)]
    pub more_results: MoreResults,
    /// How much of the requested offset this batch consumed
    #[serde(default)]
    pub skipped_results: u32,
    /// Cursor after the last result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
}

/// `runQuery` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunQueryResponse {
    /// The result batch
    #[serde(default)]
    pub batch: QueryResultBatch,
}

// ============================================================================
// lookup
// ============================================================================

/// `lookup` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    /// Keys to fetch
    pub keys: Vec<Key>,
}

/// `lookup` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
    /// Entities that exist
    #[serde(default)]
    pub found: Vec<EntityResult>,
    /// Keys with no entity (as key-only entities)
    #[serde(default)]
    pub missing: Vec<EntityResult>,
}

// ============================================================================
// commit
// ============================================================================

/// Commit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitMode {
    /// Apply each mutation independently
    NonTransactional,
}

/// One write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mutation {
    /// Create; fails if the entity exists
    Insert(Entity),
    /// Replace; fails if the entity does not exist
    Update(Entity),
    /// Delete by key
    Delete(Key),
}

/// `commit` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRequest {
    /// Commit mode
    pub mode: CommitMode,
    /// Writes, applied in order
    pub mutations: Vec<Mutation>,
}

impl CommitRequest {
    /// Non-transactional commit of the given mutations
    pub fn non_transactional(mutations: Vec<Mutation>) -> Self {
        Self {
            mode: CommitMode::NonTransactional,
            mutations,
        }
    }
}

/// Result of one mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResult {
    /// Key allocated by the server, for inserts with incomplete keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
}

/// `commit` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    /// One result per mutation
    #[serde(default)]
    pub mutation_results: Vec<MutationResult>,
}

// ============================================================================
// import / export
// ============================================================================

/// `import` request: load a previous export into the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    /// Location of the export's overall metadata file
    pub input_url: String,
}

/// `export` request: dump the project's entities to storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Storage prefix the export is written under
    pub output_url_prefix: String,
}

/// Long-running operation returned by `import` and `export`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Server-assigned operation name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the operation has finished
    #[serde(default)]
    pub done: bool,
    /// Result payload once finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<OperationResult>,
}

/// Result payload of a finished operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    /// Location of the written export's metadata file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_url: Option<String>,
}
