//! Admin operations over a datastore backend
//!
//! | Operation | API call |
//! |-----------|----------|
//! | [`namespaces`](DatastoreClient::namespaces) | `runQuery` on `__namespace__` |
//! | [`kinds`](DatastoreClient::kinds) | `runQuery` on `__kind__` |
//! | [`entities`](DatastoreClient::entities) | paged `runQuery` |
//! | [`gql_query`](DatastoreClient::gql_query) | `runQuery` with GQL |
//! | [`lookup`](DatastoreClient::lookup) | `lookup` |
//! | [`insert`](DatastoreClient::insert) / [`update`](DatastoreClient::update) / [`delete`](DatastoreClient::delete) | `commit` |
//! | [`import`](DatastoreClient::import) | `import` |
//! | [`export`](DatastoreClient::export) | `export` |

use crate::backend::{DatastoreBackend, QueryBackend};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::HttpBackend;
use crate::pager::{PageRequest, PagerConfig, QueryPager};
use crate::request::{
    CommitRequest, ExportRequest, ImportRequest, LookupRequest, Mutation, Query, RunQueryRequest,
};
use dsadmin_core::{Entity, Key, PathId};
use tracing::debug;

const NAMESPACE_KIND: &str = "__namespace__";
const KIND_KIND: &str = "__kind__";

/// Admin client bound to one project
pub struct DatastoreClient<B> {
    backend: B,
    project: String,
    pager: PagerConfig,
}

impl DatastoreClient<HttpBackend> {
    /// HTTP client from config
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the config is incomplete.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let backend = HttpBackend::new(config)?;
        Ok(Self::with_backend(backend, config.project.clone(), config.pager))
    }
}

impl<B> DatastoreClient<B> {
    /// Client over any backend
    pub fn with_backend(backend: B, project: impl Into<String>, pager: PagerConfig) -> Self {
        Self {
            backend,
            project: project.into(),
            pager,
        }
    }

    /// Project id, the ambient project for key expressions
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: QueryBackend> DatastoreClient<B> {
    /// All namespaces; `None` is the default namespace
    ///
    /// Always returns at least the default namespace.
    pub async fn namespaces(&self) -> Result<Vec<Option<String>>> {
        let entities = self.query_all(None, NAMESPACE_KIND).await?;
        let mut namespaces: Vec<Option<String>> = entities
            .iter()
            .map(|e| root_name(&e.key).filter(|n| !n.is_empty()))
            .collect();
        if namespaces.is_empty() {
            namespaces.push(None);
        }
        Ok(namespaces)
    }

    /// Kinds present in a namespace
    pub async fn kinds(&self, namespace: Option<&str>) -> Result<Vec<String>> {
        let entities = self.query_all(namespace, KIND_KIND).await?;
        Ok(entities.iter().filter_map(|e| root_name(&e.key)).collect())
    }

    /// One page of entities
    pub async fn entities(&self, request: &PageRequest) -> Result<Vec<Entity>> {
        QueryPager::with_config(&self.backend, self.pager)
            .fetch_page(request)
            .await
    }

    /// Run a GQL query (single batch)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty query string.
    pub async fn gql_query(&self, query: &str, namespace: Option<&str>) -> Result<Vec<Entity>> {
        if query.trim().is_empty() {
            return Err(Error::invalid_input("empty GQL query"));
        }
        debug!(target: "dsadmin::query", query, "Running GQL query");
        let response = self
            .backend
            .run_query(&RunQueryRequest::gql(namespace, query))
            .await?;
        Ok(response
            .batch
            .entity_results
            .into_iter()
            .map(|r| r.entity)
            .collect())
    }

    async fn query_all(&self, namespace: Option<&str>, kind: &str) -> Result<Vec<Entity>> {
        let response = self
            .backend
            .run_query(&RunQueryRequest::structured(namespace, Query::kind(kind)))
            .await?;
        Ok(response
            .batch
            .entity_results
            .into_iter()
            .map(|r| r.entity)
            .collect())
    }
}

impl<B: DatastoreBackend> DatastoreClient<B> {
    /// Fetch one entity by key
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntityNotFound`] if the key has no entity.
    pub async fn lookup(&self, key: &Key) -> Result<Entity> {
        let response = self
            .backend
            .lookup(&LookupRequest {
                keys: vec![key.clone()],
            })
            .await?;
        response
            .found
            .into_iter()
            .next()
            .map(|r| r.entity)
            .ok_or(Error::EntityNotFound)
    }

    /// Create an entity, returning it with the key the server assigned
    ///
    /// Pass an incomplete key ([`Key::incomplete`]) to have the server
    /// allocate the id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the key was incomplete and the
    /// commit did not report an allocated one.
    pub async fn insert(&self, entity: Entity) -> Result<Entity> {
        self.write_one(entity, Mutation::Insert).await
    }

    /// Replace an existing entity
    pub async fn update(&self, entity: Entity) -> Result<Entity> {
        self.write_one(entity, Mutation::Update).await
    }

    /// Delete entities by key
    pub async fn delete(&self, keys: &[Key]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mutations = keys.iter().cloned().map(Mutation::Delete).collect();
        self.backend
            .commit(&CommitRequest::non_transactional(mutations))
            .await?;
        debug!(target: "dsadmin::query", count = keys.len(), "Deleted entities");
        Ok(())
    }

    async fn write_one(&self, entity: Entity, mutation: fn(Entity) -> Mutation) -> Result<Entity> {
        let response = self
            .backend
            .commit(&CommitRequest::non_transactional(vec![mutation(
                entity.clone(),
            )]))
            .await?;
        let key = response
            .mutation_results
            .into_iter()
            .next()
            .and_then(|r| r.key)
            .unwrap_or(entity.key);
        if !key.is_complete() {
            return Err(Error::Serialization {
                reason: "commit returned no allocated key".to_string(),
            });
        }
        Ok(Entity { key, ..entity })
    }

    /// Load a previous export into the project
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty URL.
    pub async fn import(&self, input_url: &str) -> Result<()> {
        if input_url.trim().is_empty() {
            return Err(Error::invalid_input("empty import URL"));
        }
        let operation = self
            .backend
            .import(&ImportRequest {
                input_url: input_url.to_string(),
            })
            .await?;
        debug!(target: "dsadmin::query", input_url, operation = ?operation.name, "Import started");
        Ok(())
    }

    /// Export all entities under a storage path, returning the export's URL
    ///
    /// The path is used as a directory prefix; a trailing `/` is added when
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty path and
    /// [`Error::Serialization`] if the response carries no output URL.
    pub async fn export(&self, output_path: &str) -> Result<String> {
        if output_path.trim().is_empty() {
            return Err(Error::invalid_input("empty export path"));
        }
        let mut output_url_prefix = output_path.to_string();
        if !output_url_prefix.ends_with('/') {
            output_url_prefix.push('/');
        }
        let operation = self
            .backend
            .export(&ExportRequest { output_url_prefix })
            .await?;
        let output_url = operation
            .response
            .and_then(|r| r.output_url)
            .ok_or_else(|| Error::Serialization {
                reason: "export response has no outputUrl".to_string(),
            })?;
        debug!(target: "dsadmin::query", output_url = %output_url, "Export finished");
        Ok(output_url)
    }
}

/// Name of the first path element, as used by metadata kinds
fn root_name(key: &Key) -> Option<String> {
    match &key.path.first()?.id {
        Some(PathId::Name(name)) => Some(name.clone()),
        Some(PathId::Id(_)) | None => None,
    }
}
