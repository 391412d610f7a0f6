use async_trait::async_trait;
use rolegraph_core::{AppError, AppResult};
use rolegraph_domain::Collection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Schemaless stored document keyed by its top-level `name` field.
pub type Document = Map<String, Value>;

/// Selection applied by [`DocumentRepository::find_all`].
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentFilter {
    /// Every document in the collection.
    All,
    /// The document with the given name.
    Name(String),
    /// Documents whose top-level field equals a value.
    FieldEquals {
        /// Top-level field name.
        field: String,
        /// Expected JSON value.
        value: Value,
    },
}

impl DocumentFilter {
    /// Matches documents whose `parent_role` equals the given role name.
    #[must_use]
    pub fn children_of(parent_role: &str) -> Self {
        Self::FieldEquals {
            field: "parent_role".to_owned(),
            value: Value::String(parent_role.to_owned()),
        }
    }

    /// Returns true when a document satisfies the filter.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Self::All => true,
            Self::Name(name) => {
                document.get("name").and_then(Value::as_str) == Some(name.as_str())
            }
            Self::FieldEquals { field, value } => document.get(field) == Some(value),
        }
    }
}

/// Persistence port over the named document collections.
///
/// Implementations enforce name uniqueness per collection themselves: a
/// racing duplicate insert or a rename onto an existing name must fail with
/// [`AppError::DuplicateName`].
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Finds one document by name.
    async fn find_by_name(
        &self,
        collection: Collection,
        name: &str,
    ) -> AppResult<Option<Document>>;

    /// Lists documents matching a filter, ordered by name.
    async fn find_all(
        &self,
        collection: Collection,
        filter: DocumentFilter,
    ) -> AppResult<Vec<Document>>;

    /// Inserts a document whose name is not taken yet.
    async fn insert_unique(&self, collection: Collection, document: Document) -> AppResult<()>;

    /// Merges top-level fields into a named document and returns the matched count.
    async fn update_by_name(
        &self,
        collection: Collection,
        name: &str,
        fields: Document,
    ) -> AppResult<u64>;

    /// Deletes a named document and returns the deleted count.
    async fn delete_by_name(&self, collection: Collection, name: &str) -> AppResult<u64>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> AppResult<()>;

    /// Returns a short backend label for health reporting.
    fn backend_name(&self) -> &'static str;
}

/// Returns the non-empty `name` field of a document.
pub fn document_name(document: &Document) -> AppResult<&str> {
    document
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation("document must contain a non-empty string 'name'".to_owned())
        })
}

pub(crate) fn encode_document<T: Serialize>(value: &T) -> AppResult<Document> {
    match serde_json::to_value(value) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(AppError::Internal(format!(
            "expected a JSON object document, got '{other}'"
        ))),
        Err(error) => Err(AppError::Internal(format!(
            "failed to encode document: {error}"
        ))),
    }
}

pub(crate) fn decode_document<T: DeserializeOwned>(
    collection: Collection,
    document: Document,
) -> AppResult<T> {
    let name = document
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
        .to_owned();

    serde_json::from_value(Value::Object(document)).map_err(|error| {
        AppError::Internal(format!(
            "stored {collection} document '{name}' is malformed: {error}"
        ))
    })
}
