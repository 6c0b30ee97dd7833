pub mod fetcher;
pub mod global_id;
pub mod models;
pub mod page_info;
pub mod paginator;
pub mod schema;

use thiserror::Error;
pub type GraphqlResult<T> = Result<T, GraphqlError>;

#[derive(Debug, Error)]
pub enum GraphqlError {
    #[error("Error building dynamic schema: {0:?}")]
    DynamicSchemaBuildError(#[from] async_graphql::dynamic::SchemaError),
    #[error("Unrecognized Field in {0:?}: {1:?}")]
    UnrecognizedField(String, String),
    #[error("Relation {0:?} expects a parent of type {1:?}")]
    ParentTypeMismatch(String, String),
    #[error("Invalid cursor: {0:?}")]
    InvalidCursor(String),
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),
    #[error("{0}")]
    RelationError(String),
}
