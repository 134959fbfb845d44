use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::{NewPerson, Person};

/// Failures reported by a store adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A field validator rejected the record; the message is safe to echo to clients.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Port for the domain layer: persistence operations the phonebook needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait PersonsRepository: Send + Sync {
    /// All persons, in no particular order.
    async fn list_all(&self) -> Result<Vec<Person>, StoreError>;
    async fn count(&self) -> Result<u64, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>, StoreError>;
    /// First person whose name equals `name` exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<Person>, StoreError>;
    /// Persist a new person; the store assigns the identifier.
    async fn insert(&self, new_person: NewPerson) -> Result<Person, StoreError>;
    /// Replace the number of an existing person, running field validators.
    /// Returns `None` if no person has this id.
    async fn update_number(&self, id: Uuid, number: &str) -> Result<Option<Person>, StoreError>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
