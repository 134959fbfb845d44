use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A phonebook entry as stored (no serde, transport types live in `api::rest::dto`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub number: String,
}

/// Data for creating a person or updating the number of an existing one
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewPerson {
    pub name: String,
    pub number: String,
}

/// Snapshot served by the info page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhonebookInfo {
    pub count: u64,
    pub generated_at: DateTime<Utc>,
}
