use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{NewPerson, Person, PhonebookInfo};
use crate::domain::error::DomainError;
use crate::domain::repo::PersonsRepository;

/// Domain service with the phonebook rules.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn PersonsRepository>,
}

impl Service {
    /// Create a service over an injected store handle.
    pub fn new(repo: Arc<dyn PersonsRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "phonebook.service.list_persons", skip(self))]
    pub async fn list_persons(&self) -> Result<Vec<Person>, DomainError> {
        let persons = self.repo.list_all().await?;
        debug!("Listed {} persons", persons.len());
        Ok(persons)
    }

    #[instrument(name = "phonebook.service.info", skip(self))]
    pub async fn info(&self) -> Result<PhonebookInfo, DomainError> {
        let count = self.repo.count().await?;
        Ok(PhonebookInfo {
            count,
            generated_at: Utc::now(),
        })
    }

    #[instrument(name = "phonebook.service.get_person", skip(self))]
    pub async fn get_person(&self, raw_id: &str) -> Result<Person, DomainError> {
        let id = parse_id(raw_id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::person_not_found(id))
    }

    /// Delete by id. Succeeds whether or not the person existed.
    #[instrument(name = "phonebook.service.delete_person", skip(self))]
    pub async fn delete_person(&self, raw_id: &str) -> Result<(), DomainError> {
        let id = parse_id(raw_id)?;
        let deleted = self.repo.delete(id).await?;
        if deleted {
            info!(person_id = %id, "Deleted person");
        } else {
            debug!(person_id = %id, "Delete of absent person is a no-op");
        }
        Ok(())
    }

    /// Create a person, or update the number of the person that already has this name.
    ///
    /// The lookup and the write are separate store calls with no isolation:
    /// two concurrent calls for an unseen name can both create a record.
    #[instrument(
        name = "phonebook.service.upsert_person",
        skip(self, input),
        fields(name = %input.name)
    )]
    pub async fn upsert_person(&self, input: NewPerson) -> Result<Person, DomainError> {
        validate_input(&input)?;

        match self.repo.find_by_name(&input.name).await? {
            Some(existing) => {
                let updated = self
                    .repo
                    .update_number(existing.id, &input.number)
                    .await?
                    .ok_or_else(|| DomainError::person_not_found(existing.id))?;
                info!(person_id = %updated.id, "Updated number of existing person");
                Ok(updated)
            }
            None => {
                let created = self.repo.insert(input).await?;
                info!(person_id = %created.id, "Created person");
                Ok(created)
            }
        }
    }
}

/// Parse an identifier in the store's format (hyphenated or simple UUID).
pub fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::invalid_identifier(raw))
}

fn validate_input(input: &NewPerson) -> Result<(), DomainError> {
    let missing: Vec<&str> = [("name", &input.name), ("number", &input.number)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DomainError::missing_fields(&missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_uuid_and_rejects_garbage() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert_eq!(parse_id(&id.simple().to_string()).unwrap(), id);

        match parse_id("5c41c90e84d891c15dfa3431") {
            Err(DomainError::InvalidIdentifier { raw }) => {
                assert_eq!(raw, "5c41c90e84d891c15dfa3431")
            }
            other => panic!("expected InvalidIdentifier, got {other:?}"),
        }
    }

    #[test]
    fn validate_input_names_missing_fields() {
        let ok = NewPerson {
            name: "Ada".into(),
            number: "123".into(),
        };
        assert!(validate_input(&ok).is_ok());

        let no_number = NewPerson {
            name: "Bob".into(),
            number: String::new(),
        };
        assert_eq!(
            validate_input(&no_number).unwrap_err().to_string(),
            "number missing"
        );

        assert_eq!(
            validate_input(&NewPerson::default())
                .unwrap_err()
                .to_string(),
            "name and number missing"
        );
    }
}
