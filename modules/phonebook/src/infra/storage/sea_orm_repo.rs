//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it can be built on a
//! `DatabaseConnection` or on a transaction.

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::contract::model::{NewPerson, Person};
use crate::domain::repo::{PersonsRepository, StoreError};
use crate::infra::storage::entity::{
    ActiveModel as PersonAM, Column, Entity as PersonEntity, VALIDATION_PREFIX,
};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmPersonsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmPersonsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

/// Validator failures are surfaced as-is, everything else becomes a backend error.
fn write_error(err: DbErr, what: &'static str) -> StoreError {
    match err {
        DbErr::Custom(message) if message.starts_with(VALIDATION_PREFIX) => {
            StoreError::Validation(message)
        }
        other => StoreError::Backend(anyhow::Error::new(other).context(what)),
    }
}

#[async_trait::async_trait]
impl<C> PersonsRepository for SeaOrmPersonsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn list_all(&self) -> Result<Vec<Person>, StoreError> {
        let rows = PersonEntity::find()
            .all(&self.conn)
            .await
            .context("list_all failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count = PersonEntity::find()
            .count(&self.conn)
            .await
            .context("count failed")?;
        Ok(count)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>, StoreError> {
        let found = PersonEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Person>, StoreError> {
        let found = PersonEntity::find()
            .filter(Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("find_by_name failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, new_person: NewPerson) -> Result<Person, StoreError> {
        let m = PersonAM {
            id: Set(Uuid::new_v4()),
            name: Set(new_person.name),
            number: Set(new_person.number),
        };
        let saved = m
            .insert(&self.conn)
            .await
            .map_err(|e| write_error(e, "insert failed"))?;
        Ok(saved.into())
    }

    async fn update_number(&self, id: Uuid, number: &str) -> Result<Option<Person>, StoreError> {
        let Some(current) = PersonEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("update_number lookup failed")?
        else {
            return Ok(None);
        };

        let mut m = current.into_active_model();
        m.number = Set(number.to_owned());
        let saved = m
            .update(&self.conn)
            .await
            .map_err(|e| write_error(e, "update_number failed"))?;
        Ok(Some(saved.into()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = PersonEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }
}
