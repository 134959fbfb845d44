use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;

/// Prefix of every message produced by the field validators below.
pub const VALIDATION_PREFIX: &str = "Person validation failed: ";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "persons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    // not unique: name uniqueness is an application-level rule
    pub name: String,
    pub number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Field validators, run on every insert and update.
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        require_not_blank("name", &self.name)?;
        require_not_blank("number", &self.number)?;
        Ok(self)
    }
}

fn require_not_blank(field: &str, value: &ActiveValue<String>) -> Result<(), DbErr> {
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) if v.trim().is_empty() => Err(
            DbErr::Custom(format!("{VALIDATION_PREFIX}{field}: must not be blank")),
        ),
        _ => Ok(()),
    }
}
