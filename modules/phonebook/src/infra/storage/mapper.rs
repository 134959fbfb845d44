use crate::contract::model::Person;
use crate::infra::storage::entity::Model as PersonEntity;

impl From<PersonEntity> for Person {
    fn from(entity: PersonEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            number: entity.number,
        }
    }
}
