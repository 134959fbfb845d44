use std::sync::Arc;

use anyhow::Result;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use phonebook::{
    contract::model::NewPerson,
    domain::{error::DomainError, repo::PersonsRepository, service::Service},
    infra::storage::{connect, migrations::Migrator, sea_orm_repo::SeaOrmPersonsRepository},
};

/// Create a fresh test database for each test
async fn create_test_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:", None)
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

async fn create_test_repo() -> Arc<SeaOrmPersonsRepository<DatabaseConnection>> {
    Arc::new(SeaOrmPersonsRepository::new(create_test_db().await))
}

async fn create_test_service() -> Service {
    Service::new(create_test_repo().await)
}

fn person(name: &str, number: &str) -> NewPerson {
    NewPerson {
        name: name.to_string(),
        number: number.to_string(),
    }
}

#[tokio::test]
async fn test_upsert_creates_then_updates_in_place() -> Result<()> {
    let service = create_test_service().await;
    assert!(service.list_persons().await?.is_empty());

    let created = service.upsert_person(person("Ada", "123")).await?;
    assert_eq!(created.name, "Ada");
    assert_eq!(created.number, "123");

    let listed = service.list_persons().await?;
    assert_eq!(listed, vec![created.clone()]);

    let updated = service.upsert_person(person("Ada", "456")).await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.number, "456");

    let listed = service.list_persons().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].number, "456");
    assert_eq!(service.info().await?.count, 1);

    Ok(())
}

#[tokio::test]
async fn test_missing_fields_create_nothing() -> Result<()> {
    let service = create_test_service().await;
    service.upsert_person(person("Ada", "123")).await?;

    let err = service.upsert_person(person("Bob", "")).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
    assert_eq!(err.to_string(), "number missing");

    let err = service.upsert_person(person("", "555")).await.unwrap_err();
    assert_eq!(err.to_string(), "name missing");

    // an empty number must not clobber an existing entry either
    let err = service.upsert_person(person("Ada", "")).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let listed = service.list_persons().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].number, "123");
    Ok(())
}

#[tokio::test]
async fn test_blank_number_is_rejected_by_store_validators() -> Result<()> {
    let service = create_test_service().await;

    let err = service.upsert_person(person("Ada", "   ")).await.unwrap_err();
    match &err {
        DomainError::StoreValidation { message } => {
            assert!(message.starts_with("Person validation failed"), "{message}");
            assert!(message.contains("number"), "{message}");
        }
        other => panic!("expected StoreValidation, got {other:?}"),
    }
    assert_eq!(service.info().await?.count, 0);

    // same validators run on the update path
    let ada = service.upsert_person(person("Ada", "123")).await?;
    let err = service.upsert_person(person("Ada", "\t")).await.unwrap_err();
    assert!(matches!(err, DomainError::StoreValidation { .. }));
    assert_eq!(service.get_person(&ada.id.to_string()).await?.number, "123");
    Ok(())
}

#[tokio::test]
async fn test_get_and_delete_by_id() -> Result<()> {
    let service = create_test_service().await;
    let ada = service.upsert_person(person("Ada", "123")).await?;
    let id = ada.id.to_string();

    assert_eq!(service.get_person(&id).await?, ada);

    service.delete_person(&id).await?;
    // idempotent
    service.delete_person(&id).await?;

    let err = service.get_person(&id).await.unwrap_err();
    assert!(matches!(err, DomainError::PersonNotFound { id } if id == ada.id));
    assert_eq!(service.info().await?.count, 0);
    Ok(())
}

#[tokio::test]
async fn test_never_assigned_and_malformed_ids() -> Result<()> {
    let service = create_test_service().await;

    let err = service
        .get_person(&Uuid::new_v4().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::PersonNotFound { .. }));

    for bad in ["not-an-id", "5c41c90e84d891c15dfa3431", ""] {
        let err = service.get_person(bad).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidIdentifier { .. }), "{bad}");
        let err = service.delete_person(bad).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidIdentifier { .. }), "{bad}");
    }
    Ok(())
}

#[tokio::test]
async fn test_info_count_tracks_store() -> Result<()> {
    let service = create_test_service().await;
    assert_eq!(service.info().await?.count, 0);

    let names = ["Ada", "Bob", "Cy"];
    for (i, name) in names.iter().enumerate() {
        service.upsert_person(person(name, &format!("{i}00"))).await?;
    }
    let info = service.info().await?;
    assert_eq!(info.count, names.len() as u64);
    assert_eq!(info.count, service.list_persons().await?.len() as u64);
    Ok(())
}

#[tokio::test]
async fn test_repository_operations() -> Result<()> {
    let repo = create_test_repo().await;

    let ada = repo.insert(person("Ada", "123")).await?;
    assert_eq!(repo.count().await?, 1);
    assert_eq!(repo.find_by_name("Ada").await?, Some(ada.clone()));
    assert_eq!(repo.find_by_name("ada").await?, None);

    let updated = repo.update_number(ada.id, "999").await?.unwrap();
    assert_eq!(updated.id, ada.id);
    assert_eq!(updated.number, "999");

    assert_eq!(repo.update_number(Uuid::new_v4(), "1").await?, None);

    // no unique constraint on name: a plain insert of the same name succeeds
    repo.insert(person("Ada", "000")).await?;
    assert_eq!(repo.count().await?, 2);

    assert!(repo.delete(ada.id).await?);
    assert!(!repo.delete(ada.id).await?);
    assert_eq!(repo.count().await?, 1);
    Ok(())
}
