use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    response::{Html, Json},
    Extension,
};
use tracing::{error, info};

use crate::api::rest::dto::{render_info, PersonDto, UpsertPersonReq};
use crate::api::rest::error::{map_domain_error, ApiError};
use crate::domain::service::Service;

/// List every person in the phonebook
pub async fn list_persons(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<Vec<PersonDto>>, ApiError> {
    info!("Listing persons");

    match svc.list_persons().await {
        Ok(persons) => Ok(Json(persons.into_iter().map(PersonDto::from).collect())),
        Err(e) => {
            error!("Failed to list persons: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Entry count and server time as a small HTML page
pub async fn info(Extension(svc): Extension<Arc<Service>>) -> Result<Html<String>, ApiError> {
    match svc.info().await {
        Ok(info) => Ok(Html(render_info(&info))),
        Err(e) => {
            error!("Failed to count persons: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Get a person by id
pub async fn get_person(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<PersonDto>, ApiError> {
    info!("Getting person with id: {}", id);

    match svc.get_person(&id).await {
        Ok(person) => Ok(Json(PersonDto::from(person))),
        Err(e) => {
            error!("Failed to get person {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Delete a person by id; deleting an absent person still answers 204
pub async fn delete_person(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    info!("Deleting person: {}", id);

    match svc.delete_person(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete person {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Create a person, or update the number of the one with the same name
pub async fn upsert_person(
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<UpsertPersonReq>, JsonRejection>,
) -> Result<Json<PersonDto>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        error!("Rejected person payload: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    })?;
    info!("Upserting person: {:?}", req);

    match svc.upsert_person(req.into()).await {
        Ok(person) => Ok(Json(PersonDto::from(person))),
        Err(e) => {
            error!("Failed to upsert person: {}", e);
            Err(map_domain_error(&e))
        }
    }
}
