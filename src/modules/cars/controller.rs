use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use carlot_core::AppError;
use carlot_models::cars::{Car, CreateCarDto, UpdateCarDto};
use carlot_models::ids::CarId;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service;

pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<Car>>, AppError> {
    let cars = service::list_cars(&state).await?;
    Ok(Json(cars))
}

pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<CarId>,
) -> Result<Json<Car>, AppError> {
    let car = service::get_car(&state, id).await?;
    Ok(Json(car))
}

pub async fn create_car(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCarDto>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    let car = service::create_car(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<CarId>,
    ValidatedJson(dto): ValidatedJson<UpdateCarDto>,
) -> Result<Json<Car>, AppError> {
    let car = service::update_car(&state, id, dto).await?;
    Ok(Json(car))
}

pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<CarId>,
) -> Result<StatusCode, AppError> {
    service::delete_car(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
