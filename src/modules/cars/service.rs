use anyhow::anyhow;
use carlot_core::AppError;
use carlot_models::cars::{Car, CreateCarDto, UpdateCarDto};
use carlot_models::ids::CarId;
use tracing::instrument;

use crate::errors::store_error;
use crate::state::AppState;

fn car_not_found() -> AppError {
    AppError::not_found(anyhow!("Car not found"))
}

#[instrument(skip(state))]
pub async fn list_cars(state: &AppState) -> Result<Vec<Car>, AppError> {
    state.cars.list_cars().await.map_err(store_error)
}

#[instrument(skip(state))]
pub async fn get_car(state: &AppState, id: CarId) -> Result<Car, AppError> {
    state
        .cars
        .get_car(id)
        .await
        .map_err(store_error)?
        .ok_or_else(car_not_found)
}

#[instrument(skip(state))]
pub async fn create_car(state: &AppState, dto: CreateCarDto) -> Result<Car, AppError> {
    let car = state.cars.create_car(dto).await.map_err(store_error)?;
    tracing::info!(car_id = %car.id, ref_no = %car.ref_no, "car created");
    Ok(car)
}

#[instrument(skip(state))]
pub async fn update_car(state: &AppState, id: CarId, dto: UpdateCarDto) -> Result<Car, AppError> {
    state
        .cars
        .update_car(id, dto)
        .await
        .map_err(store_error)?
        .ok_or_else(car_not_found)
}

#[instrument(skip(state))]
pub async fn delete_car(state: &AppState, id: CarId) -> Result<(), AppError> {
    if !state.cars.delete_car(id).await.map_err(store_error)? {
        return Err(car_not_found());
    }
    tracing::info!(car_id = %id, "car deleted");
    Ok(())
}
