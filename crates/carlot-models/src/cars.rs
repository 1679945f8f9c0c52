//! Car inventory models and DTOs.

use crate::ids::CarId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "car_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CarStatus {
    #[default]
    Available,
    Pending,
    Sold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: CarId,
    pub ref_no: String,
    pub make: String,
    pub model: String,
    pub year: Option<i16>,
    pub color: Option<String>,
    pub mileage_km: Option<i32>,
    pub status: CarStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCarDto {
    #[validate(length(min = 1, max = 64, message = "ref_no must be 1-64 characters"))]
    pub ref_no: String,
    #[validate(length(min = 1, max = 100, message = "make must be 1-100 characters"))]
    pub make: String,
    #[validate(length(min = 1, max = 100, message = "model must be 1-100 characters"))]
    pub model: String,
    #[validate(range(min = 1886, max = 2100, message = "year is out of range"))]
    pub year: Option<i16>,
    #[validate(length(max = 50, message = "color must be at most 50 characters"))]
    pub color: Option<String>,
    #[validate(range(min = 0, message = "mileage_km must not be negative"))]
    pub mileage_km: Option<i32>,
    pub status: Option<CarStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCarDto {
    #[validate(length(min = 1, max = 64, message = "ref_no must be 1-64 characters"))]
    pub ref_no: Option<String>,
    #[validate(length(min = 1, max = 100, message = "make must be 1-100 characters"))]
    pub make: Option<String>,
    #[validate(length(min = 1, max = 100, message = "model must be 1-100 characters"))]
    pub model: Option<String>,
    #[validate(range(min = 1886, max = 2100, message = "year is out of range"))]
    pub year: Option<i16>,
    #[validate(length(max = 50, message = "color must be at most 50 characters"))]
    pub color: Option<String>,
    #[validate(range(min = 0, message = "mileage_km must not be negative"))]
    pub mileage_km: Option<i32>,
    pub status: Option<CarStatus>,
}

impl UpdateCarDto {
    /// Applies the present fields onto `car`. Does not touch timestamps.
    pub fn apply_to(self, car: &mut Car) {
        if let Some(ref_no) = self.ref_no {
            car.ref_no = ref_no;
        }
        if let Some(make) = self.make {
            car.make = make;
        }
        if let Some(model) = self.model {
            car.model = model;
        }
        if self.year.is_some() {
            car.year = self.year;
        }
        if self.color.is_some() {
            car.color = self.color;
        }
        if self.mileage_km.is_some() {
            car.mileage_km = self.mileage_km;
        }
        if let Some(status) = self.status {
            car.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_car() -> Car {
        let now = chrono::Utc::now();
        Car {
            id: CarId(1),
            ref_no: "REF-1".to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: Some(2018),
            color: None,
            mileage_km: Some(42000),
            status: CarStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&CarStatus::Sold).unwrap(), r#""sold""#);
        let status: CarStatus = serde_json::from_str(r#""pending""#).unwrap();
        assert_eq!(status, CarStatus::Pending);
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let mut car = sample_car();
        UpdateCarDto {
            color: Some("red".to_string()),
            status: Some(CarStatus::Sold),
            ..Default::default()
        }
        .apply_to(&mut car);

        assert_eq!(car.color.as_deref(), Some("red"));
        assert_eq!(car.status, CarStatus::Sold);
        assert_eq!(car.make, "Toyota");
        assert_eq!(car.year, Some(2018));
    }

    #[test]
    fn test_create_car_validation() {
        let dto = CreateCarDto {
            ref_no: String::new(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: Some(1700),
            color: None,
            mileage_km: Some(-1),
            status: None,
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("ref_no"));
        assert!(fields.contains_key("year"));
        assert!(fields.contains_key("mileage_km"));
    }
}
