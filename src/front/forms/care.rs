use crate::models;
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct AppointmentForm {
    pub pet_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub category: models::care::AppointmentCategory,
    pub veterinarian: String,
    pub reason: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<AppointmentForm> for models::care::Appointment {
    fn from(val: AppointmentForm) -> Self {
        models::care::Appointment {
            pet_id: val.pet_id,
            date: val.date,
            time: val.time,
            category: val.category,
            veterinarian: val.veterinarian,
            reason: val.reason,
            notes: val.notes,
            created_at: Utc::now(),
            ..models::care::Appointment::default()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppointmentStatusForm {
    pub status: models::care::AppointmentStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MedicationForm {
    pub pet_id: i64,
    pub name: String,
    pub dose: String,
    #[serde(default)]
    pub frequency: models::care::MedicationFrequency,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<MedicationForm> for models::care::MedicationCourse {
    fn from(val: MedicationForm) -> Self {
        models::care::MedicationCourse {
            pet_id: val.pet_id,
            name: val.name,
            dose: val.dose,
            frequency: val.frequency,
            start_date: val.start_date,
            end_date: val.end_date,
            notes: val.notes,
            created_at: Utc::now(),
            ..models::care::MedicationCourse::default()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MedicationStatusForm {
    pub status: models::care::MedicationStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeightSampleForm {
    pub pet_id: i64,
    pub date: NaiveDate,
    pub weight: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<WeightSampleForm> for models::care::WeightSample {
    fn from(val: WeightSampleForm) -> Self {
        models::care::WeightSample {
            pet_id: val.pet_id,
            date: val.date,
            weight: val.weight,
            notes: val.notes,
            created_at: Utc::now(),
            ..models::care::WeightSample::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedingLogForm {
    pub pet_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub food_type: String,
    pub amount: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<FeedingLogForm> for models::care::FeedingLog {
    fn from(val: FeedingLogForm) -> Self {
        models::care::FeedingLog {
            pet_id: val.pet_id,
            date: val.date,
            time: val.time,
            food_type: val.food_type,
            amount: val.amount,
            notes: val.notes,
            created_at: Utc::now(),
            ..models::care::FeedingLog::default()
        }
    }
}
