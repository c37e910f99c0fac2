use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Canonical appointment categories. The vaccination/deworming/checkup
/// variants also drive the pet "next due" fields when an appointment is
/// saved.
#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub enum AppointmentCategory {
    #[default]
    #[display("checkup")]
    #[serde(alias = "checkup", rename(serialize = "checkup"))]
    Checkup,
    #[display("vaccination")]
    #[serde(alias = "vaccination", rename(serialize = "vaccination"))]
    Vaccination,
    #[display("deworming")]
    #[serde(alias = "deworming", rename(serialize = "deworming"))]
    Deworming,
    #[display("emergency")]
    #[serde(alias = "emergency", rename(serialize = "emergency"))]
    Emergency,
    #[display("surgery")]
    #[serde(alias = "surgery", rename(serialize = "surgery"))]
    Surgery,
    #[display("other")]
    #[serde(alias = "other", rename(serialize = "other"))]
    Other,
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub enum AppointmentStatus {
    #[default]
    #[display("scheduled")]
    #[serde(alias = "scheduled", rename(serialize = "scheduled"))]
    Scheduled,
    #[display("completed")]
    #[serde(alias = "completed", rename(serialize = "completed"))]
    Completed,
    #[display("cancelled")]
    #[serde(alias = "cancelled", rename(serialize = "cancelled"))]
    Cancelled,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub pet_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub category: AppointmentCategory,
    pub veterinarian: String,
    pub reason: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn due_at(&self) -> chrono::NaiveDateTime {
        self.date.and_time(self.time)
    }
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub enum MedicationStatus {
    #[default]
    #[display("active")]
    #[serde(alias = "active", rename(serialize = "active"))]
    Active,
    #[display("completed")]
    #[serde(alias = "completed", rename(serialize = "completed"))]
    Completed,
    #[display("suspended")]
    #[serde(alias = "suspended", rename(serialize = "suspended"))]
    Suspended,
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub enum MedicationFrequency {
    #[display("every_8_hours")]
    #[serde(alias = "every_8_hours", rename(serialize = "every_8_hours"))]
    Every8Hours,
    #[display("every_12_hours")]
    #[serde(alias = "every_12_hours", rename(serialize = "every_12_hours"))]
    Every12Hours,
    #[default]
    #[display("daily")]
    #[serde(alias = "daily", rename(serialize = "daily"))]
    Daily,
    #[display("every_2_days")]
    #[serde(alias = "every_2_days", rename(serialize = "every_2_days"))]
    Every2Days,
    #[display("weekly")]
    #[serde(alias = "weekly", rename(serialize = "weekly"))]
    Weekly,
    #[display("as_needed")]
    #[serde(alias = "as_needed", rename(serialize = "as_needed"))]
    AsNeeded,
}

impl MedicationFrequency {
    /// Human readable label used in push reminders and event descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Every8Hours => "every 8 hours",
            Self::Every12Hours => "every 12 hours",
            Self::Daily => "once a day",
            Self::Every2Days => "every 2 days",
            Self::Weekly => "once a week",
            Self::AsNeeded => "as needed",
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MedicationCourse {
    pub id: i64,
    pub pet_id: i64,
    pub name: String,
    pub dose: String,
    pub frequency: MedicationFrequency,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: MedicationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MedicationCourse {
    /// Active is derived, not stored: an active status whose end date has
    /// not passed yet (end date itself included).
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.status == MedicationStatus::Active && self.end_date >= today
    }

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct WeightSample {
    pub id: i64,
    pub pet_id: i64,
    pub date: NaiveDate,
    pub weight: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FeedingLog {
    pub id: i64,
    pub pet_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub food_type: String,
    pub amount: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
