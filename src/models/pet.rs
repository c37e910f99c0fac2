use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categories a pet owner can toggle alerts for. Stored as four flags on
/// the pet row; a disabled category drops its alerts from the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AlertSettings {
    pub vaccination: bool,
    pub deworming: bool,
    pub checkup: bool,
    pub medication: bool,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            vaccination: true,
            deworming: true,
            checkup: true,
            medication: true,
        }
    }
}

/// "Next due" care dates carried directly on the pet. Saving an appointment
/// of a matching category overwrites the corresponding field, last write
/// wins.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct NextDueDates {
    pub vaccination: Option<NaiveDate>,
    pub deworming: Option<NaiveDate>,
    pub checkup: Option<NaiveDate>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub external_id: Uuid,
    pub user_app_id: i64,
    pub pet_name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub last_weight: Option<f64>,
    pub veterinarian: Option<String>,
    pub microchip_number: Option<String>,
    pub alerts: AlertSettings,
    pub next_due: NextDueDates,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
