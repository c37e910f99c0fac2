use crate::models;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct PetForm {
    pub pet_name: String,
    pub species: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub veterinarian: Option<String>,
    #[serde(default)]
    pub microchip_number: Option<String>,
    #[serde(default = "default_true")]
    pub alert_vaccination: bool,
    #[serde(default = "default_true")]
    pub alert_deworming: bool,
    #[serde(default = "default_true")]
    pub alert_checkup: bool,
    #[serde(default = "default_true")]
    pub alert_medication: bool,
}

impl From<PetForm> for models::pet::Pet {
    fn from(val: PetForm) -> Self {
        let now = Utc::now();
        models::pet::Pet {
            pet_name: val.pet_name,
            species: val.species,
            breed: val.breed,
            birthday: val.birthday,
            veterinarian: val.veterinarian,
            microchip_number: val.microchip_number,
            alerts: models::pet::AlertSettings {
                vaccination: val.alert_vaccination,
                deworming: val.alert_deworming,
                checkup: val.alert_checkup,
                medication: val.alert_medication,
            },
            created_at: now,
            updated_at: now,
            ..models::pet::Pet::default()
        }
    }
}
