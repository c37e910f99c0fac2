pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppRepo: Send + Sync {
    async fn save_user_app(&self, app_user: &models::user_app::User) -> anyhow::Result<i64>;

    async fn get_user_app_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<models::user_app::User>>;

    async fn get_user_app_by_id(
        &self,
        user_id: i64,
    ) -> anyhow::Result<Option<models::user_app::User>>;

    async fn set_user_push_token(
        &self,
        user_id: i64,
        push_token: Option<String>,
    ) -> anyhow::Result<()>;

    async fn remove_user_app_data(&self, user_id: i64) -> anyhow::Result<()>;

    async fn save_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<i64>;

    async fn update_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<()>;

    async fn set_pet_photo_url(
        &self,
        pet_id: i64,
        user_id: i64,
        photo_url: &str,
    ) -> anyhow::Result<()>;

    async fn set_pet_next_due(
        &self,
        pet_id: i64,
        user_id: i64,
        category: models::care::AppointmentCategory,
        date: chrono::NaiveDate,
    ) -> anyhow::Result<()>;

    async fn set_pet_last_weight(
        &self,
        pet_id: i64,
        user_id: i64,
        weight: f64,
    ) -> anyhow::Result<()>;

    async fn delete_pet_cascade(&self, pet_id: i64, user_id: i64) -> anyhow::Result<()>;

    async fn get_all_pets_user_id(&self, user_id: i64) -> anyhow::Result<Vec<models::pet::Pet>>;

    async fn get_pet_by_id(&self, pet_id: i64, user_id: i64) -> anyhow::Result<models::pet::Pet>;

    async fn insert_appointment(
        &self,
        user_id: i64,
        appointment: &models::care::Appointment,
    ) -> anyhow::Result<i64>;

    async fn get_pet_appointments(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::care::Appointment>>;

    async fn set_appointment_status(
        &self,
        appointment_id: i64,
        pet_id: i64,
        user_id: i64,
        status: models::care::AppointmentStatus,
    ) -> anyhow::Result<()>;

    async fn delete_appointment(
        &self,
        appointment_id: i64,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<()>;

    async fn insert_medication(
        &self,
        user_id: i64,
        medication: &models::care::MedicationCourse,
    ) -> anyhow::Result<i64>;

    async fn get_pet_medications(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::care::MedicationCourse>>;

    async fn set_medication_status(
        &self,
        medication_id: i64,
        pet_id: i64,
        user_id: i64,
        status: models::care::MedicationStatus,
    ) -> anyhow::Result<()>;

    async fn delete_medication(
        &self,
        medication_id: i64,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<()>;

    async fn insert_weight_sample(
        &self,
        user_id: i64,
        sample: &models::care::WeightSample,
    ) -> anyhow::Result<i64>;

    async fn get_pet_weight_samples(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::care::WeightSample>>;

    async fn delete_weight_sample(
        &self,
        sample_id: i64,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<()>;

    async fn insert_feeding_log(
        &self,
        user_id: i64,
        entry: &models::care::FeedingLog,
    ) -> anyhow::Result<i64>;

    async fn get_pet_feeding_logs(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::care::FeedingLog>>;
}

pub type ImplAppRepo = Box<dyn AppRepo>;
