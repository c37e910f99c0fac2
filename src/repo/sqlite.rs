use crate::models;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};

use super::{AppRepo, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

/// Enum columns are stored as their display string; decoding goes through
/// serde so the string set stays in one place (the model definitions). An
/// unknown stored string is data corruption and surfaces as a decode error.
fn enum_from_text<T: serde::de::DeserializeOwned>(column: &str, value: &str) -> sqlx::Result<T> {
    serde_json::from_str::<T>(&format!("\"{}\"", value)).map_err(|err| {
        sqlx::Error::ColumnDecode {
            index: column.into(),
            source: Box::new(err),
        }
    })
}

/// Updates carry their ownership guard in the WHERE clause, so zero
/// affected rows means the record is missing or belongs to another user.
fn ensure_row_updated(
    result: sqlx::sqlite::SqliteQueryResult,
    entity: &str,
) -> anyhow::Result<()> {
    if result.rows_affected() == 0 {
        anyhow::bail!("{entity} not found for this user")
    }

    Ok(())
}

impl FromRow<'_, SqliteRow> for models::user_app::User {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            push_token: row.try_get("push_token")?,
            is_enabled: row.try_get("is_enabled")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::pet::Pet {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let external_id: uuid::fmt::Hyphenated = row.try_get("external_id")?;

        Ok(Self {
            id: row.try_get("id")?,
            external_id: external_id.into(),
            user_app_id: row.try_get("user_app_id")?,
            pet_name: row.try_get("pet_name")?,
            species: row.try_get("species")?,
            breed: row.try_get("breed")?,
            birthday: row.try_get("birthday")?,
            last_weight: row.try_get("last_weight")?,
            veterinarian: row.try_get("veterinarian")?,
            microchip_number: row.try_get("microchip_number")?,
            alerts: models::pet::AlertSettings {
                vaccination: row.try_get("alert_vaccination")?,
                deworming: row.try_get("alert_deworming")?,
                checkup: row.try_get("alert_checkup")?,
                medication: row.try_get("alert_medication")?,
            },
            next_due: models::pet::NextDueDates {
                vaccination: row.try_get("next_vaccination")?,
                deworming: row.try_get("next_deworming")?,
                checkup: row.try_get("next_checkup")?,
            },
            photo_url: row.try_get("photo_url")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::care::Appointment {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            pet_id: row.try_get("pet_id")?,
            date: row.try_get("date")?,
            time: row.try_get("time")?,
            category: enum_from_text("category", row.try_get::<&str, &str>("category")?)?,
            veterinarian: row.try_get("veterinarian")?,
            reason: row.try_get("reason")?,
            status: enum_from_text("status", row.try_get::<&str, &str>("status")?)?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::care::MedicationCourse {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            pet_id: row.try_get("pet_id")?,
            name: row.try_get("name")?,
            dose: row.try_get("dose")?,
            frequency: enum_from_text("frequency", row.try_get::<&str, &str>("frequency")?)?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            status: enum_from_text("status", row.try_get::<&str, &str>("status")?)?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::care::WeightSample {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            pet_id: row.try_get("pet_id")?,
            date: row.try_get("date")?,
            weight: row.try_get("weight")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::care::FeedingLog {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            pet_id: row.try_get("pet_id")?,
            date: row.try_get("date")?,
            time: row.try_get("time")?,
            food_type: row.try_get("food_type")?,
            amount: row.try_get("amount")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl AppRepo for SqlxSqliteRepo {
    async fn save_user_app(&self, app_user: &models::user_app::User) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_USER_APP)
            .bind(&app_user.email)
            .bind(&app_user.password_hash)
            .bind(&app_user.push_token)
            .bind(app_user.is_enabled)
            .bind(app_user.created_at)
            .bind(app_user.updated_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn get_user_app_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<models::user_app::User>> {
        Ok(
            sqlx::query_as::<_, models::user_app::User>(
                sqlite_queries::QUERY_GET_USER_APP_BY_EMAIL,
            )
            .bind(email)
            .fetch_optional(&self.db_pool)
            .await?,
        )
    }

    async fn get_user_app_by_id(
        &self,
        user_id: i64,
    ) -> anyhow::Result<Option<models::user_app::User>> {
        Ok(
            sqlx::query_as::<_, models::user_app::User>(sqlite_queries::QUERY_GET_USER_APP_BY_ID)
                .bind(user_id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn set_user_push_token(
        &self,
        user_id: i64,
        push_token: Option<String>,
    ) -> anyhow::Result<()> {
        let result = sqlx::query("UPDATE user_app SET push_token=$2, updated_at=$3 WHERE id=$1;")
            .bind(user_id)
            .bind(push_token)
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await?;

        ensure_row_updated(result, "user")
    }

    async fn remove_user_app_data(&self, user_id: i64) -> anyhow::Result<()> {
        // pet rows cascade to every dependent table via the schema.
        Ok(sqlx::query("DELETE FROM user_app WHERE id=$1;")
            .bind(user_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn save_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_PET)
            .bind(pet.external_id.to_string())
            .bind(pet.user_app_id)
            .bind(&pet.pet_name)
            .bind(&pet.species)
            .bind(&pet.breed)
            .bind(pet.birthday)
            .bind(pet.last_weight)
            .bind(&pet.veterinarian)
            .bind(&pet.microchip_number)
            .bind(pet.alerts.vaccination)
            .bind(pet.alerts.deworming)
            .bind(pet.alerts.checkup)
            .bind(pet.alerts.medication)
            .bind(pet.next_due.vaccination)
            .bind(pet.next_due.deworming)
            .bind(pet.next_due.checkup)
            .bind(&pet.photo_url)
            .bind(pet.created_at)
            .bind(pet.updated_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn update_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<()> {
        let result = sqlx::query(sqlite_queries::QUERY_UPDATE_PET)
            .bind(pet.id)
            .bind(pet.user_app_id)
            .bind(&pet.pet_name)
            .bind(&pet.species)
            .bind(&pet.breed)
            .bind(pet.birthday)
            .bind(&pet.veterinarian)
            .bind(&pet.microchip_number)
            .bind(pet.alerts.vaccination)
            .bind(pet.alerts.deworming)
            .bind(pet.alerts.checkup)
            .bind(pet.alerts.medication)
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await?;

        ensure_row_updated(result, "pet")
    }

    async fn set_pet_photo_url(
        &self,
        pet_id: i64,
        user_id: i64,
        photo_url: &str,
    ) -> anyhow::Result<()> {
        let result = sqlx::query(
            "UPDATE pet SET photo_url=$3, updated_at=$4 WHERE id=$1 AND user_app_id=$2;",
        )
        .bind(pet_id)
        .bind(user_id)
        .bind(photo_url)
        .bind(Utc::now())
        .execute(&self.db_pool)
        .await?;

        ensure_row_updated(result, "pet")
    }

    async fn set_pet_next_due(
        &self,
        pet_id: i64,
        user_id: i64,
        category: models::care::AppointmentCategory,
        date: chrono::NaiveDate,
    ) -> anyhow::Result<()> {
        let column = match category {
            models::care::AppointmentCategory::Vaccination => "next_vaccination",
            models::care::AppointmentCategory::Deworming => "next_deworming",
            models::care::AppointmentCategory::Checkup => "next_checkup",
            // Other categories carry no "next due" field on the pet.
            _ => return Ok(()),
        };

        let result = sqlx::query(&format!(
            "UPDATE pet SET {column}=$3, updated_at=$4 WHERE id=$1 AND user_app_id=$2;"
        ))
        .bind(pet_id)
        .bind(user_id)
        .bind(date)
        .bind(Utc::now())
        .execute(&self.db_pool)
        .await?;

        ensure_row_updated(result, "pet")
    }

    async fn set_pet_last_weight(
        &self,
        pet_id: i64,
        user_id: i64,
        weight: f64,
    ) -> anyhow::Result<()> {
        let result = sqlx::query(
            "UPDATE pet SET last_weight=$3, updated_at=$4 WHERE id=$1 AND user_app_id=$2;",
        )
        .bind(pet_id)
        .bind(user_id)
        .bind(weight)
        .bind(Utc::now())
        .execute(&self.db_pool)
        .await?;

        ensure_row_updated(result, "pet")
    }

    async fn delete_pet_cascade(&self, pet_id: i64, user_id: i64) -> anyhow::Result<()> {
        let mut transaction = self.db_pool.begin().await?;

        let owned: Option<i64> =
            sqlx::query_scalar("SELECT id FROM pet WHERE id=$1 AND user_app_id=$2;")
                .bind(pet_id)
                .bind(user_id)
                .fetch_optional(&mut *transaction)
                .await?;

        if owned.is_none() {
            anyhow::bail!("pet {pet_id} not found for user {user_id}")
        }

        for table in sqlite_queries::PET_DEPENDENT_TABLES {
            sqlx::query(&format!("DELETE FROM {table} WHERE pet_id=$1;"))
                .bind(pet_id)
                .execute(&mut *transaction)
                .await?;
        }

        sqlx::query("DELETE FROM pet WHERE id=$1 AND user_app_id=$2;")
            .bind(pet_id)
            .bind(user_id)
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;

        Ok(())
    }

    async fn get_all_pets_user_id(&self, user_id: i64) -> anyhow::Result<Vec<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_ALL_PETS_USER_ID)
                .bind(user_id)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn get_pet_by_id(&self, pet_id: i64, user_id: i64) -> anyhow::Result<models::pet::Pet> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_PET_BY_ID)
                .bind(pet_id)
                .bind(user_id)
                .fetch_one(&self.db_pool)
                .await?,
        )
    }

    async fn insert_appointment(
        &self,
        user_id: i64,
        appointment: &models::care::Appointment,
    ) -> anyhow::Result<i64> {
        Ok(
            sqlx::query_scalar::<_, i64>(sqlite_queries::QUERY_INSERT_APPOINTMENT)
                .bind(appointment.pet_id)
                .bind(user_id)
                .bind(appointment.date)
                .bind(appointment.time)
                .bind(appointment.category.to_string())
                .bind(&appointment.veterinarian)
                .bind(&appointment.reason)
                .bind(appointment.status.to_string())
                .bind(&appointment.notes)
                .bind(appointment.created_at)
                .fetch_one(&self.db_pool)
                .await?,
        )
    }

    async fn get_pet_appointments(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::care::Appointment>> {
        Ok(
            sqlx::query_as::<_, models::care::Appointment>(
                sqlite_queries::QUERY_GET_PET_APPOINTMENTS,
            )
            .bind(pet_id)
            .bind(user_id)
            .fetch_all(&self.db_pool)
            .await?,
        )
    }

    async fn set_appointment_status(
        &self,
        appointment_id: i64,
        pet_id: i64,
        user_id: i64,
        status: models::care::AppointmentStatus,
    ) -> anyhow::Result<()> {
        let result = sqlx::query(sqlite_queries::QUERY_SET_APPOINTMENT_STATUS)
            .bind(appointment_id)
            .bind(pet_id)
            .bind(user_id)
            .bind(status.to_string())
            .execute(&self.db_pool)
            .await?;

        ensure_row_updated(result, "appointment")
    }

    async fn delete_appointment(
        &self,
        appointment_id: i64,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<()> {
        sqlx::query(sqlite_queries::QUERY_DELETE_APPOINTMENT)
            .bind(appointment_id)
            .bind(pet_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await?;
        Ok(())
    }

    async fn insert_medication(
        &self,
        user_id: i64,
        medication: &models::care::MedicationCourse,
    ) -> anyhow::Result<i64> {
        Ok(
            sqlx::query_scalar::<_, i64>(sqlite_queries::QUERY_INSERT_MEDICATION)
                .bind(medication.pet_id)
                .bind(user_id)
                .bind(&medication.name)
                .bind(&medication.dose)
                .bind(medication.frequency.to_string())
                .bind(medication.start_date)
                .bind(medication.end_date)
                .bind(medication.status.to_string())
                .bind(&medication.notes)
                .bind(medication.created_at)
                .fetch_one(&self.db_pool)
                .await?,
        )
    }

    async fn get_pet_medications(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::care::MedicationCourse>> {
        Ok(sqlx::query_as::<_, models::care::MedicationCourse>(
            sqlite_queries::QUERY_GET_PET_MEDICATIONS,
        )
        .bind(pet_id)
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn set_medication_status(
        &self,
        medication_id: i64,
        pet_id: i64,
        user_id: i64,
        status: models::care::MedicationStatus,
    ) -> anyhow::Result<()> {
        let result = sqlx::query(sqlite_queries::QUERY_SET_MEDICATION_STATUS)
            .bind(medication_id)
            .bind(pet_id)
            .bind(user_id)
            .bind(status.to_string())
            .execute(&self.db_pool)
            .await?;

        ensure_row_updated(result, "medication")
    }

    async fn delete_medication(
        &self,
        medication_id: i64,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<()> {
        sqlx::query(sqlite_queries::QUERY_DELETE_MEDICATION)
            .bind(medication_id)
            .bind(pet_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await?;
        Ok(())
    }

    async fn insert_weight_sample(
        &self,
        user_id: i64,
        sample: &models::care::WeightSample,
    ) -> anyhow::Result<i64> {
        Ok(
            sqlx::query_scalar::<_, i64>(sqlite_queries::QUERY_INSERT_WEIGHT_SAMPLE)
                .bind(sample.pet_id)
                .bind(user_id)
                .bind(sample.date)
                .bind(sample.weight)
                .bind(&sample.notes)
                .bind(sample.created_at)
                .fetch_one(&self.db_pool)
                .await?,
        )
    }

    async fn get_pet_weight_samples(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::care::WeightSample>> {
        Ok(sqlx::query_as::<_, models::care::WeightSample>(
            sqlite_queries::QUERY_GET_PET_WEIGHT_SAMPLES,
        )
        .bind(pet_id)
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn delete_weight_sample(
        &self,
        sample_id: i64,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<()> {
        sqlx::query(sqlite_queries::QUERY_DELETE_WEIGHT_SAMPLE)
            .bind(sample_id)
            .bind(pet_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await?;
        Ok(())
    }

    async fn insert_feeding_log(
        &self,
        user_id: i64,
        entry: &models::care::FeedingLog,
    ) -> anyhow::Result<i64> {
        Ok(
            sqlx::query_scalar::<_, i64>(sqlite_queries::QUERY_INSERT_FEEDING_LOG)
                .bind(entry.pet_id)
                .bind(user_id)
                .bind(entry.date)
                .bind(entry.time)
                .bind(&entry.food_type)
                .bind(&entry.amount)
                .bind(&entry.notes)
                .bind(entry.created_at)
                .fetch_one(&self.db_pool)
                .await?,
        )
    }

    async fn get_pet_feeding_logs(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::care::FeedingLog>> {
        Ok(
            sqlx::query_as::<_, models::care::FeedingLog>(
                sqlite_queries::QUERY_GET_PET_FEEDING_LOGS,
            )
            .bind(pet_id)
            .bind(user_id)
            .fetch_all(&self.db_pool)
            .await?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    // One connection so every query hits the same in-memory database.
    async fn setup_repo() -> SqlxSqliteRepo {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(
                SqliteConnectOptions::from_str("sqlite::memory:")
                    .unwrap()
                    .pragma("foreign_keys", "ON"),
            )
            .await
            .unwrap();

        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        SqlxSqliteRepo { db_pool: pool }
    }

    async fn table_count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table};"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn seed_pet_with_records(repo: &SqlxSqliteRepo) -> (i64, i64) {
        let user_id = repo
            .save_user_app(&models::user_app::User::create_from_credentials(
                "owner@example.com",
                "hash".into(),
            ))
            .await
            .unwrap();

        let pet_id = repo
            .save_pet(&models::pet::Pet {
                external_id: uuid::Uuid::new_v4(),
                user_app_id: user_id,
                pet_name: "Luna".into(),
                species: "dog".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();

        repo.insert_appointment(
            user_id,
            &models::care::Appointment {
                pet_id,
                date,
                time,
                veterinarian: "Dr. Soto".into(),
                reason: "annual checkup".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        repo.insert_medication(
            user_id,
            &models::care::MedicationCourse {
                pet_id,
                name: "Amoxicillin".into(),
                dose: "250mg".into(),
                start_date: date,
                end_date: date,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        repo.insert_weight_sample(
            user_id,
            &models::care::WeightSample {
                pet_id,
                date,
                weight: 12.5,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        repo.insert_feeding_log(
            user_id,
            &models::care::FeedingLog {
                pet_id,
                date,
                time,
                food_type: "kibble".into(),
                amount: "100g".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        (user_id, pet_id)
    }

    #[ntex::test]
    async fn cascade_delete_empties_every_dependent_table() {
        let repo = setup_repo().await;
        let (user_id, pet_id) = seed_pet_with_records(&repo).await;

        for table in sqlite_queries::PET_DEPENDENT_TABLES {
            assert_eq!(table_count(&repo.db_pool, table).await, 1);
        }

        repo.delete_pet_cascade(pet_id, user_id).await.unwrap();

        for table in sqlite_queries::PET_DEPENDENT_TABLES {
            assert_eq!(table_count(&repo.db_pool, table).await, 0);
        }
        assert!(repo.get_all_pets_user_id(user_id).await.unwrap().is_empty());
    }

    #[ntex::test]
    async fn cascade_delete_rejects_a_foreign_owner() {
        let repo = setup_repo().await;
        let (user_id, pet_id) = seed_pet_with_records(&repo).await;

        assert!(repo.delete_pet_cascade(pet_id, user_id + 1).await.is_err());

        assert_eq!(repo.get_all_pets_user_id(user_id).await.unwrap().len(), 1);
        for table in sqlite_queries::PET_DEPENDENT_TABLES {
            assert_eq!(table_count(&repo.db_pool, table).await, 1);
        }
    }

    #[ntex::test]
    async fn enum_columns_round_trip_through_their_display_strings() {
        let repo = setup_repo().await;
        let (user_id, pet_id) = seed_pet_with_records(&repo).await;

        let appointments = repo.get_pet_appointments(pet_id, user_id).await.unwrap();
        assert_eq!(
            appointments[0].status,
            models::care::AppointmentStatus::Scheduled
        );

        repo.set_appointment_status(
            appointments[0].id,
            pet_id,
            user_id,
            models::care::AppointmentStatus::Completed,
        )
        .await
        .unwrap();

        let appointments = repo.get_pet_appointments(pet_id, user_id).await.unwrap();
        assert_eq!(
            appointments[0].status,
            models::care::AppointmentStatus::Completed
        );
    }

    #[ntex::test]
    async fn saving_a_next_due_date_updates_only_the_matching_column() {
        let repo = setup_repo().await;
        let (user_id, pet_id) = seed_pet_with_records(&repo).await;
        let due = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        repo.set_pet_next_due(
            pet_id,
            user_id,
            models::care::AppointmentCategory::Vaccination,
            due,
        )
        .await
        .unwrap();

        let pet = repo.get_pet_by_id(pet_id, user_id).await.unwrap();
        assert_eq!(pet.next_due.vaccination, Some(due));
        assert_eq!(pet.next_due.deworming, None);
        assert_eq!(pet.next_due.checkup, None);
    }

    #[ntex::test]
    async fn a_corrupted_enum_column_surfaces_as_a_decode_error() {
        let repo = setup_repo().await;
        let (user_id, pet_id) = seed_pet_with_records(&repo).await;

        sqlx::query("UPDATE appointment SET status='archived';")
            .execute(&repo.db_pool)
            .await
            .unwrap();

        assert!(repo.get_pet_appointments(pet_id, user_id).await.is_err());

        sqlx::query("UPDATE medication_course SET frequency='hourly';")
            .execute(&repo.db_pool)
            .await
            .unwrap();

        assert!(repo.get_pet_medications(pet_id, user_id).await.is_err());
    }

    #[ntex::test]
    async fn updates_against_a_foreign_owner_are_not_silent_no_ops() {
        let repo = setup_repo().await;
        let (user_id, pet_id) = seed_pet_with_records(&repo).await;
        let appointment_id = repo.get_pet_appointments(pet_id, user_id).await.unwrap()[0].id;

        assert!(
            repo.set_appointment_status(
                appointment_id,
                pet_id,
                user_id + 1,
                models::care::AppointmentStatus::Completed,
            )
            .await
            .is_err()
        );
        assert!(
            repo.set_medication_status(
                999,
                pet_id,
                user_id,
                models::care::MedicationStatus::Suspended,
            )
            .await
            .is_err()
        );
        assert!(repo.set_user_push_token(user_id + 1, None).await.is_err());
        assert!(
            repo.update_pet(&models::pet::Pet {
                id: pet_id,
                user_app_id: user_id + 1,
                pet_name: "Luna".into(),
                species: "dog".into(),
                ..Default::default()
            })
            .await
            .is_err()
        );

        let appointments = repo.get_pet_appointments(pet_id, user_id).await.unwrap();
        assert_eq!(
            appointments[0].status,
            models::care::AppointmentStatus::Scheduled
        );
    }
}
