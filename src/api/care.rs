//! # Care API Module
//!
//! Per-pet care records: veterinary appointments (with calendar export and
//! "next due" bookkeeping), medication courses (with a best-effort push
//! reminder), weight samples with trend statistics, and feeding logs.

use anyhow::bail;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use derive_more::Display;
use serde::Serialize;

use crate::{
    consts, models, repo,
    services::{self, calendar},
};

/// Time of day used when a record only carries a date, first medication
/// dose and "next due" reminders both anchor here.
const DEFAULT_REMINDER_TIME: (u32, u32) = (9, 0);

fn reminder_time() -> NaiveTime {
    NaiveTime::from_hms_opt(DEFAULT_REMINDER_TIME.0, DEFAULT_REMINDER_TIME.1, 0)
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
pub struct SavedAppointment {
    pub appointment: models::care::Appointment,
    /// Ready-to-open Google Calendar link for the booked slot.
    pub calendar_url: String,
}

/// Books an appointment. The slot must be in the future; saving a
/// vaccination, deworming or checkup also overwrites the pet's matching
/// "next due" date, last write wins.
pub async fn save_appointment(
    mut appointment: models::care::Appointment,
    user_id: i64,
    now: NaiveDateTime,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<SavedAppointment> {
    if appointment.veterinarian.trim().is_empty() {
        bail!("veterinarian is required")
    }

    if appointment.due_at() <= now {
        bail!("the appointment must be scheduled in the future")
    }

    let pet = repo.get_pet_by_id(appointment.pet_id, user_id).await?;

    appointment.status = models::care::AppointmentStatus::Scheduled;
    appointment.id = repo.insert_appointment(user_id, &appointment).await?;

    if matches!(
        appointment.category,
        models::care::AppointmentCategory::Vaccination
            | models::care::AppointmentCategory::Deworming
            | models::care::AppointmentCategory::Checkup
    ) {
        repo.set_pet_next_due(pet.id, user_id, appointment.category, appointment.date)
            .await?;
    }

    let event = calendar::vet_appointment_event(
        &pet.pet_name,
        appointment.category,
        appointment.due_at().and_utc(),
        &appointment.veterinarian,
        &appointment.reason,
        appointment.notes.as_deref(),
    );

    Ok(SavedAppointment {
        calendar_url: calendar::google_calendar_url(&event),
        appointment,
    })
}

/// Appointment history, most recent slot first.
pub async fn get_appointments(
    pet_id: i64,
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<models::care::Appointment>> {
    let mut appointments = repo.get_pet_appointments(pet_id, user_id).await?;
    appointments.sort_by_key(|appointment| std::cmp::Reverse(appointment.due_at()));

    Ok(appointments)
}

pub async fn update_appointment_status(
    appointment_id: i64,
    pet_id: i64,
    user_id: i64,
    status: models::care::AppointmentStatus,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<()> {
    repo.set_appointment_status(appointment_id, pet_id, user_id, status)
        .await
}

pub async fn remove_appointment(
    appointment_id: i64,
    pet_id: i64,
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<()> {
    repo.delete_appointment(appointment_id, pet_id, user_id)
        .await
}

/// Starts a medication course and, when the owner has a registered device,
/// schedules a push reminder for the first dose. The reminder is best
/// effort: a gateway failure is logged and the save still succeeds.
pub async fn save_medication(
    mut medication: models::care::MedicationCourse,
    user_id: i64,
    repo: &repo::ImplAppRepo,
    push: &services::ImplPushService,
) -> anyhow::Result<models::care::MedicationCourse> {
    if medication.name.trim().is_empty() {
        bail!("medication name is required")
    }

    if medication.end_date <= medication.start_date {
        bail!("the end date must be after the start date")
    }

    let pet = repo.get_pet_by_id(medication.pet_id, user_id).await?;

    medication.status = models::care::MedicationStatus::Active;
    medication.id = repo.insert_medication(user_id, &medication).await?;

    if let Some(push_token) = repo
        .get_user_app_by_id(user_id)
        .await?
        .and_then(|user| user.push_token)
    {
        let message = services::PushMessage {
            to: push_token,
            title: format!("💊 Medication time - {}", pet.pet_name),
            body: format!(
                "Give {dose} of {name} to {pet_name} ({frequency}, {days} days)",
                dose = medication.dose,
                name = medication.name,
                pet_name = pet.pet_name,
                frequency = medication.frequency.label(),
                days = medication.duration_days(),
            ),
            trigger_at: medication.start_date.and_time(reminder_time()).and_utc(),
        };

        if let Err(err) = push.schedule_push(&message).await {
            log::warn!(
                "medication reminder couldn't be scheduled for pet {pet_id}: {err:#}",
                pet_id = pet.id
            );
        }
    }

    Ok(medication)
}

/// One Google Calendar link per scheduled dose of the course.
pub fn medication_calendar_links(
    pet_name: &str,
    medication: &models::care::MedicationCourse,
) -> Vec<String> {
    calendar::medication_schedule(pet_name, medication)
        .iter()
        .map(calendar::google_calendar_url)
        .collect()
}

/// Medication history, most recently started course first.
pub async fn get_medications(
    pet_id: i64,
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<models::care::MedicationCourse>> {
    let mut medications = repo.get_pet_medications(pet_id, user_id).await?;
    medications.sort_by_key(|medication| std::cmp::Reverse(medication.start_date));

    Ok(medications)
}

pub async fn update_medication_status(
    medication_id: i64,
    pet_id: i64,
    user_id: i64,
    status: models::care::MedicationStatus,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<()> {
    repo.set_medication_status(medication_id, pet_id, user_id, status)
        .await
}

pub async fn remove_medication(
    medication_id: i64,
    pet_id: i64,
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<()> {
    repo.delete_medication(medication_id, pet_id, user_id).await
}

/// Records a weight sample and mirrors it onto the pet card.
pub async fn add_weight_sample(
    mut sample: models::care::WeightSample,
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<models::care::WeightSample> {
    if sample.weight <= 0.0 {
        bail!("weight must be greater than zero")
    }

    sample.id = repo.insert_weight_sample(user_id, &sample).await?;
    repo.set_pet_last_weight(sample.pet_id, user_id, sample.weight)
        .await?;

    Ok(sample)
}

/// Weight history in chart order, oldest sample first.
pub async fn get_weight_samples(
    pet_id: i64,
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<models::care::WeightSample>> {
    let mut samples = repo.get_pet_weight_samples(pet_id, user_id).await?;
    samples.sort_by_key(|sample| sample.date);

    Ok(samples)
}

pub async fn remove_weight_sample(
    sample_id: i64,
    pet_id: i64,
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<()> {
    repo.delete_weight_sample(sample_id, pet_id, user_id).await
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize)]
pub enum WeightTrend {
    #[display("increasing")]
    #[serde(rename = "increasing")]
    Increasing,
    #[display("decreasing")]
    #[serde(rename = "decreasing")]
    Decreasing,
    #[display("stable")]
    #[serde(rename = "stable")]
    Stable,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct WeightStats {
    pub samples: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub trend: WeightTrend,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Summary statistics over a weight history sorted oldest first. Needs at
/// least two samples; the trend additionally needs two full comparison
/// windows, otherwise it reads as stable.
pub fn compute_weight_stats(samples: &[models::care::WeightSample]) -> Option<WeightStats> {
    if samples.len() < 2 {
        return None;
    }

    let weights: Vec<f64> = samples.iter().map(|sample| sample.weight).collect();
    let min = weights.iter().copied().fold(f64::INFINITY, f64::min);
    let max = weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let window = consts::WEIGHT_TREND_WINDOW;
    let trend = if weights.len() < window * 2 {
        WeightTrend::Stable
    } else {
        let recent = mean(&weights[weights.len() - window..]);
        let previous = mean(&weights[weights.len() - window * 2..weights.len() - window]);

        match recent - previous {
            delta if delta > consts::WEIGHT_TREND_HYSTERESIS => WeightTrend::Increasing,
            delta if delta < -consts::WEIGHT_TREND_HYSTERESIS => WeightTrend::Decreasing,
            _ => WeightTrend::Stable,
        }
    };

    Some(WeightStats {
        samples: weights.len(),
        min,
        max,
        mean: mean(&weights),
        trend,
    })
}

pub async fn add_feeding_log(
    mut entry: models::care::FeedingLog,
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<models::care::FeedingLog> {
    if entry.food_type.trim().is_empty() || entry.amount.trim().is_empty() {
        bail!("food type and amount are required")
    }

    entry.id = repo.insert_feeding_log(user_id, &entry).await?;

    Ok(entry)
}

/// Feeding history, most recent meal first.
pub async fn get_feeding_logs(
    pet_id: i64,
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<models::care::FeedingLog>> {
    let mut entries = repo.get_pet_feeding_logs(pet_id, user_id).await?;
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.date.and_time(entry.time)));

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{repo::MockAppRepo, services::MockPushService};
    use chrono::Utc;
    use mockall::predicate::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample(day: u32, weight: f64) -> models::care::WeightSample {
        models::care::WeightSample {
            id: day as i64,
            pet_id: 1,
            date: date(2025, 3, day),
            weight,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn vaccination_appointment() -> models::care::Appointment {
        models::care::Appointment {
            pet_id: 3,
            date: date(2025, 3, 20),
            time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            category: models::care::AppointmentCategory::Vaccination,
            veterinarian: "Dr. Soto".into(),
            reason: "rabies booster".into(),
            ..Default::default()
        }
    }

    fn medication(start: NaiveDate, end: NaiveDate) -> models::care::MedicationCourse {
        models::care::MedicationCourse {
            pet_id: 3,
            name: "Amoxicillin".into(),
            dose: "250mg".into(),
            start_date: start,
            end_date: end,
            ..Default::default()
        }
    }

    fn repo_with_pet() -> MockAppRepo {
        let mut mock = MockAppRepo::new();
        mock.expect_get_pet_by_id().returning(|pet_id, user_id| {
            Ok(models::pet::Pet {
                id: pet_id,
                user_app_id: user_id,
                pet_name: "Luna".into(),
                ..Default::default()
            })
        });

        mock
    }

    #[ntex::test]
    async fn past_appointments_are_rejected() {
        let repo: repo::ImplAppRepo = Box::new(MockAppRepo::new());
        let now = date(2025, 3, 20).and_hms_opt(12, 0, 0).unwrap();

        let err = save_appointment(vaccination_appointment(), 42, now, &repo)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("in the future"));
    }

    #[ntex::test]
    async fn saving_a_vaccination_updates_the_next_due_date() {
        let mut mock = repo_with_pet();
        mock.expect_insert_appointment().returning(|_, _| Ok(11));
        mock.expect_set_pet_next_due()
            .with(
                eq(3),
                eq(42),
                eq(models::care::AppointmentCategory::Vaccination),
                eq(date(2025, 3, 20)),
            )
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let repo: repo::ImplAppRepo = Box::new(mock);
        let now = date(2025, 3, 1).and_hms_opt(8, 0, 0).unwrap();

        let saved = save_appointment(vaccination_appointment(), 42, now, &repo)
            .await
            .unwrap();

        assert_eq!(saved.appointment.id, 11);
        assert_eq!(
            saved.appointment.status,
            models::care::AppointmentStatus::Scheduled
        );
        assert!(saved.calendar_url.contains("action=TEMPLATE"));
    }

    #[ntex::test]
    async fn emergency_appointments_leave_next_due_dates_alone() {
        let mut mock = repo_with_pet();
        mock.expect_insert_appointment().returning(|_, _| Ok(12));
        mock.expect_set_pet_next_due().times(0);

        let repo: repo::ImplAppRepo = Box::new(mock);
        let now = date(2025, 3, 1).and_hms_opt(8, 0, 0).unwrap();
        let appointment = models::care::Appointment {
            category: models::care::AppointmentCategory::Emergency,
            ..vaccination_appointment()
        };

        save_appointment(appointment, 42, now, &repo).await.unwrap();
    }

    #[ntex::test]
    async fn medication_needs_end_after_start() {
        let repo: repo::ImplAppRepo = Box::new(MockAppRepo::new());
        let push: services::ImplPushService = Box::new(MockPushService::new());

        let err = save_medication(
            medication(date(2025, 3, 10), date(2025, 3, 10)),
            42,
            &repo,
            &push,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("after the start date"));
    }

    #[ntex::test]
    async fn push_gateway_failure_does_not_fail_the_save() {
        let mut mock = repo_with_pet();
        mock.expect_insert_medication().returning(|_, _| Ok(21));
        mock.expect_get_user_app_by_id().returning(|_| {
            Ok(Some(models::user_app::User {
                push_token: Some("device-token".into()),
                ..models::user_app::User::create_from_credentials(
                    "owner@example.com",
                    "hash".into(),
                )
            }))
        });

        let mut push_mock = MockPushService::new();
        push_mock
            .expect_schedule_push()
            .times(1)
            .returning(|_| anyhow::bail!("gateway unavailable"));

        let repo: repo::ImplAppRepo = Box::new(mock);
        let push: services::ImplPushService = Box::new(push_mock);

        let saved = save_medication(
            medication(date(2025, 3, 10), date(2025, 3, 17)),
            42,
            &repo,
            &push,
        )
        .await
        .unwrap();

        assert_eq!(saved.id, 21);
    }

    #[ntex::test]
    async fn weight_sample_is_mirrored_onto_the_pet() {
        let mut mock = MockAppRepo::new();
        mock.expect_insert_weight_sample().returning(|_, _| Ok(31));
        mock.expect_set_pet_last_weight()
            .with(eq(1), eq(42), eq(12.5))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let repo: repo::ImplAppRepo = Box::new(mock);
        let saved = add_weight_sample(sample(5, 12.5), 42, &repo).await.unwrap();

        assert_eq!(saved.id, 31);
    }

    #[test]
    fn weight_stats_need_two_samples() {
        assert!(compute_weight_stats(&[]).is_none());
        assert!(compute_weight_stats(&[sample(1, 10.0)]).is_none());
    }

    #[test]
    fn short_histories_read_as_stable() {
        let samples: Vec<_> = (1..=5).map(|day| sample(day, day as f64 * 2.0)).collect();

        let stats = compute_weight_stats(&samples).unwrap();

        assert_eq!(stats.trend, WeightTrend::Stable);
        assert_eq!(stats.samples, 5);
    }

    #[test]
    fn window_means_decide_the_trend() {
        let increasing: Vec<_> = [10.0, 10.2, 10.1, 11.0, 11.4, 11.2]
            .iter()
            .enumerate()
            .map(|(day, weight)| sample(day as u32 + 1, *weight))
            .collect();
        let stats = compute_weight_stats(&increasing).unwrap();
        assert_eq!(stats.trend, WeightTrend::Increasing);

        let decreasing: Vec<_> = [11.0, 11.4, 11.2, 10.0, 10.2, 10.1]
            .iter()
            .enumerate()
            .map(|(day, weight)| sample(day as u32 + 1, *weight))
            .collect();
        let stats = compute_weight_stats(&decreasing).unwrap();
        assert_eq!(stats.trend, WeightTrend::Decreasing);
    }

    #[test]
    fn trend_ignores_noise_inside_the_hysteresis_band() {
        let noisy: Vec<_> = [10.0, 10.2, 10.1, 10.3, 10.4, 10.2]
            .iter()
            .enumerate()
            .map(|(day, weight)| sample(day as u32 + 1, *weight))
            .collect();

        let stats = compute_weight_stats(&noisy).unwrap();

        assert_eq!(stats.trend, WeightTrend::Stable);
    }
}
