//! # Dashboard API Module
//!
//! Cross-pet aggregation for the home screen: one pass over every pet of
//! the owner collecting upcoming appointments, active medication courses
//! and prioritized care alerts, plus a merged "upcoming events" feed.
//!
//! A pet whose records can't be fetched contributes empty lists instead of
//! failing the whole dashboard.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use derive_more::Display;
use futures::future::join_all;
use serde::Serialize;

use crate::{api, consts, models, repo, utils};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AlertPriority {
    #[display("low")]
    #[serde(rename = "low")]
    Low,
    #[display("medium")]
    #[serde(rename = "medium")]
    Medium,
    #[display("high")]
    #[serde(rename = "high")]
    High,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize)]
pub enum AlertKind {
    #[display("urgent_appointment")]
    #[serde(rename = "urgent_appointment")]
    UrgentAppointment,
    #[display("medication_ending")]
    #[serde(rename = "medication_ending")]
    MedicationEnding,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CareAlert {
    pub pet_id: i64,
    pub pet_name: String,
    pub kind: AlertKind,
    pub title: String,
    pub description: String,
    pub days_remaining: i64,
    pub priority: AlertPriority,
}

/// An appointment annotated with the owning pet and how far out it is.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingAppointment {
    pub id: i64,
    pub pet_id: i64,
    pub pet_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub category: models::care::AppointmentCategory,
    pub veterinarian: String,
    pub reason: String,
    pub days_remaining: i64,
}

/// A running medication course annotated with the owning pet and the days
/// left until its end date.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveMedication {
    pub id: i64,
    pub pet_id: i64,
    pub pet_name: String,
    pub name: String,
    pub dose: String,
    pub frequency: models::care::MedicationFrequency,
    pub end_date: NaiveDate,
    pub days_remaining: i64,
}

/// Everything a single pet contributes to the dashboard.
#[derive(Debug, Default)]
pub struct PetEvents {
    pub appointments: Vec<UpcomingAppointment>,
    pub medications: Vec<ActiveMedication>,
    pub alerts: Vec<CareAlert>,
}

fn appointment_alert_enabled(
    pet: &models::pet::Pet,
    category: models::care::AppointmentCategory,
) -> bool {
    match category {
        models::care::AppointmentCategory::Vaccination => pet.alerts.vaccination,
        models::care::AppointmentCategory::Deworming => pet.alerts.deworming,
        models::care::AppointmentCategory::Checkup => pet.alerts.checkup,
        _ => true,
    }
}

fn appointment_alert(pet: &models::pet::Pet, appointment: &UpcomingAppointment) -> CareAlert {
    let (priority, when) = if appointment.days_remaining == 0 {
        (AlertPriority::High, "today")
    } else {
        (AlertPriority::Medium, "tomorrow")
    };

    CareAlert {
        pet_id: pet.id,
        pet_name: pet.pet_name.clone(),
        kind: AlertKind::UrgentAppointment,
        title: format!("{} has an appointment {when}", pet.pet_name),
        description: format!(
            "{category} with {veterinarian}",
            category = appointment.category,
            veterinarian = appointment.veterinarian
        ),
        days_remaining: appointment.days_remaining,
        priority,
    }
}

fn medication_alert(pet: &models::pet::Pet, medication: &ActiveMedication) -> CareAlert {
    let priority = if medication.days_remaining <= 1 {
        AlertPriority::High
    } else {
        AlertPriority::Low
    };

    let when = match medication.days_remaining {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        days => format!("in {days} days"),
    };

    CareAlert {
        pet_id: pet.id,
        pet_name: pet.pet_name.clone(),
        kind: AlertKind::MedicationEnding,
        title: format!("{} for {} ends {when}", medication.name, pet.pet_name),
        description: format!(
            "{dose}, {frequency}",
            dose = medication.dose,
            frequency = medication.frequency.label()
        ),
        days_remaining: medication.days_remaining,
        priority,
    }
}

/// Collects one pet's dashboard contribution as of `today`. Each record
/// fetch is isolated: a failure logs a warning and yields an empty list so
/// the other sections and the other pets still render.
pub async fn collect_pet_events(
    pet: &models::pet::Pet,
    today: NaiveDate,
    repo: &repo::ImplAppRepo,
) -> PetEvents {
    let appointments = repo
        .get_pet_appointments(pet.id, pet.user_app_id)
        .await
        .unwrap_or_else(|err| {
            log::warn!(
                "appointments couldn't be fetched for pet {pet_id}: {err:#}",
                pet_id = pet.id
            );
            Vec::new()
        });

    let medications = repo
        .get_pet_medications(pet.id, pet.user_app_id)
        .await
        .unwrap_or_else(|err| {
            log::warn!(
                "medications couldn't be fetched for pet {pet_id}: {err:#}",
                pet_id = pet.id
            );
            Vec::new()
        });

    let mut events = PetEvents::default();

    for appointment in appointments
        .iter()
        .filter(|a| a.status == models::care::AppointmentStatus::Scheduled)
    {
        let days = utils::days_remaining(appointment.date, today);
        if days < 0 {
            continue;
        }

        let upcoming = UpcomingAppointment {
            id: appointment.id,
            pet_id: pet.id,
            pet_name: pet.pet_name.clone(),
            date: appointment.date,
            time: appointment.time,
            category: appointment.category,
            veterinarian: appointment.veterinarian.clone(),
            reason: appointment.reason.clone(),
            days_remaining: days,
        };

        if days <= consts::APPOINTMENT_ALERT_DAYS
            && appointment_alert_enabled(pet, appointment.category)
        {
            events.alerts.push(appointment_alert(pet, &upcoming));
        }

        events.appointments.push(upcoming);
    }

    for medication in medications.iter().filter(|m| m.is_active(today)) {
        let active = ActiveMedication {
            id: medication.id,
            pet_id: pet.id,
            pet_name: pet.pet_name.clone(),
            name: medication.name.clone(),
            dose: medication.dose.clone(),
            frequency: medication.frequency,
            end_date: medication.end_date,
            days_remaining: utils::days_remaining(medication.end_date, today),
        };

        if active.days_remaining <= consts::MEDICATION_ALERT_DAYS && pet.alerts.medication {
            events.alerts.push(medication_alert(pet, &active));
        }

        events.medications.push(active);
    }

    events
}

/// Orders alerts by priority, highest first. The sort is stable, so alerts
/// sharing a priority keep their collection order.
pub fn prioritize_alerts(mut alerts: Vec<CareAlert>) -> Vec<CareAlert> {
    alerts.sort_by(|a, b| b.priority.cmp(&a.priority));

    alerts
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DashboardCounts {
    pub pets: usize,
    pub upcoming_appointments: usize,
    pub active_medications: usize,
    pub alerts: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub pets: Vec<api::pet::PetCardSchema>,
    pub upcoming_appointments: Vec<UpcomingAppointment>,
    pub active_medications: Vec<ActiveMedication>,
    pub alerts: Vec<CareAlert>,
    /// Totals measured before the display caps were applied.
    pub counts: DashboardCounts,
}

/// Builds the owner's dashboard: every pet is collected concurrently, the
/// per-pet results are flattened, globally ordered and capped for display.
/// Counts reflect the totals before capping.
pub async fn build_dashboard(
    user_id: i64,
    today: NaiveDate,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<DashboardSnapshot> {
    let pets = repo.get_all_pets_user_id(user_id).await?;

    let collected = join_all(
        pets.iter()
            .map(|pet| collect_pet_events(pet, today, repo)),
    )
    .await;

    let mut upcoming_appointments = Vec::new();
    let mut active_medications = Vec::new();
    let mut alerts = Vec::new();
    for events in collected {
        upcoming_appointments.extend(events.appointments);
        active_medications.extend(events.medications);
        alerts.extend(events.alerts);
    }

    upcoming_appointments.sort_by_key(|appointment| (appointment.date, appointment.time));
    active_medications.sort_by_key(|medication| medication.days_remaining);
    let mut alerts = prioritize_alerts(alerts);

    let counts = DashboardCounts {
        pets: pets.len(),
        upcoming_appointments: upcoming_appointments.len(),
        active_medications: active_medications.len(),
        alerts: alerts.len(),
    };

    upcoming_appointments.truncate(consts::MAX_SUMMARY_APPOINTMENTS);
    active_medications.truncate(consts::MAX_SUMMARY_MEDICATIONS);
    alerts.truncate(consts::MAX_DASHBOARD_ALERTS);

    Ok(DashboardSnapshot {
        pets: pets
            .iter()
            .map(|pet| api::pet::PetCardSchema::from_pet(pet, today))
            .collect(),
        upcoming_appointments,
        active_medications,
        alerts,
        counts,
    })
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize)]
pub enum DashboardEventKind {
    #[display("appointment")]
    #[serde(rename = "appointment")]
    Appointment,
    #[display("vaccination")]
    #[serde(rename = "vaccination")]
    Vaccination,
    #[display("deworming")]
    #[serde(rename = "deworming")]
    Deworming,
    #[display("checkup")]
    #[serde(rename = "checkup")]
    Checkup,
}

/// One entry of the merged events feed. Appointments and the pet "next
/// due" dates share this shape; the id encodes the source so the client
/// can deduplicate.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardEvent {
    pub id: String,
    pub pet_id: i64,
    pub pet_name: String,
    pub kind: DashboardEventKind,
    pub title: String,
    pub description: String,
    pub due_at: NaiveDateTime,
}

fn next_due_event(
    pet: &models::pet::Pet,
    kind: DashboardEventKind,
    due: NaiveDate,
    today: NaiveDate,
    enabled: bool,
) -> Option<DashboardEvent> {
    if !enabled || due < today {
        return None;
    }

    Some(DashboardEvent {
        id: format!("{}-{kind}", pet.external_id),
        pet_id: pet.id,
        pet_name: pet.pet_name.clone(),
        kind,
        title: format!("{} due", capitalize(&kind.to_string())),
        description: format!("Next {kind} for {}", pet.pet_name),
        due_at: due.and_time(NaiveTime::MIN),
    })
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Chronological feed of everything coming up for the owner: scheduled
/// appointments plus the per-pet "next due" care dates, soonest first.
pub async fn upcoming_events(
    user_id: i64,
    today: NaiveDate,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<DashboardEvent>> {
    let pets = repo.get_all_pets_user_id(user_id).await?;

    let per_pet_appointments = join_all(pets.iter().map(|pet| async move {
        repo.get_pet_appointments(pet.id, pet.user_app_id)
            .await
            .unwrap_or_else(|err| {
                log::warn!(
                    "appointments couldn't be fetched for pet {pet_id}: {err:#}",
                    pet_id = pet.id
                );
                Vec::new()
            })
    }))
    .await;

    let mut events = Vec::new();

    for (pet, appointments) in pets.iter().zip(per_pet_appointments) {
        for appointment in appointments.iter().filter(|a| {
            a.status == models::care::AppointmentStatus::Scheduled && a.date >= today
        }) {
            events.push(DashboardEvent {
                id: format!("appointment-{}", appointment.id),
                pet_id: pet.id,
                pet_name: pet.pet_name.clone(),
                kind: DashboardEventKind::Appointment,
                title: format!("{} appointment", capitalize(&appointment.category.to_string())),
                description: format!(
                    "{reason} with {veterinarian}",
                    reason = appointment.reason,
                    veterinarian = appointment.veterinarian
                ),
                due_at: appointment.due_at(),
            });
        }

        events.extend(next_due_event(
            pet,
            DashboardEventKind::Vaccination,
            pet.next_due.vaccination.unwrap_or(NaiveDate::MIN),
            today,
            pet.next_due.vaccination.is_some() && pet.alerts.vaccination,
        ));
        events.extend(next_due_event(
            pet,
            DashboardEventKind::Deworming,
            pet.next_due.deworming.unwrap_or(NaiveDate::MIN),
            today,
            pet.next_due.deworming.is_some() && pet.alerts.deworming,
        ));
        events.extend(next_due_event(
            pet,
            DashboardEventKind::Checkup,
            pet.next_due.checkup.unwrap_or(NaiveDate::MIN),
            today,
            pet.next_due.checkup.is_some() && pet.alerts.checkup,
        ));
    }

    events.sort_by_key(|event| event.due_at);

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockAppRepo;
    use chrono::{Duration, Utc};
    use mockall::predicate::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn pet(id: i64, name: &str) -> models::pet::Pet {
        models::pet::Pet {
            id,
            external_id: uuid::Uuid::new_v4(),
            user_app_id: 42,
            pet_name: name.into(),
            species: "dog".into(),
            ..Default::default()
        }
    }

    fn appointment_on(pet_id: i64, date: NaiveDate) -> models::care::Appointment {
        models::care::Appointment {
            id: date.and_time(NaiveTime::MIN).and_utc().timestamp(),
            pet_id,
            date,
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            category: models::care::AppointmentCategory::Checkup,
            veterinarian: "Dr. Soto".into(),
            reason: "checkup".into(),
            status: models::care::AppointmentStatus::Scheduled,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn medication_until(pet_id: i64, end: NaiveDate) -> models::care::MedicationCourse {
        models::care::MedicationCourse {
            id: end.and_time(NaiveTime::MIN).and_utc().timestamp(),
            pet_id,
            name: "Amoxicillin".into(),
            dose: "250mg".into(),
            frequency: models::care::MedicationFrequency::Daily,
            start_date: end - Duration::days(7),
            end_date: end,
            status: models::care::MedicationStatus::Active,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn repo_with_records(
        appointments: Vec<models::care::Appointment>,
        medications: Vec<models::care::MedicationCourse>,
    ) -> repo::ImplAppRepo {
        let mut mock = MockAppRepo::new();
        mock.expect_get_pet_appointments()
            .returning(move |_, _| Ok(appointments.clone()));
        mock.expect_get_pet_medications()
            .returning(move |_, _| Ok(medications.clone()));

        Box::new(mock)
    }

    #[ntex::test]
    async fn pet_without_records_contributes_nothing() {
        let repo = repo_with_records(Vec::new(), Vec::new());

        let events = collect_pet_events(&pet(1, "Luna"), today(), &repo).await;

        assert!(events.appointments.is_empty());
        assert!(events.medications.is_empty());
        assert!(events.alerts.is_empty());
    }

    #[ntex::test]
    async fn failed_fetch_is_isolated_per_section() {
        let mut mock = MockAppRepo::new();
        mock.expect_get_pet_appointments()
            .returning(|_, _| anyhow::bail!("db timeout"));
        mock.expect_get_pet_medications()
            .returning(|_, _| Ok(vec![medication_until(1, today())]));

        let repo: repo::ImplAppRepo = Box::new(mock);
        let events = collect_pet_events(&pet(1, "Luna"), today(), &repo).await;

        assert!(events.appointments.is_empty());
        assert_eq!(events.medications.len(), 1);
        assert_eq!(events.alerts.len(), 1);
    }

    #[ntex::test]
    async fn appointment_today_is_high_and_tomorrow_is_medium() {
        let repo = repo_with_records(
            vec![
                appointment_on(1, today()),
                appointment_on(1, today() + Duration::days(1)),
                appointment_on(1, today() + Duration::days(2)),
            ],
            Vec::new(),
        );

        let events = collect_pet_events(&pet(1, "Luna"), today(), &repo).await;

        assert_eq!(events.appointments.len(), 3);
        assert_eq!(events.alerts.len(), 2);
        assert_eq!(events.alerts[0].priority, AlertPriority::High);
        assert!(events.alerts[0].title.contains("today"));
        assert_eq!(events.alerts[1].priority, AlertPriority::Medium);
        assert!(events.alerts[1].title.contains("tomorrow"));
    }

    #[ntex::test]
    async fn past_and_non_scheduled_appointments_are_dropped() {
        let mut cancelled = appointment_on(1, today() + Duration::days(1));
        cancelled.status = models::care::AppointmentStatus::Cancelled;

        let repo = repo_with_records(
            vec![appointment_on(1, today() - Duration::days(1)), cancelled],
            Vec::new(),
        );

        let events = collect_pet_events(&pet(1, "Luna"), today(), &repo).await;

        assert!(events.appointments.is_empty());
        assert!(events.alerts.is_empty());
    }

    #[ntex::test]
    async fn medication_alert_band_is_inclusive_at_three_days() {
        let repo = repo_with_records(
            Vec::new(),
            vec![
                medication_until(1, today()),
                medication_until(1, today() + Duration::days(1)),
                medication_until(1, today() + Duration::days(3)),
                medication_until(1, today() + Duration::days(4)),
            ],
        );

        let events = collect_pet_events(&pet(1, "Luna"), today(), &repo).await;

        assert_eq!(events.medications.len(), 4);
        assert_eq!(events.alerts.len(), 3);
        assert_eq!(events.alerts[0].priority, AlertPriority::High);
        assert_eq!(events.alerts[1].priority, AlertPriority::High);
        assert_eq!(events.alerts[2].priority, AlertPriority::Low);
    }

    #[ntex::test]
    async fn expired_and_suspended_medications_are_not_active() {
        let mut suspended = medication_until(1, today() + Duration::days(5));
        suspended.status = models::care::MedicationStatus::Suspended;

        let repo = repo_with_records(
            Vec::new(),
            vec![medication_until(1, today() - Duration::days(1)), suspended],
        );

        let events = collect_pet_events(&pet(1, "Luna"), today(), &repo).await;

        assert!(events.medications.is_empty());
        assert!(events.alerts.is_empty());
    }

    #[ntex::test]
    async fn disabled_alert_toggle_silences_but_keeps_the_record() {
        let repo = repo_with_records(Vec::new(), vec![medication_until(1, today())]);

        let mut silent_pet = pet(1, "Luna");
        silent_pet.alerts.medication = false;

        let events = collect_pet_events(&silent_pet, today(), &repo).await;

        assert_eq!(events.medications.len(), 1);
        assert!(events.alerts.is_empty());
    }

    #[test]
    fn alerts_sharing_a_priority_keep_their_order() {
        let alert = |title: &str, priority| CareAlert {
            pet_id: 1,
            pet_name: "Luna".into(),
            kind: AlertKind::MedicationEnding,
            title: title.into(),
            description: String::new(),
            days_remaining: 0,
            priority,
        };

        let sorted = prioritize_alerts(vec![
            alert("first high", AlertPriority::High),
            alert("first low", AlertPriority::Low),
            alert("second high", AlertPriority::High),
            alert("second low", AlertPriority::Low),
        ]);

        let titles: Vec<_> = sorted.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["first high", "second high", "first low", "second low"]
        );
    }

    #[ntex::test]
    async fn dashboard_orders_appointments_across_pets_by_date() {
        let mut mock = MockAppRepo::new();
        // Pets deliberately returned in the opposite order of their next
        // appointment.
        mock.expect_get_all_pets_user_id()
            .returning(|_| Ok(vec![pet(1, "Luna"), pet(2, "Milo")]));
        mock.expect_get_pet_appointments()
            .with(eq(1), eq(42))
            .returning(|_, _| Ok(vec![appointment_on(1, today() + Duration::days(5))]));
        mock.expect_get_pet_appointments()
            .with(eq(2), eq(42))
            .returning(|_, _| Ok(vec![appointment_on(2, today() + Duration::days(2))]));
        mock.expect_get_pet_medications()
            .returning(|_, _| Ok(Vec::new()));

        let repo: repo::ImplAppRepo = Box::new(mock);
        let snapshot = build_dashboard(42, today(), &repo).await.unwrap();

        assert_eq!(snapshot.upcoming_appointments.len(), 2);
        assert_eq!(snapshot.upcoming_appointments[0].pet_name, "Milo");
        assert_eq!(snapshot.upcoming_appointments[1].pet_name, "Luna");
    }

    #[ntex::test]
    async fn urgent_medication_outranks_tomorrows_appointment() {
        let mut mock = MockAppRepo::new();
        mock.expect_get_all_pets_user_id()
            .returning(|_| Ok(vec![pet(1, "Luna"), pet(2, "Milo")]));
        mock.expect_get_pet_appointments()
            .with(eq(1), eq(42))
            .returning(|_, _| Ok(vec![appointment_on(1, today() + Duration::days(1))]));
        mock.expect_get_pet_appointments()
            .with(eq(2), eq(42))
            .returning(|_, _| Ok(Vec::new()));
        mock.expect_get_pet_medications()
            .with(eq(1), eq(42))
            .returning(|_, _| Ok(Vec::new()));
        mock.expect_get_pet_medications()
            .with(eq(2), eq(42))
            .returning(|_, _| Ok(vec![medication_until(2, today())]));

        let repo: repo::ImplAppRepo = Box::new(mock);
        let snapshot = build_dashboard(42, today(), &repo).await.unwrap();

        assert_eq!(snapshot.alerts.len(), 2);
        assert_eq!(snapshot.alerts[0].pet_name, "Milo");
        assert_eq!(snapshot.alerts[0].priority, AlertPriority::High);
        assert_eq!(snapshot.alerts[0].kind, AlertKind::MedicationEnding);
        assert_eq!(snapshot.alerts[1].pet_name, "Luna");
        assert_eq!(snapshot.alerts[1].priority, AlertPriority::Medium);
    }

    #[ntex::test]
    async fn counts_are_measured_before_the_display_caps() {
        let appointments: Vec<_> = (1..=4)
            .map(|offset| appointment_on(1, today() + Duration::days(offset + 1)))
            .collect();
        let medications: Vec<_> = (0..6).map(|_| medication_until(1, today())).collect();

        let mut mock = MockAppRepo::new();
        mock.expect_get_all_pets_user_id()
            .returning(|_| Ok(vec![pet(1, "Luna")]));
        mock.expect_get_pet_appointments()
            .returning(move |_, _| Ok(appointments.clone()));
        mock.expect_get_pet_medications()
            .returning(move |_, _| Ok(medications.clone()));

        let repo: repo::ImplAppRepo = Box::new(mock);
        let snapshot = build_dashboard(42, today(), &repo).await.unwrap();

        assert_eq!(snapshot.counts.upcoming_appointments, 4);
        assert_eq!(snapshot.counts.active_medications, 6);
        assert_eq!(snapshot.counts.alerts, 6);
        assert_eq!(
            snapshot.upcoming_appointments.len(),
            consts::MAX_SUMMARY_APPOINTMENTS
        );
        assert_eq!(
            snapshot.active_medications.len(),
            consts::MAX_SUMMARY_MEDICATIONS
        );
        assert_eq!(snapshot.alerts.len(), consts::MAX_DASHBOARD_ALERTS);
    }

    #[ntex::test]
    async fn failing_pet_leaves_the_others_on_the_dashboard() {
        let mut mock = MockAppRepo::new();
        mock.expect_get_all_pets_user_id()
            .returning(|_| Ok(vec![pet(1, "Luna"), pet(2, "Milo")]));
        mock.expect_get_pet_appointments()
            .with(eq(1), eq(42))
            .returning(|_, _| anyhow::bail!("db timeout"));
        mock.expect_get_pet_appointments()
            .with(eq(2), eq(42))
            .returning(|_, _| Ok(vec![appointment_on(2, today() + Duration::days(2))]));
        mock.expect_get_pet_medications()
            .with(eq(1), eq(42))
            .returning(|_, _| anyhow::bail!("db timeout"));
        mock.expect_get_pet_medications()
            .with(eq(2), eq(42))
            .returning(|_, _| Ok(Vec::new()));

        let repo: repo::ImplAppRepo = Box::new(mock);
        let snapshot = build_dashboard(42, today(), &repo).await.unwrap();

        assert_eq!(snapshot.counts.pets, 2);
        assert_eq!(snapshot.upcoming_appointments.len(), 1);
        assert_eq!(snapshot.upcoming_appointments[0].pet_name, "Milo");
    }

    #[ntex::test]
    async fn events_feed_merges_appointments_and_next_due_dates() {
        let mut luna = pet(1, "Luna");
        luna.next_due.vaccination = Some(today() + Duration::days(10));
        luna.next_due.deworming = Some(today() - Duration::days(2));

        let mut mock = MockAppRepo::new();
        mock.expect_get_all_pets_user_id()
            .returning(move |_| Ok(vec![luna.clone()]));
        mock.expect_get_pet_appointments()
            .returning(|_, _| Ok(vec![appointment_on(1, today() + Duration::days(2))]));

        let repo: repo::ImplAppRepo = Box::new(mock);
        let events = upcoming_events(42, today(), &repo).await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, DashboardEventKind::Appointment);
        assert!(events[0].id.starts_with("appointment-"));
        assert_eq!(events[1].kind, DashboardEventKind::Vaccination);
        assert!(events[1].id.ends_with("-vaccination"));
        assert!(events[0].due_at <= events[1].due_at);
    }
}
