//! One-way calendar export. The service builds a Google Calendar event URL
//! and hands it to the client; there is no read-back or sync.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::models;

const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// Hard cap on generated medication dose events so long courses do not
/// flood the calendar.
const MAX_MEDICATION_EVENTS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    pub location: Option<String>,
}

/// Compressed UTC timestamp format Google expects in the `dates` query
/// parameter: `YYYYMMDDTHHMMSSZ`.
fn format_date_for_google(date: DateTime<Utc>) -> String {
    date.format("%Y%m%dT%H%M%SZ").to_string()
}

pub fn google_calendar_url(event: &CalendarEvent) -> String {
    let mut url = url::Url::parse(GOOGLE_CALENDAR_RENDER_URL)
        .expect("static calendar base url is always valid");

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("action", "TEMPLATE")
            .append_pair("text", &event.title)
            .append_pair(
                "dates",
                &format!(
                    "{}/{}",
                    format_date_for_google(event.start),
                    format_date_for_google(event.end)
                ),
            )
            .append_pair("details", &event.description);

        if let Some(location) = &event.location {
            query.append_pair("location", location);
        }
    }

    url.to_string()
}

/// Builds the export event for a booked veterinary appointment, one hour
/// long starting at the appointment time.
pub fn vet_appointment_event(
    pet_name: &str,
    category: models::care::AppointmentCategory,
    starts_at: DateTime<Utc>,
    veterinarian: &str,
    reason: &str,
    notes: Option<&str>,
) -> CalendarEvent {
    let notes_line = notes
        .filter(|n| !n.is_empty())
        .map(|n| format!("\nNotes: {n}"))
        .unwrap_or_default();

    CalendarEvent {
        title: format!("🐾 Vet appointment: {pet_name}"),
        start: starts_at,
        end: starts_at + Duration::hours(1),
        description: format!("Appointment type: {category}\nReason: {reason}{notes_line}"),
        location: Some(veterinarian.to_string()),
    }
}

fn frequency_interval_hours(frequency: models::care::MedicationFrequency) -> i64 {
    match frequency {
        models::care::MedicationFrequency::Every8Hours => 8,
        models::care::MedicationFrequency::Every12Hours => 12,
        models::care::MedicationFrequency::Daily => 24,
        models::care::MedicationFrequency::Every2Days => 48,
        models::care::MedicationFrequency::Weekly => 168,
        models::care::MedicationFrequency::AsNeeded => 24,
    }
}

/// Expands a medication course into per-dose calendar events: first dose at
/// 09:00 on the start date, then stepping by the frequency interval until
/// the end date or the event cap.
pub fn medication_schedule(
    pet_name: &str,
    medication: &models::care::MedicationCourse,
) -> Vec<CalendarEvent> {
    let mut events = Vec::new();

    let first_dose = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
    let mut current = medication.start_date.and_time(first_dose).and_utc();
    let last = medication.end_date.and_time(first_dose).and_utc();
    let interval = Duration::hours(frequency_interval_hours(medication.frequency));

    let mut dose = 1usize;
    while current <= last && dose <= MAX_MEDICATION_EVENTS {
        events.push(CalendarEvent {
            title: format!("💊 {} - {pet_name}", medication.name),
            start: current,
            end: current + Duration::minutes(15),
            description: format!(
                "Give {dose_amount} of {name} to {pet_name}\nFrequency: {frequency}\nDose {dose}",
                dose_amount = medication.dose,
                name = medication.name,
                frequency = medication.frequency.label(),
            ),
            location: Some("Home".to_string()),
        });

        current += interval;
        dose += 1;
    }

    events
}
