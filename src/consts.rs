pub const S3_MAIN_BUCKET_NAME: &str = "pet-care-app-storage";

/// Days-remaining band for urgent appointment alerts (inclusive).
pub const APPOINTMENT_ALERT_DAYS: i64 = 1;
/// Days-remaining band for "medication ending soon" alerts (inclusive).
pub const MEDICATION_ALERT_DAYS: i64 = 3;

/// Display caps for the dashboard summary view. Full lists stay available
/// through the per-pet care endpoints.
pub const MAX_DASHBOARD_ALERTS: usize = 5;
pub const MAX_SUMMARY_APPOINTMENTS: usize = 3;
pub const MAX_SUMMARY_MEDICATIONS: usize = 3;

/// Weight trend compares the mean of the last N samples against the N
/// before them, with a hysteresis band so noise reads as "stable".
pub const WEIGHT_TREND_WINDOW: usize = 3;
pub const WEIGHT_TREND_HYSTERESIS: f64 = 0.5;

pub const PET_PHOTO_MAX_SIZE_BYTES: usize = 6_000_000;
pub const ACCEPTED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpeg", "jpg", "heic"];

pub const MIN_PASSWORD_LEN: usize = 8;

pub const MAX_AGE_COOKIES: i64 = chrono::TimeDelta::hours(4).num_seconds();
