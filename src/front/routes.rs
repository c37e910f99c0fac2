//! Frontend route configuration module.
//!
//! Routes are grouped by functionality into logical scopes; every scope
//! besides `/auth` sign-up/login expects the identity cookie set at login.

use super::{auth, care, dashboard, pet};
use ntex::web;

/// Configures account routes.
///
/// # Routes
/// - `POST /auth/signup` - Create an account and sign in
/// - `POST /auth/login` - Sign in with email and password
/// - `POST /auth/logout` - Close the current session
/// - `POST /auth/push-token` - Register or clear the push device token
/// - `DELETE /auth/account` - Remove the account and all its data
pub fn auth(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/auth").service((
        auth::sign_up,
        auth::login,
        auth::logout,
        auth::register_push_token,
        auth::delete_account,
    )));
}

/// Configures pet profile routes.
///
/// # Routes
/// - `GET /pet/list` - List the owner's pet cards
/// - `GET /pet/details/{pet_id}` - Full pet profile
/// - `POST /pet/create` - Create a pet
/// - `PUT /pet/edit/{pet_id}` - Update the editable profile fields
/// - `DELETE /pet/delete/{pet_id}` - Delete the pet and its care records
/// - `PUT /pet/photo/{pet_id}/{extension}` - Upload the pet photo
/// - `GET /pet/photo/{pet_id}` - Download the pet photo
pub fn pet(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/pet").service((
        pet::user_pets_list,
        pet::get_pet_details,
        pet::create_pet_request,
        pet::edit_pet_details,
        pet::delete_pet,
        pet::upload_pet_photo,
        pet::get_pet_photo,
    )));
}

/// Configures per-pet care record routes.
///
/// # Appointment Sub-routes (/care/appointment)
/// - `POST /care/appointment/create` - Book an appointment (returns a calendar link)
/// - `GET /care/appointment/list/{pet_id}` - Appointment history
/// - `PUT /care/appointment/status/{pet_id}/{appointment_id}` - Complete or cancel
/// - `DELETE /care/appointment/delete/{pet_id}/{appointment_id}` - Delete
///
/// # Medication Sub-routes (/care/medication)
/// - `POST /care/medication/create` - Start a course (schedules a push reminder)
/// - `GET /care/medication/list/{pet_id}` - Medication history
/// - `GET /care/medication/calendar/{pet_id}/{medication_id}` - Dose calendar links
/// - `PUT /care/medication/status/{pet_id}/{medication_id}` - Change the status
/// - `DELETE /care/medication/delete/{pet_id}/{medication_id}` - Delete
///
/// # Weight Sub-routes (/care/weight)
/// - `POST /care/weight/add` - Record a weight sample
/// - `GET /care/weight/list/{pet_id}` - Weight history, oldest first
/// - `GET /care/weight/stats/{pet_id}` - Min/max/mean and trend
/// - `DELETE /care/weight/delete/{pet_id}/{sample_id}` - Delete a sample
///
/// # Feeding Sub-routes (/care/feeding)
/// - `POST /care/feeding/add` - Record a meal
/// - `GET /care/feeding/list/{pet_id}` - Feeding history, most recent first
pub fn care(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/care").service((
        web::scope("/appointment").service((
            care::create_appointment,
            care::appointment_records,
            care::update_appointment_status,
            care::delete_appointment,
        )),
        web::scope("/medication").service((
            care::create_medication,
            care::medication_records,
            care::medication_calendar,
            care::update_medication_status,
            care::delete_medication,
        )),
        web::scope("/weight").service((
            care::add_weight_sample,
            care::weight_records,
            care::weight_stats,
            care::delete_weight_sample,
        )),
        web::scope("/feeding").service((care::add_feeding_log, care::feeding_records)),
    )));
}

/// Configures the aggregated dashboard routes.
///
/// # Routes
/// - `GET /dashboard` - Pets, upcoming appointments, active medications and
///   prioritized alerts in one response
/// - `GET /dashboard/events` - Chronological feed of appointments and
///   "next due" care dates
pub fn dashboard(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard").service((dashboard::get_dashboard, dashboard::get_upcoming_events)),
    );
}
