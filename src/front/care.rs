use chrono::Utc;
use ntex::web;
use serde_json::json;

use crate::{
    api,
    front::{AppState, errors, forms, middleware},
    models,
};

#[web::post("/create")]
async fn create_appointment(
    _: middleware::logged_user::CheckUserCanAccessService,
    logged_user: models::user_app::User,
    form: web::types::Json<forms::care::AppointmentForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let saved = api::care::save_appointment(
        form.into_inner().into(),
        logged_user.id,
        Utc::now().naive_utc(),
        &app_state.repo,
    )
    .await
    .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;

    Ok(web::HttpResponse::Created().json(&saved))
}

#[web::get("/list/{pet_id}")]
async fn appointment_records(
    logged_user: models::user_app::User,
    pet_id: web::types::Path<i64>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let appointments = api::care::get_appointments(*pet_id, logged_user.id, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "appointments couldn't be listed: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok().json(&appointments))
}

#[web::put("/status/{pet_id}/{appointment_id}")]
async fn update_appointment_status(
    _: middleware::logged_user::CheckUserCanAccessService,
    logged_user: models::user_app::User,
    path: web::types::Path<(i64, i64)>,
    form: web::types::Json<forms::care::AppointmentStatusForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (pet_id, appointment_id) = path.into_inner();

    api::care::update_appointment_status(
        appointment_id,
        pet_id,
        logged_user.id,
        form.status,
        &app_state.repo,
    )
    .await
    .map_err(|e| {
        errors::ServerError::InternalServerError(format!(
            "appointment status couldn't be updated: {e}"
        ))
    })?;

    Ok(web::HttpResponse::Ok().json(&json!({ "status": "appointment updated" })))
}

#[web::delete("/delete/{pet_id}/{appointment_id}")]
async fn delete_appointment(
    _: middleware::logged_user::CheckUserCanAccessService,
    logged_user: models::user_app::User,
    path: web::types::Path<(i64, i64)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (pet_id, appointment_id) = path.into_inner();

    api::care::remove_appointment(appointment_id, pet_id, logged_user.id, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "appointment couldn't be deleted: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok().json(&json!({ "status": "appointment removed" })))
}

#[web::post("/create")]
async fn create_medication(
    _: middleware::logged_user::CheckUserCanAccessService,
    logged_user: models::user_app::User,
    form: web::types::Json<forms::care::MedicationForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let medication = api::care::save_medication(
        form.into_inner().into(),
        logged_user.id,
        &app_state.repo,
        &app_state.push_service,
    )
    .await
    .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;

    Ok(web::HttpResponse::Created().json(&medication))
}

#[web::get("/list/{pet_id}")]
async fn medication_records(
    logged_user: models::user_app::User,
    pet_id: web::types::Path<i64>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let medications = api::care::get_medications(*pet_id, logged_user.id, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "medications couldn't be listed: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok().json(&medications))
}

/// Endpoint returns one Google Calendar link per scheduled dose
#[web::get("/calendar/{pet_id}/{medication_id}")]
async fn medication_calendar(
    logged_user: models::user_app::User,
    path: web::types::Path<(i64, i64)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (pet_id, medication_id) = path.into_inner();

    let pet = api::pet::get_pet_detail(pet_id, logged_user.id, &app_state.repo)
        .await
        .map_err(|_| errors::UserError::UrlNotFound)?;

    let medications = api::care::get_medications(pet_id, logged_user.id, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "medications couldn't be listed: {e}"
            ))
        })?;

    let Some(medication) = medications.iter().find(|m| m.id == medication_id) else {
        return Err(errors::UserError::UrlNotFound.into());
    };

    Ok(web::HttpResponse::Ok().json(&api::care::medication_calendar_links(
        &pet.pet_name,
        medication,
    )))
}

#[web::put("/status/{pet_id}/{medication_id}")]
async fn update_medication_status(
    _: middleware::logged_user::CheckUserCanAccessService,
    logged_user: models::user_app::User,
    path: web::types::Path<(i64, i64)>,
    form: web::types::Json<forms::care::MedicationStatusForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (pet_id, medication_id) = path.into_inner();

    api::care::update_medication_status(
        medication_id,
        pet_id,
        logged_user.id,
        form.status,
        &app_state.repo,
    )
    .await
    .map_err(|e| {
        errors::ServerError::InternalServerError(format!(
            "medication status couldn't be updated: {e}"
        ))
    })?;

    Ok(web::HttpResponse::Ok().json(&json!({ "status": "medication updated" })))
}

#[web::delete("/delete/{pet_id}/{medication_id}")]
async fn delete_medication(
    _: middleware::logged_user::CheckUserCanAccessService,
    logged_user: models::user_app::User,
    path: web::types::Path<(i64, i64)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (pet_id, medication_id) = path.into_inner();

    api::care::remove_medication(medication_id, pet_id, logged_user.id, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "medication couldn't be deleted: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok().json(&json!({ "status": "medication removed" })))
}

#[web::post("/add")]
async fn add_weight_sample(
    _: middleware::logged_user::CheckUserCanAccessService,
    logged_user: models::user_app::User,
    form: web::types::Json<forms::care::WeightSampleForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let sample = api::care::add_weight_sample(
        form.into_inner().into(),
        logged_user.id,
        &app_state.repo,
    )
    .await
    .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;

    Ok(web::HttpResponse::Created().json(&sample))
}

#[web::get("/list/{pet_id}")]
async fn weight_records(
    logged_user: models::user_app::User,
    pet_id: web::types::Path<i64>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let samples = api::care::get_weight_samples(*pet_id, logged_user.id, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "weight samples couldn't be listed: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok().json(&samples))
}

/// Endpoint computes min/max/mean and the trend over the weight history
#[web::get("/stats/{pet_id}")]
async fn weight_stats(
    logged_user: models::user_app::User,
    pet_id: web::types::Path<i64>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let samples = api::care::get_weight_samples(*pet_id, logged_user.id, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "weight samples couldn't be listed: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok().json(&api::care::compute_weight_stats(&samples)))
}

#[web::delete("/delete/{pet_id}/{sample_id}")]
async fn delete_weight_sample(
    _: middleware::logged_user::CheckUserCanAccessService,
    logged_user: models::user_app::User,
    path: web::types::Path<(i64, i64)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (pet_id, sample_id) = path.into_inner();

    api::care::remove_weight_sample(sample_id, pet_id, logged_user.id, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "weight sample couldn't be deleted: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok().json(&json!({ "status": "weight sample removed" })))
}

#[web::post("/add")]
async fn add_feeding_log(
    _: middleware::logged_user::CheckUserCanAccessService,
    logged_user: models::user_app::User,
    form: web::types::Json<forms::care::FeedingLogForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let entry = api::care::add_feeding_log(
        form.into_inner().into(),
        logged_user.id,
        &app_state.repo,
    )
    .await
    .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;

    Ok(web::HttpResponse::Created().json(&entry))
}

#[web::get("/list/{pet_id}")]
async fn feeding_records(
    logged_user: models::user_app::User,
    pet_id: web::types::Path<i64>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let entries = api::care::get_feeding_logs(*pet_id, logged_user.id, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "feeding logs couldn't be listed: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok().json(&entries))
}
