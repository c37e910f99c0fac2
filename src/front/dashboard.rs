use chrono::Utc;
use ntex::web;

use crate::{
    api,
    front::{AppState, errors},
    models,
};

#[web::get("")]
async fn get_dashboard(
    logged_user: models::user_app::User,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let snapshot = api::dashboard::build_dashboard(
        logged_user.id,
        Utc::now().date_naive(),
        &app_state.repo,
    )
    .await
    .map_err(|e| {
        errors::ServerError::InternalServerError(format!("dashboard couldn't be built: {e}"))
    })?;

    Ok(web::HttpResponse::Ok().json(&snapshot))
}

#[web::get("/events")]
async fn get_upcoming_events(
    logged_user: models::user_app::User,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let events = api::dashboard::upcoming_events(
        logged_user.id,
        Utc::now().date_naive(),
        &app_state.repo,
    )
    .await
    .map_err(|e| {
        errors::ServerError::InternalServerError(format!(
            "upcoming events couldn't be listed: {e}"
        ))
    })?;

    Ok(web::HttpResponse::Ok().json(&events))
}
