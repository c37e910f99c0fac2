use ntex::web;
use ntex_identity::Identity;
use serde_json::json;

use crate::{
    api,
    front::{AppState, errors, forms},
    models,
};

/// Endpoint creates the account and leaves the user signed in
#[web::post("/signup")]
async fn sign_up(
    form: web::types::Json<forms::user::CredentialsForm>,
    app_state: web::types::State<AppState>,
    identity: Identity,
) -> Result<impl web::Responder, web::Error> {
    let user = api::user::sign_up(&form.email, &form.password, &app_state.repo)
        .await
        .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;

    identity.remember(serde_json::to_string(&user)?);

    Ok(web::HttpResponse::Created().json(&user))
}

#[web::post("/login")]
async fn login(
    form: web::types::Json<forms::user::CredentialsForm>,
    app_state: web::types::State<AppState>,
    identity: Identity,
) -> Result<impl web::Responder, web::Error> {
    let user = api::user::sign_in(&form.email, &form.password, &app_state.repo)
        .await
        .map_err(|_| errors::UserError::Unauthorized)?;

    identity.remember(serde_json::to_string(&user)?);

    Ok(web::HttpResponse::Ok().json(&user))
}

#[web::post("/logout")]
async fn logout(identity: Identity) -> Result<impl web::Responder, web::Error> {
    identity.forget();

    Ok(web::HttpResponse::Ok().json(&json!({ "status": "session closed" })))
}

/// Endpoint stores or clears the device token used for push reminders
#[web::post("/push-token")]
async fn register_push_token(
    logged_user: models::user_app::User,
    form: web::types::Json<forms::user::PushTokenForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    api::user::register_push_token(logged_user.id, form.push_token.clone(), &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "push token couldn't be stored: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok().json(&json!({ "status": "push token updated" })))
}

/// Endpoint removes the account with every pet and care record
#[web::delete("/account")]
async fn delete_account(
    logged_user: models::user_app::User,
    app_state: web::types::State<AppState>,
    identity: Identity,
) -> Result<impl web::Responder, web::Error> {
    api::user::remove_account(logged_user.id, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "account data couldn't be removed: {e}"
            ))
        })?;

    identity.forget();

    Ok(web::HttpResponse::Ok().json(&json!({ "status": "account removed" })))
}
