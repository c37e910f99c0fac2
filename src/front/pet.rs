use chrono::Utc;
use ntex::{util::Bytes, web};
use serde_json::json;

use crate::{
    api,
    front::{AppState, errors, forms, middleware},
    models,
};

#[web::get("/list")]
async fn user_pets_list(
    logged_user: models::user_app::User,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let cards = api::pet::get_user_pet_cards(
        logged_user.id,
        Utc::now().date_naive(),
        &app_state.repo,
    )
    .await
    .map_err(|e| {
        errors::ServerError::InternalServerError(format!("pet cards couldn't be listed: {e}"))
    })?;

    Ok(web::HttpResponse::Ok().json(&cards))
}

#[web::get("/details/{pet_id}")]
async fn get_pet_details(
    logged_user: models::user_app::User,
    pet_id: web::types::Path<i64>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet = api::pet::get_pet_detail(*pet_id, logged_user.id, &app_state.repo)
        .await
        .map_err(|_| errors::UserError::UrlNotFound)?;

    Ok(web::HttpResponse::Ok().json(&pet))
}

#[web::post("/create")]
async fn create_pet_request(
    _: middleware::logged_user::CheckUserCanAccessService,
    logged_user: models::user_app::User,
    form: web::types::Json<forms::pet::PetForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet = api::pet::add_new_pet(form.into_inner().into(), logged_user.id, &app_state.repo)
        .await
        .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;

    Ok(web::HttpResponse::Created().json(&pet))
}

#[web::put("/edit/{pet_id}")]
async fn edit_pet_details(
    _: middleware::logged_user::CheckUserCanAccessService,
    logged_user: models::user_app::User,
    pet_id: web::types::Path<i64>,
    form: web::types::Json<forms::pet::PetForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let mut pet: models::pet::Pet = form.into_inner().into();
    pet.id = *pet_id;

    api::pet::update_pet_info(pet, logged_user.id, &app_state.repo)
        .await
        .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;

    Ok(web::HttpResponse::Ok().json(&json!({ "status": "pet updated" })))
}

#[web::delete("/delete/{pet_id}")]
async fn delete_pet(
    _: middleware::logged_user::CheckUserCanAccessService,
    logged_user: models::user_app::User,
    pet_id: web::types::Path<i64>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    api::pet::delete_pet_and_its_info(*pet_id, logged_user.id, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!("pet couldn't be deleted: {e}"))
        })?;

    Ok(web::HttpResponse::Ok().json(&json!({ "status": "pet removed" })))
}

/// Endpoint stores the raw image body, the extension travels in the path
#[web::put("/photo/{pet_id}/{extension}")]
async fn upload_pet_photo(
    _: middleware::logged_user::CheckUserCanAccessService,
    logged_user: models::user_app::User,
    path: web::types::Path<(i64, String)>,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (pet_id, extension) = path.into_inner();

    let key = api::pet::attach_pet_photo(
        pet_id,
        logged_user.id,
        &extension,
        body.to_vec(),
        &app_state.repo,
        &app_state.storage_service,
    )
    .await
    .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;

    Ok(web::HttpResponse::Created().json(&json!({ "photo_url": key })))
}

#[web::get("/photo/{pet_id}")]
async fn get_pet_photo(
    logged_user: models::user_app::User,
    pet_id: web::types::Path<i64>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let photo = api::pet::get_pet_photo(
        *pet_id,
        logged_user.id,
        &app_state.repo,
        &app_state.storage_service,
    )
    .await
    .map_err(|e| {
        errors::ServerError::ExternalServiceError(format!("photo couldn't be fetched: {e}"))
    })?;

    let Some((bytes, extension)) = photo else {
        return Err(errors::UserError::UrlNotFound.into());
    };

    Ok(web::HttpResponse::Ok()
        .set_header("content-type", format!("image/{extension}"))
        .body(bytes))
}
