//! # Pet API Module
//!
//! Pet profile management: list cards, create/update, photo upload into
//! object storage and the cascading delete of a pet with all its care
//! records.

use anyhow::bail;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{consts, models, repo, services};

/// Shape used by the pet cards on the home and dashboard screens.
#[derive(Debug, Serialize, PartialEq)]
pub struct PetCardSchema {
    pub id: i64,
    pub external_id: String,
    pub pet_name: String,
    pub species: String,
    pub breed: Option<String>,
    pub fmt_age: String,
    pub last_weight: Option<f64>,
    pub photo_url: Option<String>,
}

impl PetCardSchema {
    pub fn from_pet(pet: &models::pet::Pet, today: NaiveDate) -> Self {
        Self {
            id: pet.id,
            external_id: pet.external_id.to_string(),
            pet_name: pet.pet_name.clone(),
            species: pet.species.clone(),
            breed: pet.breed.clone(),
            fmt_age: pet
                .birthday
                .map(|birthday| fmt_age(birthday, today))
                .unwrap_or_default(),
            last_weight: pet.last_weight,
            photo_url: pet.photo_url.clone(),
        }
    }
}

/// Age as "N years M months", dropping whichever part is zero. A birthday
/// in the future renders as an empty string.
pub fn fmt_age(birthday: NaiveDate, today: NaiveDate) -> String {
    if birthday > today {
        return String::new();
    }

    let mut years = today.year() - birthday.year();
    let mut months = today.month() as i32 - birthday.month() as i32;
    if today.day() < birthday.day() {
        months -= 1;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    match (years, months) {
        (0, 0) => "newborn".to_string(),
        (0, m) => format!("{m} month{}", if m == 1 { "" } else { "s" }),
        (y, 0) => format!("{y} year{}", if y == 1 { "" } else { "s" }),
        (y, m) => format!(
            "{y} year{} {m} month{}",
            if y == 1 { "" } else { "s" },
            if m == 1 { "" } else { "s" }
        ),
    }
}

pub async fn get_user_pet_cards(
    user_id: i64,
    today: NaiveDate,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<PetCardSchema>> {
    Ok(repo
        .get_all_pets_user_id(user_id)
        .await?
        .iter()
        .map(|pet| PetCardSchema::from_pet(pet, today))
        .collect())
}

pub async fn get_pet_detail(
    pet_id: i64,
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<models::pet::Pet> {
    repo.get_pet_by_id(pet_id, user_id).await
}

/// Creates the pet profile and returns it with its fresh row id.
pub async fn add_new_pet(
    mut pet: models::pet::Pet,
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<models::pet::Pet> {
    if pet.pet_name.trim().is_empty() {
        bail!("pet name is required")
    }

    pet.user_app_id = user_id;
    pet.external_id = uuid::Uuid::new_v4();
    pet.id = repo.save_pet(&pet).await?;

    Ok(pet)
}

/// Overwrites the editable profile fields. The ownership check happens in
/// the update statement itself.
pub async fn update_pet_info(
    mut pet: models::pet::Pet,
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<()> {
    if pet.pet_name.trim().is_empty() {
        bail!("pet name is required")
    }

    pet.user_app_id = user_id;
    repo.update_pet(&pet).await
}

/// Removes the pet and every dependent care record in one transaction.
pub async fn delete_pet_and_its_info(
    pet_id: i64,
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<()> {
    repo.delete_pet_cascade(pet_id, user_id).await
}

/// Uploads a pet photo to object storage and records its key on the pet
/// row. Returns the stored key.
pub async fn attach_pet_photo(
    pet_id: i64,
    user_id: i64,
    extension: &str,
    body: Vec<u8>,
    repo: &repo::ImplAppRepo,
    storage: &services::ImplStorageService,
) -> anyhow::Result<String> {
    let extension = extension.to_lowercase();
    if !consts::ACCEPTED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        bail!(
            "unsupported image extension, accepted: {}",
            consts::ACCEPTED_IMAGE_EXTENSIONS.join(", ")
        )
    }

    if body.is_empty() {
        bail!("empty image body")
    }

    if body.len() > consts::PET_PHOTO_MAX_SIZE_BYTES {
        bail!("image exceeds the maximum allowed size")
    }

    // Ownership check before touching storage.
    let pet = repo.get_pet_by_id(pet_id, user_id).await?;

    let key = services::storage::pet_photo_key(user_id, pet.id, &extension);
    storage.save_photo(&key, body).await?;
    repo.set_pet_photo_url(pet_id, user_id, &key).await?;

    Ok(key)
}

/// Streams the stored photo back; `None` when the pet has no photo yet.
pub async fn get_pet_photo(
    pet_id: i64,
    user_id: i64,
    repo: &repo::ImplAppRepo,
    storage: &services::ImplStorageService,
) -> anyhow::Result<Option<(Vec<u8>, String)>> {
    let pet = repo.get_pet_by_id(pet_id, user_id).await?;

    let Some(key) = pet.photo_url else {
        return Ok(None);
    };

    let extension = key.rsplit('.').next().unwrap_or("jpeg").to_string();
    let bytes = storage.get_photo_as_bytes(&key).await?;

    Ok(Some((bytes, extension)))
}
