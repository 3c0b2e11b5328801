//! # Pet API Module
//!
//! Pet management scoped to the owner. Pictures are optional and are
//! stored before the row is written, then removed if the write fails.

use crate::{
    api::{errors::DomainError, upload},
    consts, metric,
    models::pet::Pet,
    repo,
    rest::forms::pet::PetForm,
    services,
};
use anyhow::bail;

pub async fn get_pets(repo: &repo::ImplAppRepo, user_id: i64) -> anyhow::Result<Vec<Pet>> {
    repo.get_all_pets_user_id(user_id).await
}

/// Adds a new pet to the user.
///
/// `name`, `breed` and `size` are required.
pub async fn create_pet(
    repo: &repo::ImplAppRepo,
    storage_service: &services::ImplStorageService,
    user_id: i64,
    mut form: PetForm,
) -> anyhow::Result<Pet> {
    let _span = logfire::span!("create_pet").entered();

    if !form.has_required_fields() {
        bail!(DomainError::validation("Required fields missing"));
    }

    let pic_path = match form.profile_image.take() {
        Some(pic) => Some(upload::save_pic(storage_service, consts::PET_PICS_DIR, pic).await?),
        None => None,
    };

    let mut pet = form.into_pet(user_id);
    pet.profile_image = pic_path
        .as_deref()
        .map(upload::public_url)
        .unwrap_or_default();

    match repo.insert_pet(&pet).await {
        Ok(pet_id) => pet.id = pet_id,
        Err(e) => {
            if let Some(path) = pic_path {
                upload::discard_pic(storage_service, &path).await;
            }
            return Err(e);
        }
    }

    metric::incr_user_action_statds("create_pet");
    Ok(pet)
}

/// Updates the fields sent in `form`, a new picture replaces the old one
pub async fn update_pet(
    repo: &repo::ImplAppRepo,
    storage_service: &services::ImplStorageService,
    user_id: i64,
    pet_id: i64,
    mut form: PetForm,
) -> anyhow::Result<Pet> {
    let _span = logfire::span!("update_pet").entered();

    let Some(current) = repo.get_pet_by_id(pet_id, user_id).await? else {
        bail!(DomainError::not_found("Pet not found"));
    };
    let previous_image = current.profile_image.clone();

    let pic_path = match form.profile_image.take() {
        Some(pic) => Some(upload::save_pic(storage_service, consts::PET_PICS_DIR, pic).await?),
        None => None,
    };

    let mut pet = form.apply_to(current);
    if let Some(path) = &pic_path {
        pet.profile_image = upload::public_url(path);
    }

    let updated = match repo.update_pet(&pet).await {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(path) = &pic_path {
                upload::discard_pic(storage_service, path).await;
            }
            return Err(e);
        }
    };

    if !updated {
        if let Some(path) = &pic_path {
            upload::discard_pic(storage_service, path).await;
        }
        bail!(DomainError::not_found("Pet not found"));
    }

    if pic_path.is_some() {
        upload::discard_pic_by_url(storage_service, &previous_image).await;
    }

    match repo.get_pet_by_id(pet_id, user_id).await? {
        Some(pet) => Ok(pet),
        None => bail!(DomainError::not_found("Pet not found")),
    }
}

pub async fn delete_pet(
    repo: &repo::ImplAppRepo,
    storage_service: &services::ImplStorageService,
    user_id: i64,
    pet_id: i64,
) -> anyhow::Result<()> {
    let Some(pet) = repo.get_pet_by_id(pet_id, user_id).await? else {
        bail!(DomainError::not_found("Pet not found"));
    };

    if !repo.delete_pet(pet_id, user_id).await? {
        bail!(DomainError::not_found("Pet not found"));
    }

    upload::discard_pic_by_url(storage_service, &pet.profile_image).await;
    metric::incr_user_action_statds("delete_pet");

    Ok(())
}
