use crate::{
    api::{errors::DomainError, upload},
    consts, metric, models,
    models::user_app::UserPhoto,
    repo, services,
};
use anyhow::bail;

pub async fn get_photos(repo: &repo::ImplAppRepo, user_id: i64) -> anyhow::Result<Vec<UserPhoto>> {
    repo.get_user_photos(user_id).await
}

/// Adds a pic to the user gallery
pub async fn add_photo(
    repo: &repo::ImplAppRepo,
    storage_service: &services::ImplStorageService,
    user_id: i64,
    pic: Option<models::Pic>,
) -> anyhow::Result<UserPhoto> {
    let Some(pic) = pic else {
        bail!(DomainError::validation("No image file provided"));
    };

    let path = upload::save_pic(storage_service, consts::USER_PHOTOS_DIR, pic).await?;

    match repo
        .insert_user_photo(user_id, &upload::public_url(&path))
        .await
    {
        Ok(photo) => {
            metric::incr_user_action_statds("add_photo");
            Ok(photo)
        }
        Err(e) => {
            upload::discard_pic(storage_service, &path).await;
            Err(e)
        }
    }
}

pub async fn delete_photo(
    repo: &repo::ImplAppRepo,
    storage_service: &services::ImplStorageService,
    user_id: i64,
    photo_id: i64,
) -> anyhow::Result<()> {
    let Some(image_url) = repo.delete_user_photo(user_id, photo_id).await? else {
        bail!(DomainError::not_found("Photo not found"));
    };

    upload::discard_pic_by_url(storage_service, &image_url).await;

    Ok(())
}
