//! Uploaded image validation, naming and storage.
//!
//! Pics are stored under `<dir>/<millis>-<uuid>.<ext>` and exposed
//! as `/uploads/<dir>/<file>`.

use crate::{api::errors::DomainError, consts, models, services};
use anyhow::bail;
use chrono::Utc;
use uuid::Uuid;

pub fn validate_pic(pic: &models::Pic) -> anyhow::Result<()> {
    if pic.body.is_empty() {
        bail!(DomainError::validation("No image file provided"));
    }

    if pic.body.len() > consts::PIC_MAX_SIZE_BYTES {
        bail!(DomainError::validation("Image must be 5MB or smaller"));
    }

    if !consts::ACCEPTED_IMAGE_EXTENSIONS.contains(&pic.filename_extension.as_str()) {
        bail!(DomainError::validation("Only image files are allowed!"));
    }

    Ok(())
}

pub fn build_pic_path(dir: &str, filename_extension: &str) -> String {
    format!(
        "{dir}/{}-{}.{filename_extension}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4()
    )
}

pub fn public_url(path: &str) -> String {
    format!("{}/{path}", consts::UPLOADS_URL_PREFIX)
}

/// Storage path of a url built by [public_url], `None` for external urls
pub fn storage_path_from_url(url: &str) -> Option<&str> {
    url.strip_prefix(consts::UPLOADS_URL_PREFIX)?
        .strip_prefix('/')
        .filter(|path| !path.is_empty())
}

/// Validates and stores the pic, returning its storage path
pub async fn save_pic(
    storage_service: &services::ImplStorageService,
    dir: &str,
    pic: models::Pic,
) -> anyhow::Result<String> {
    validate_pic(&pic)?;

    let path = build_pic_path(dir, &pic.filename_extension);
    storage_service.save_pic(&path, pic.body).await?;

    Ok(path)
}

/// Best-effort removal of a stored pic, errors are only logged
pub async fn discard_pic(storage_service: &services::ImplStorageService, path: &str) {
    if let Err(e) = storage_service.delete_pic(path).await {
        logfire::warn!(
            "Failed to delete pic {path}: {error}",
            path = path.to_string(),
            error = e.to_string()
        );
    }
}

/// Removes the file behind an uploads url, external urls are left alone
pub async fn discard_pic_by_url(storage_service: &services::ImplStorageService, url: &str) {
    if let Some(path) = storage_path_from_url(url) {
        discard_pic(storage_service, path).await;
    }
}
