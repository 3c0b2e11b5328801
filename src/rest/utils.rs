use crate::{api::errors::DomainError, consts, models};
use anyhow::bail;
use futures::TryStreamExt;
use std::path::Path;

fn invalid_upload(e: ntex_multipart::MultipartError) -> DomainError {
    DomainError::Validation(format!("Invalid upload: {e}"))
}

/// Concats all the [bytes](ntex::util::Bytes) extracted from the field.
/// Stops with `too_large` as soon as the running size goes over `max_size`.
pub async fn get_bytes_value(
    mut field: ntex_multipart::Field,
    max_size: usize,
    too_large: &str,
) -> anyhow::Result<Vec<u8>> {
    let mut body = Vec::new();

    while let Some(chunk) = field.try_next().await.map_err(invalid_upload)? {
        if body.len() + chunk.len() > max_size {
            bail!(DomainError::validation(too_large));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

/// Utf8 value of a text field
pub async fn get_field_value(field: ntex_multipart::Field) -> anyhow::Result<String> {
    let body = get_bytes_value(
        field,
        consts::FORM_FIELD_MAX_SIZE_BYTES,
        "Form field is too large",
    )
    .await?;

    match String::from_utf8(body) {
        Ok(value) => Ok(value),
        Err(_) => bail!(DomainError::validation("Form fields must be utf8 text")),
    }
}

fn get_header_str_value(headers: &ntex::http::HeaderMap, key: &str) -> String {
    headers
        .get(key)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Value of `param` in a `content-disposition` header, e.g. `name` or `filename`
pub fn get_disposition_param(content_disposition: &str, param: &str) -> Option<String> {
    content_disposition.split(';').find_map(|section| {
        let (key, value) = section.trim().split_once('=')?;
        (key.trim() == param).then(|| value.trim().trim_matches('"').to_string())
    })
}

/// Lowercase extension of the uploaded filename
pub fn get_filename_extension(content_disposition: &str) -> Option<String> {
    let filename = get_disposition_param(content_disposition, "filename")?;

    Path::new(&filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.trim().to_lowercase())
}

/// Reads a multipart body: the file sent as `pic_field` is returned and
/// every other field goes to `on_text` as `(name, value)`.
pub async fn read_multipart(
    mut payload: ntex_multipart::Multipart,
    pic_field: &str,
    mut on_text: impl FnMut(&str, &str),
) -> anyhow::Result<Option<models::Pic>> {
    let mut pic = None;

    while let Some(field) = payload.try_next().await.map_err(invalid_upload)? {
        let content_disposition = get_header_str_value(field.headers(), "content-disposition");
        let Some(field_name) = get_disposition_param(&content_disposition, "name") else {
            continue;
        };

        if field_name != pic_field {
            on_text(&field_name, &get_field_value(field).await?);
            continue;
        }

        let is_image = field.content_type().essence_str().contains("image");
        let body = get_bytes_value(
            field,
            consts::PIC_MAX_SIZE_BYTES,
            "Image must be 5MB or smaller",
        )
        .await?;
        if body.is_empty() {
            continue;
        }

        let Some(filename_extension) = get_filename_extension(&content_disposition)
            .filter(|_| is_image)
        else {
            bail!(DomainError::validation("Only image files are allowed!"));
        };

        pic = Some(models::Pic {
            body,
            filename_extension,
        });
    }

    Ok(pic)
}
