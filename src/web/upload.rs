//! Masked photo uploads.
//!
//! Files land under `{upload_dir}/{year}/{month}/` and are served from the
//! configured public URL prefix. Next to each upload go a PNG thumbnail
//! (`_s_masked.png`) and a JPEG copy (`_masked.jpg`) for the admin.

use std::io::Cursor;
use std::path::Path;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageResult};
use serde::Serialize;
use tracing::{debug, error, info};

use super::{ApiError, ApiResult, AppState};

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Thumbnails fit inside a square of this many pixels.
pub const THUMBNAIL_SIZE: u32 = 100;

/// Quality of the JPEG copy.
pub const JPEG_QUALITY: u8 = 85;

/// Upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Stored file name.
    pub img: String,
    /// Public path of the stored file.
    pub path: String,
    /// Always 1 on success.
    pub result: u8,
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'ą' => 'a',
        'è' | 'é' | 'ê' | 'ë' | 'ę' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Makes a client file name safe to store.
///
/// Accents are folded and the name lowercased; spaces become `_` and
/// anything outside `[0-9a-z_.]` is dropped. A trailing `jpg` is removed
/// since the stored file gets its own extension.
#[must_use]
pub fn filename_safe(filename: &str) -> String {
    let safe: String = filename
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_digit() || c.is_ascii_lowercase() || matches!(c, '_' | '.'))
        .collect();

    let safe = safe.strip_suffix(".jpg").unwrap_or(&safe);
    safe.strip_suffix("jpg").unwrap_or(safe).to_string()
}

/// File extension for an image content type; `None` for anything that is
/// not an image.
fn image_extension(content_type: &str) -> Option<&'static str> {
    if !content_type.starts_with("image/") {
        return None;
    }
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        other => mime_guess::get_mime_extensions_str(other).and_then(|exts| exts.first().copied()),
    }
}

/// Files derived from an uploaded image.
#[derive(Debug)]
pub struct Renditions {
    /// PNG fitted inside [`THUMBNAIL_SIZE`], grey when requested
    pub thumbnail: Vec<u8>,
    /// JPEG copy, unless the upload already is one
    pub jpeg: Option<Vec<u8>>,
}

/// Decodes an upload and renders its thumbnail and JPEG copy.
///
/// # Errors
///
/// Fails when the bytes are not a decodable image.
pub fn renditions(bytes: &[u8], grayscale: bool, jpeg_copy: bool) -> ImageResult<Renditions> {
    let img = image::load_from_memory(bytes)?;

    let mut thumb = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Triangle);
    if grayscale {
        thumb = thumb.grayscale();
    }
    let mut thumbnail = Cursor::new(Vec::new());
    thumb.write_to(&mut thumbnail, ImageFormat::Png)?;

    let jpeg = if jpeg_copy {
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(img.to_rgb8())
            .write_with_encoder(JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY))?;
        Some(out)
    } else {
        None
    };

    Ok(Renditions {
        thumbnail: thumbnail.into_inner(),
        jpeg,
    })
}

fn bad_request(error: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError::new(error)))
}

fn upload_failed() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::new("Upload failed")),
    )
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), (StatusCode, Json<ApiError>)> {
    tokio::fs::write(path, bytes).await.map_err(|e| {
        error!("Failed to write upload {}: {}", path.display(), e);
        upload_failed()
    })
}

/// Store a masked photo.
///
/// Form fields: `uniqueid`, `filename`, `upload` (the file) and `color`,
/// where `"0"` asks for a grey thumbnail.
pub(super) async fn upload_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<UploadResponse> {
    let mut uniqueid = None;
    let mut filename = None;
    let mut color = None;
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details("Invalid multipart body", e.to_string())),
        )
    })? {
        let name = field.name().map(str::to_string);
        let read_error = |e: axum::extract::multipart::MultipartError| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::with_details("Invalid multipart field", e.to_string())),
            )
        };
        match name.as_deref() {
            Some("uniqueid") => uniqueid = Some(field.text().await.map_err(read_error)?),
            Some("filename") => filename = Some(field.text().await.map_err(read_error)?),
            Some("color") => color = Some(field.text().await.map_err(read_error)?),
            Some("upload") => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(read_error)?;
                upload = Some((content_type, bytes));
            }
            _ => {}
        }
    }

    let (content_type, bytes) = upload
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or_else(|| bad_request("No file uploaded"))?;
    let ext = content_type
        .as_deref()
        .and_then(image_extension)
        .ok_or_else(|| bad_request("Upload must be an image"))?;

    let uniqueid = filename_safe(&uniqueid.unwrap_or_default());
    let safe_name = filename_safe(&filename.unwrap_or_default());
    if uniqueid.is_empty() || safe_name.is_empty() {
        return Err(bad_request("Missing uniqueid or filename"));
    }
    // Sanitized names hold no separators; only a leading dot needs refusing
    if uniqueid.starts_with('.') {
        return Err(bad_request("Invalid filename: hidden files not allowed"));
    }

    let stem = format!("{uniqueid}_{safe_name}");
    let img = format!("{stem}_masked.{ext}");

    let grayscale = color.as_deref().map(str::trim) == Some("0");
    let jpeg_copy = ext != "jpg";
    let decoded = bytes.clone();
    let rendered = tokio::task::spawn_blocking(move || renditions(&decoded, grayscale, jpeg_copy))
        .await
        .map_err(|e| {
            error!("Image task failed: {}", e);
            upload_failed()
        })?
        .map_err(|e| {
            debug!("Rejecting undecodable upload {}: {}", img, e);
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::with_details("Upload must be an image", e.to_string())),
            )
        })?;

    let now = Local::now();
    let year = now.format("%Y").to_string();
    let month = now.format("%m").to_string();
    let paths = &state.config.paths;
    let dir = paths.upload_dir.join(&year).join(&month);

    if let Err(e) = tokio::fs::create_dir_all(&dir).await {
        error!("Failed to create upload directory {}: {}", dir.display(), e);
        return Err(upload_failed());
    }
    let file_path = dir.join(&img);
    write_file(&file_path, &bytes).await?;
    write_file(&dir.join(format!("{stem}_s_masked.png")), &rendered.thumbnail).await?;
    if let Some(jpeg) = &rendered.jpeg {
        write_file(&dir.join(format!("{stem}_masked.jpg")), jpeg).await?;
    }

    info!("Stored upload {} ({} bytes)", file_path.display(), bytes.len());

    let prefix = paths.upload_url.trim_end_matches('/');
    Ok(Json(UploadResponse {
        path: format!("{prefix}/{year}/{month}/{img}"),
        img,
        result: 1,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_safe() {
        assert_eq!(filename_safe("Grand Père.JPG"), "grand_pere");
        assert_eq!(filename_safe("Ça va!.png"), "ca_va.png");
        assert_eq!(filename_safe("photo-1 (2)jpg"), "photo1_2");
        assert_eq!(filename_safe("../../etc"), "....etc");
        assert_eq!(filename_safe("¿?"), "");
        assert_eq!(filename_safe("my..photo.png"), "my..photo.png");
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_renditions_thumbnail_fits_inside() {
        let out = renditions(&png(400, 200), false, true).unwrap();

        let thumb = image::load_from_memory(&out.thumbnail).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (100, 50));
        assert!(thumb.color().has_color());

        let jpeg = out.jpeg.unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
        assert_eq!(image::load_from_memory(&jpeg).unwrap().width(), 400);
    }

    #[test]
    fn test_renditions_grayscale_and_no_copy() {
        let out = renditions(&png(50, 80), true, false).unwrap();
        let thumb = image::load_from_memory(&out.thumbnail).unwrap();
        assert!(!thumb.color().has_color());
        assert!(out.jpeg.is_none());

        assert!(renditions(b"\x89PNG\r\n\x1a\nfake", false, true).is_err());
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension("image/png"), Some("png"));
        assert_eq!(image_extension("image/jpeg"), Some("jpg"));
        assert_eq!(image_extension("image/gif"), Some("gif"));
        assert_eq!(image_extension("text/plain"), None);
        assert_eq!(image_extension("application/octet-stream"), None);
    }
}
