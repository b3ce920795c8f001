use base64::Engine;
use log::debug;
use std::path::Path;

use crate::errors::{ HarnessError, HarnessResult };
use crate::traits::EncodedImage;

/// Extension to media type, first match wins
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

const DEFAULT_MEDIA_TYPE: &str = "image/png";

/// Media type for `path` from its extension (case-insensitive)
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    ext.and_then(|ext| {
        MEDIA_TYPES.iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, media)| *media)
    }).unwrap_or(DEFAULT_MEDIA_TYPE)
}

/// Read and base64-encode an image. `role` names the image in errors.
pub fn encode_image(path: &Path, role: &str) -> HarnessResult<EncodedImage> {
    if !path.exists() {
        return Err(HarnessError::ImageNotFound {
            role: role.to_string(),
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| HarnessError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;

    let media_type = media_type_for(path);
    debug!("Encoded {} ({} bytes, {})", path.display(), bytes.len(), media_type);

    Ok(EncodedImage {
        data: base64::engine::general_purpose::STANDARD.encode(&bytes),
        media_type,
    })
}
