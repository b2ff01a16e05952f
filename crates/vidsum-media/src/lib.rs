//! Media encoding — turn a video file into a transmissible payload.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use vidsum_types::MediaPayload;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The declared content type is not a video type.
    #[error("'{mime_type}' is not a supported video type; select a video file")]
    Validation { mime_type: String },

    /// The file could not be read as binary data.
    #[error("failed to read media file: {0}")]
    Encoding(#[from] std::io::Error),

    /// The payload does not decode back to bytes.
    #[error("invalid base64 payload: {0}")]
    InvalidPayload(#[from] base64::DecodeError),
}

/// Infer a MIME type from the file extension.
///
/// Returns `None` for unrecognized extensions.
pub fn infer_mime_type(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "mp4" => "video/mp4",
        "m4v" => "video/x-m4v",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mpg" | "mpeg" => "video/mpeg",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime.to_string())
}

/// Encode raw bytes with a declared content type.
///
/// Fails with [`MediaError::Validation`] when the type is not `video/*`.
pub fn encode_bytes(bytes: &[u8], mime_type: &str) -> Result<MediaPayload, MediaError> {
    if !mime_type.starts_with("video/") {
        return Err(MediaError::Validation {
            mime_type: mime_type.to_string(),
        });
    }
    Ok(MediaPayload {
        data: STANDARD.encode(bytes),
        mime_type: mime_type.to_string(),
    })
}

/// Encode a video file into a [`MediaPayload`].
///
/// The declared type is inferred from the extension and validated before
/// any file I/O. `advisory_max_bytes` is a soft ceiling: oversized files
/// are warned about and encoded anyway.
pub fn encode_file(path: &Path, advisory_max_bytes: u64) -> Result<MediaPayload, MediaError> {
    let mime_type = infer_mime_type(path).unwrap_or_else(|| "application/octet-stream".to_string());
    if !mime_type.starts_with("video/") {
        return Err(MediaError::Validation { mime_type });
    }

    let bytes = std::fs::read(path)?;
    if bytes.len() as u64 > advisory_max_bytes {
        tracing::warn!(
            path = %path.display(),
            size = bytes.len(),
            limit = advisory_max_bytes,
            "Media file exceeds the advisory upload ceiling; the service may reject it"
        );
    }

    encode_bytes(&bytes, &mime_type)
}

/// Decode a payload back to its original bytes.
pub fn decode(payload: &MediaPayload) -> Result<Vec<u8>, MediaError> {
    Ok(STANDARD.decode(&payload.data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        // Binary data including zero bytes and invalid UTF-8
        let cases: Vec<Vec<u8>> = vec![
            vec![],
            vec![0u8],
            vec![0xff, 0xfe, 0x00, 0x01, 0x80],
            (0u8..=255).collect(),
            b"plain ascii video bytes".to_vec(),
        ];
        for bytes in cases {
            let payload = encode_bytes(&bytes, "video/mp4").unwrap();
            assert_eq!(decode(&payload).unwrap(), bytes);
        }
    }

    #[test]
    fn test_encode_bytes_rejects_non_video() {
        let err = encode_bytes(b"pixels", "image/png").unwrap_err();
        match err {
            MediaError::Validation { mime_type } => assert_eq!(mime_type, "image/png"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_infer_mime_type() {
        assert_eq!(
            infer_mime_type(Path::new("clip.mp4")).as_deref(),
            Some("video/mp4")
        );
        assert_eq!(
            infer_mime_type(Path::new("dir/holiday.MOV")).as_deref(),
            Some("video/quicktime")
        );
        assert_eq!(
            infer_mime_type(Path::new("photo.png")).as_deref(),
            Some("image/png")
        );
        assert_eq!(infer_mime_type(Path::new("notes.xyz")), None);
        assert_eq!(infer_mime_type(Path::new("no_extension")), None);
    }

    #[test]
    fn test_encode_file_rejects_non_video_before_reading() {
        // The path does not exist; validation must trip before any I/O
        let err = encode_file(Path::new("/nonexistent/slides.pdf"), u64::MAX).unwrap_err();
        assert!(matches!(err, MediaError::Validation { .. }));
    }

    #[test]
    fn test_encode_file_missing_video_is_encoding_error() {
        let err = encode_file(Path::new("/nonexistent/clip.mp4"), u64::MAX).unwrap_err();
        assert!(matches!(err, MediaError::Encoding(_)));
    }
}
