//! File ingest
//!
//! Reads a user-selected image into a `data:` URL and assigns it to a decal
//! slot. Reading happens off the frame loop (see [`async_op`]); the frame
//! loop polls for completion and applies the result with [`apply_ingest`].

mod async_op;

pub use async_op::{start_read, PendingIngest};

use base64::Engine as _;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::store::{CustomizationStore, SlotId};

/// Fallback when the bytes aren't a known image format
const OCTET_STREAM: &str = "application/octet-stream";

/// Image file extensions offered by the picker
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Errors that can occur while reading or decoding an image reference
#[derive(Debug, Clone, PartialEq)]
pub enum IngestError {
    /// File could not be read
    Io(String),
    /// File was empty
    EmptyFile,
    /// Reference isn't a base64 `data:` URL
    NotDataUrl,
    /// Payload isn't valid base64
    Base64(String),
    /// Payload isn't a decodable image
    Decode(String),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Io(msg) => write!(f, "I/O error: {}", msg),
            IngestError::EmptyFile => write!(f, "file is empty"),
            IngestError::NotDataUrl => write!(f, "not a base64 data URL"),
            IngestError::Base64(msg) => write!(f, "invalid base64: {}", msg),
            IngestError::Decode(msg) => write!(f, "could not decode image: {}", msg),
        }
    }
}

impl std::error::Error for IngestError {}

impl From<std::io::Error> for IngestError {
    fn from(e: std::io::Error) -> Self {
        IngestError::Io(e.to_string())
    }
}

impl From<base64::DecodeError> for IngestError {
    fn from(e: base64::DecodeError) -> Self {
        IngestError::Base64(e.to_string())
    }
}

impl From<image::ImageError> for IngestError {
    fn from(e: image::ImageError) -> Self {
        IngestError::Decode(e.to_string())
    }
}

/// A file chosen in the picker, not yet read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { name, path }
    }
}

/// MIME type sniffed from the leading bytes
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(OCTET_STREAM)
}

/// Encode raw file bytes as `data:<mime>;base64,<payload>`
pub fn encode_data_url(bytes: &[u8]) -> Result<String, IngestError> {
    if bytes.is_empty() {
        return Err(IngestError::EmptyFile);
    }
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", sniff_mime(bytes), payload))
}

/// Split a base64 data URL into its MIME type and decoded bytes
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), IngestError> {
    let rest = url.strip_prefix("data:").ok_or(IngestError::NotDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(IngestError::NotDataUrl)?;
    let mime = header.strip_suffix(";base64").ok_or(IngestError::NotDataUrl)?;
    let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
    Ok((mime.to_string(), bytes))
}

/// Read a file from disk straight into a data URL
pub fn read_data_url(path: &Path) -> Result<String, IngestError> {
    let bytes = std::fs::read(path)?;
    encode_data_url(&bytes)
}

/// Assign a finished read to its slot and switch the slot on
pub fn apply_ingest(store: &mut CustomizationStore, slot: SlotId, data_url: String) {
    store.set_slot_image(slot, data_url);
    store.set_slot_active(slot, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{BaseColor, DecalLimits};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_encode_png() {
        let url = encode_data_url(&png_bytes()).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_encode_unknown_bytes() {
        let url = encode_data_url(b"hello").unwrap();
        assert_eq!(url, "data:application/octet-stream;base64,aGVsbG8=");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_data_url(&[]), Err(IngestError::EmptyFile));
    }

    #[test]
    fn test_decode_data_url() {
        let png = png_bytes();
        let url = encode_data_url(&png).unwrap();
        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, png);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(decode_data_url("assets/logo.png"), Err(IngestError::NotDataUrl));
        assert_eq!(decode_data_url("data:image/png,abc"), Err(IngestError::NotDataUrl));
        assert!(matches!(decode_data_url("data:image/png;base64,@@@"), Err(IngestError::Base64(_))));
    }

    #[test]
    fn test_read_data_url_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, png_bytes()).unwrap();
        let url = read_data_url(&path).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let missing = read_data_url(&dir.path().join("nope.png"));
        assert!(matches!(missing, Err(IngestError::Io(_))));
    }

    #[test]
    fn test_selected_file_name() {
        let file = SelectedFile::new(PathBuf::from("/tmp/art/logo.png"));
        assert_eq!(file.name, "logo.png");
    }

    #[test]
    fn test_apply_ingest_activates_slot() {
        let mut store = CustomizationStore::new(BaseColor::default(), DecalLimits::default());
        assert!(!store.state().slot(SlotId::Back).active);
        apply_ingest(&mut store, SlotId::Back, "data:image/png;base64,AAAA".to_string());
        let back = store.state().slot(SlotId::Back);
        assert!(back.active);
        assert_eq!(back.image_ref, "data:image/png;base64,AAAA");
        assert!(!store.state().slot(SlotId::Chest).has_image());
    }
}
