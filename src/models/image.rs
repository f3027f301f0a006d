use crate::error::Result;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    Gif,
    Unknown,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Unknown => "application/octet-stream",
        }
    }

    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "png" => ImageFormat::Png,
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "webp" => ImageFormat::WebP,
            "gif" => ImageFormat::Gif,
            _ => ImageFormat::Unknown,
        }
    }

    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        None
    }

    /// Content sniffing first, then the file name's extension.
    pub fn detect(data: &[u8], file_name: &str) -> Self {
        Self::from_magic_bytes(data).unwrap_or_else(|| {
            Path::new(file_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(Self::from_extension)
                .unwrap_or(ImageFormat::Unknown)
        })
    }
}

/// A file handed over by the picker control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl Selection {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let format = ImageFormat::detect(&bytes, &file_name);
        Self {
            file_name,
            bytes,
            format,
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        log::debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(Self::new(file_name, bytes))
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Locally displayable URI for the preview surface.
    pub fn preview_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_magic_bytes_win_over_extension() {
        let selection = Selection::new("photo.jpg", PNG_HEADER.to_vec());
        assert_eq!(selection.format, ImageFormat::Png);
        assert_eq!(selection.mime_type(), "image/png");
    }

    #[test]
    fn test_extension_fallback() {
        assert_eq!(ImageFormat::detect(b"not an image", "shot.JPEG"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::detect(b"", "notes.txt"), ImageFormat::Unknown);
        assert_eq!(ImageFormat::detect(b"", "no_extension"), ImageFormat::Unknown);
    }

    #[test]
    fn test_webp_and_gif_detection() {
        let mut webp = b"RIFF".to_vec();
        webp.extend_from_slice(&[0, 0, 0, 0]);
        webp.extend_from_slice(b"WEBP");
        assert_eq!(ImageFormat::from_magic_bytes(&webp), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_magic_bytes(b"GIF89a..."), Some(ImageFormat::Gif));
    }

    #[test]
    fn test_preview_uri() {
        let selection = Selection::new("dot.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(selection.preview_uri(), "data:image/jpeg;base64,/9j/4A==");
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, PNG_HEADER).unwrap();

        let selection = Selection::from_path(&path).await.unwrap();
        assert_eq!(selection.file_name, "photo.png");
        assert_eq!(selection.len(), 8);
        assert_eq!(selection.format, ImageFormat::Png);
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let result = Selection::from_path("/definitely/not/here.png").await;
        assert!(matches!(result, Err(crate::error::GeneratorError::Io(_))));
    }
}
