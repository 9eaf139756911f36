pub mod completion;
pub mod config;
pub mod goods;
pub mod invitations;
pub mod profile;
pub mod questions;
pub mod session;
pub mod validate;
pub mod wizard;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use client::Attachment;

/// Reads a file into an upload attachment named after the file.
pub fn read_attachment(path: &Path) -> Result<Attachment> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read file {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid file name {}", path.display()))?;

    let attachment = Attachment::new(file_name, bytes);
    Ok(match content_type_for(path) {
        Some(content_type) => attachment.with_content_type(content_type),
        None => attachment,
    })
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_attachment_detects_content_type() {
        let mut file = tempfile::Builder::new().suffix(".PDF").tempfile().unwrap();
        file.write_all(b"%PDF-1.4").unwrap();

        let attachment = read_attachment(file.path()).unwrap();

        assert_eq!(attachment.bytes, b"%PDF-1.4");
        assert_eq!(attachment.content_type.as_deref(), Some("application/pdf"));
        assert!(attachment.file_name.ends_with(".PDF"));
    }

    #[test]
    fn test_read_attachment_unknown_extension() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"plain").unwrap();

        let attachment = read_attachment(file.path()).unwrap();

        assert_eq!(attachment.content_type, None);
    }

    #[test]
    fn test_read_attachment_missing_file() {
        let err = read_attachment(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(err.to_string().contains("failed to read file"));
    }
}
