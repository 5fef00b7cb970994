//! Input loading: locate the file, pick a decoder, produce raw records.

mod structured;
mod tabular;

use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::ports::filesystem::FileSystem;
use crate::record::{Format, RawRecord};

/// Records decoded from one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedInput {
    /// The format that was used to decode.
    pub format: Format,
    /// Decoded records in file order.
    pub records: Vec<RawRecord>,
}

/// Decode raw input text in the given format.
///
/// # Errors
///
/// Returns [`LoadError::MalformedInput`] on bad syntax or an unexpected shape.
pub fn decode(text: &str, format: Format) -> Result<Vec<RawRecord>, LoadError> {
    match format {
        Format::Structured => structured::decode(text),
        Format::Tabular => tabular::decode(text),
    }
}

/// Resolve the format for `path`, preferring an explicit choice.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedFormat`] when no format is given and the
/// extension is not recognized.
pub fn resolve_format(path: &Path, explicit: Option<Format>) -> Result<Format, LoadError> {
    explicit
        .or_else(|| Format::from_path(path))
        .ok_or_else(|| LoadError::UnsupportedFormat { path: path.to_path_buf() })
}

/// Load and decode an input file.
///
/// # Errors
///
/// Returns an error if the file is missing, its format cannot be determined,
/// it cannot be read, or it fails to decode.
pub fn load_file(
    fs: &dyn FileSystem,
    path: &Path,
    format: Option<Format>,
) -> Result<LoadedInput, LoadError> {
    if !fs.exists(path) {
        return Err(LoadError::InputNotFound { path: path.to_path_buf() });
    }
    let format = resolve_format(path, format)?;
    let text = fs
        .read_to_string(path)
        .map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;
    let records = decode(&text, format)?;
    debug!(path = %path.display(), format = format.name(), count = records.len(), "decoded input");
    Ok(LoadedInput { format, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;

    #[test]
    fn missing_file_is_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = load_file(&LiveFileSystem, &path, None).unwrap_err();
        assert!(matches!(err, LoadError::InputNotFound { .. }));
    }

    #[test]
    fn unknown_extension_without_format_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues.txt");
        std::fs::write(&path, "[]").unwrap();
        let err = load_file(&LiveFileSystem, &path, None).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
    }

    #[test]
    fn explicit_format_overrides_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues.txt");
        std::fs::write(&path, r#"[{"title": "A", "body": "b"}]"#).unwrap();
        let loaded = load_file(&LiveFileSystem, &path, Some(Format::Structured)).unwrap();
        assert_eq!(loaded.format, Format::Structured);
        assert_eq!(loaded.records.len(), 1);
    }

    #[test]
    fn loads_csv_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues.csv");
        std::fs::write(&path, "title,body\nA,b\nB,c\n").unwrap();
        let loaded = load_file(&LiveFileSystem, &path, None).unwrap();
        assert_eq!(loaded.format, Format::Tabular);
        assert_eq!(loaded.records.len(), 2);
    }
}
