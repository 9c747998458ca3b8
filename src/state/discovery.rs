//! Folder discovery of dataset files.

use std::path::{Path, PathBuf};

/// Check if a path has one of the given extensions (case-insensitive).
pub fn has_extension(path: &Path, extensions: &[impl AsRef<str>]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            extensions
                .iter()
                .any(|e| e.as_ref().trim_start_matches('.').eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

/// Discover dataset files directly inside `folder` (non-recursive).
///
/// Results are sorted by path so discovery order, and therefore
/// collection order, is stable across platforms. An empty result is not an
/// error here; the caller decides how to report it. An entry that cannot be
/// read fails the whole scan.
pub fn discover_files(folder: &Path, extensions: &[impl AsRef<str>]) -> std::io::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(folder)?.collect::<Result<Vec<_>, _>>()?;
    let mut files: Vec<PathBuf> = entries
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_extension(path, extensions))
        .collect();

    files.sort();

    log::debug!("Discovered {} dataset files in {:?}", files.len(), folder);
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a/b.dcm"), &["dcm"]));
        assert!(has_extension(Path::new("a/b.DCM"), &["dcm"]));
        assert!(has_extension(Path::new("a/b.dcm"), &[".dcm"]));
        assert!(!has_extension(Path::new("a/b.dcm.bak"), &["dcm"]));
        assert!(!has_extension(Path::new("a/dcm"), &["dcm"]));
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.dcm", "a.dcm", "notes.txt", "c.DCM"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.dcm")).unwrap();

        let files = discover_files(dir.path(), &["dcm"]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.dcm", "b.dcm", "c.DCM"]);
    }

    #[test]
    fn test_empty_folder() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_files(dir.path(), &["dcm"]).unwrap().is_empty());
    }

    #[test]
    fn test_file_instead_of_folder_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.dcm");
        std::fs::write(&file, b"").unwrap();
        assert!(discover_files(&file, &["dcm"]).is_err());
    }

    #[test]
    fn test_missing_folder_is_io_error() {
        assert!(discover_files(Path::new("/nonexistent/folder"), &["dcm"]).is_err());
    }
}
