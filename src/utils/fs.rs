use crate::error::{GalleryError, Result};
use std::path::Path;

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => GalleryError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => GalleryError::from(e),
        })?;
    }
    Ok(())
}

/// A target directory is usable when it is a directory or does not exist yet.
pub fn check_target_dir(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(GalleryError::invalid_argument(
            "directory",
            format!("Not a directory: {}", path.display()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir_exists(&nested).unwrap();
    }

    #[test]
    fn test_check_target_dir() {
        let temp = TempDir::new().unwrap();
        assert!(check_target_dir(temp.path()).is_ok());
        assert!(check_target_dir(&temp.path().join("missing")).is_ok());

        let file = temp.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let err = check_target_dir(&file).unwrap_err();
        assert!(matches!(
            err,
            GalleryError::InvalidArgument {
                field: "directory",
                ..
            }
        ));
        assert_eq!(err.to_string(), format!("Not a directory: {}", file.display()));
    }
}
