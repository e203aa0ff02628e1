//! Maps a download request onto the gallery-dl command line.

use crate::error::{GalleryError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Executable looked up on the search path.
pub const GALLERY_DL: &str = "gallery-dl";

pub const DIRECTORY_FLAG: &str = "-D";
pub const NO_MTIME_FLAG: &str = "--no-mtime";
pub const NO_DOWNLOAD_FLAG: &str = "--no-download";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Don't use the original modification time for saved files
    pub suppress_mtime: bool,
    /// Simulate the download without saving files
    pub simulate_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    url: String,
    directory: PathBuf,
    options: DownloadOptions,
}

impl DownloadRequest {
    /// Both `url` and `directory` are kept verbatim; they only have to be non-blank.
    pub fn new<U, D>(url: U, directory: D, options: DownloadOptions) -> Result<Self>
    where
        U: Into<String>,
        D: Into<PathBuf>,
    {
        let url = url.into();
        let directory = directory.into();

        if url.trim().is_empty() {
            return Err(GalleryError::invalid_argument("url", "Please enter a URL."));
        }

        if directory.as_os_str().is_empty() || directory.to_string_lossy().trim().is_empty() {
            return Err(GalleryError::invalid_argument(
                "directory",
                "Please select a download directory.",
            ));
        }

        Ok(Self {
            url,
            directory,
            options,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn options(&self) -> DownloadOptions {
        self.options
    }
}

/// Program name followed by its arguments. Built once, never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentVector(Vec<String>);

impl ArgumentVector {
    pub fn program(&self) -> &str {
        &self.0[0]
    }

    pub fn args(&self) -> &[String] {
        &self.0[1..]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Never zero: every constructor requires a program name.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<ArgumentVector> for Vec<String> {
    fn from(argv: ArgumentVector) -> Self {
        argv.0
    }
}

impl TryFrom<Vec<String>> for ArgumentVector {
    type Error = GalleryError;

    fn try_from(parts: Vec<String>) -> Result<Self> {
        match parts.first() {
            Some(program) if !program.is_empty() => Ok(Self(parts)),
            _ => Err(GalleryError::invalid_argument(
                "program",
                "argument vector needs a program name",
            )),
        }
    }
}

impl fmt::Display for ArgumentVector {
    // Only for logs; the vector never goes through a shell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

pub fn build(request: &DownloadRequest) -> ArgumentVector {
    let mut argv = vec![
        GALLERY_DL.to_string(),
        request.url.clone(),
        DIRECTORY_FLAG.to_string(),
        request.directory.to_string_lossy().into_owned(),
    ];

    if request.options.suppress_mtime {
        argv.push(NO_MTIME_FLAG.to_string());
    }
    if request.options.simulate_only {
        argv.push(NO_DOWNLOAD_FLAG.to_string());
    }

    ArgumentVector(argv)
}

/// `gallery-dl --version`, used to check that the tool runs at all.
pub fn build_version_probe() -> ArgumentVector {
    ArgumentVector(vec![GALLERY_DL.to_string(), "--version".to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(url: &str, dir: &str, suppress_mtime: bool, simulate_only: bool) -> DownloadRequest {
        DownloadRequest::new(
            url,
            dir,
            DownloadOptions {
                suppress_mtime,
                simulate_only,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_build_with_no_mtime() {
        let argv = build(&request("https://example.com/g/1", "/tmp/out", true, false));
        assert_eq!(
            argv.as_slice(),
            ["gallery-dl", "https://example.com/g/1", "-D", "/tmp/out", "--no-mtime"]
        );
    }

    #[test]
    fn test_build_without_options() {
        let argv = build(&request("https://example.com/g/1", "/tmp/out", false, false));
        assert_eq!(argv.len(), 4);
        assert_eq!(argv.program(), "gallery-dl");
        assert_eq!(argv.args(), ["https://example.com/g/1", "-D", "/tmp/out"]);
    }

    #[test]
    fn test_flag_order_is_fixed() {
        let both = build(&request("u", "d", true, true));
        assert_eq!(&both.as_slice()[4..], ["--no-mtime", "--no-download"]);

        let simulate = build(&request("u", "d", false, true));
        assert_eq!(&simulate.as_slice()[4..], ["--no-download"]);
    }

    #[test]
    fn test_url_is_passed_verbatim() {
        let url = "https://example.com/a b?x=1&y=$(rm -rf ~);'\"";
        let argv = build(&request(url, "/tmp/my dir", false, false));
        assert_eq!(argv.as_slice()[1], url);
        assert_eq!(argv.as_slice()[3], "/tmp/my dir");
    }

    #[test]
    fn test_build_is_deterministic() {
        let req = request("https://example.com/g/2", "/data", true, true);
        assert_eq!(build(&req), build(&req));
    }

    #[test]
    fn test_blank_input_is_rejected() {
        let err = DownloadRequest::new("  ", "/tmp", DownloadOptions::default()).unwrap_err();
        assert!(matches!(err, GalleryError::InvalidArgument { field: "url", .. }));
        assert_eq!(err.to_string(), "Please enter a URL.");

        let err = DownloadRequest::new("https://x", "", DownloadOptions::default()).unwrap_err();
        assert!(matches!(err, GalleryError::InvalidArgument { field: "directory", .. }));
    }

    #[test]
    fn test_argument_vector_requires_program() {
        assert!(ArgumentVector::try_from(Vec::new()).is_err());
        assert!(ArgumentVector::try_from(vec![String::new()]).is_err());

        let argv = ArgumentVector::try_from(vec!["sh".to_string(), "-c".to_string()]).unwrap();
        assert_eq!(argv.to_string(), "sh -c");
        assert_eq!(argv.len(), 2);
        assert_eq!(build_version_probe().len(), 2);
    }
}
