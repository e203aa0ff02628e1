use crate::core::command::{DownloadOptions, DownloadRequest};
use crate::error::{GalleryError, Result};
use crate::ui::controls::InputControls;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use std::cell::Cell;
use std::path::{Path, PathBuf};

const OPTION_LABELS: [&str; 2] = [
    "--no-mtime (Don't use original modification time)",
    "--no-download (Simulate download, don't save files)",
];

/// Prompt form that collects one download request at a time.
///
/// The directory field keeps its last value between downloads.
pub struct Form {
    directory: PathBuf,
    enabled: Cell<bool>,
    theme: ColorfulTheme,
}

impl Form {
    pub fn new(default_directory: PathBuf) -> Self {
        Self {
            directory: default_directory,
            enabled: Cell::new(true),
            theme: ColorfulTheme::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn remember_directory(&mut self, directory: &Path) {
        self.directory = directory.to_path_buf();
    }

    pub fn prompt(&self) -> Result<DownloadRequest> {
        if !self.is_enabled() {
            return Err(GalleryError::Prompt {
                message: "a download is already running".to_string(),
            });
        }

        let url: String = Input::with_theme(&self.theme)
            .with_prompt("Gallery URL")
            .allow_empty(true)
            .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
                if input.trim().is_empty() {
                    Err("Please enter a URL.")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;

        let directory: String = Input::with_theme(&self.theme)
            .with_prompt("Download Directory")
            .with_initial_text(self.directory.to_string_lossy())
            .allow_empty(true)
            .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
                if input.trim().is_empty() {
                    Err("Please select a download directory.")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;

        let selected = MultiSelect::with_theme(&self.theme)
            .with_prompt("Options (space to toggle, enter to confirm)")
            .items(&OPTION_LABELS[..])
            .interact()?;

        DownloadRequest::new(
            url.trim(),
            PathBuf::from(directory.trim()),
            options_from_selection(&selected),
        )
    }

    pub fn confirm_another(&self) -> Result<bool> {
        let again = Confirm::with_theme(&self.theme)
            .with_prompt("Start another download?")
            .default(true)
            .interact()?;
        Ok(again)
    }
}

impl InputControls for Form {
    fn disable(&self) {
        self.enabled.set(false);
    }

    fn enable(&self) {
        self.enabled.set(true);
    }
}

/// Map checked rows of the option list onto flags.
pub fn options_from_selection(selected: &[usize]) -> DownloadOptions {
    DownloadOptions {
        suppress_mtime: selected.contains(&0),
        simulate_only: selected.contains(&1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::controls::ControlsGuard;

    #[test]
    fn test_options_from_selection() {
        assert_eq!(options_from_selection(&[]), DownloadOptions::default());
        assert_eq!(
            options_from_selection(&[1, 0]),
            DownloadOptions {
                suppress_mtime: true,
                simulate_only: true,
            }
        );
        assert!(options_from_selection(&[1]).simulate_only);
        assert!(!options_from_selection(&[1]).suppress_mtime);
    }

    #[test]
    fn test_form_is_locked_while_guarded() {
        let form = Form::new(PathBuf::from("/tmp/out"));
        {
            let _guard = ControlsGuard::new(&form);
            assert!(!form.is_enabled());
            assert!(matches!(form.prompt(), Err(GalleryError::Prompt { .. })));
        }
        assert!(form.is_enabled());
    }

    #[test]
    fn test_directory_is_remembered() {
        let mut form = Form::new(PathBuf::from("/tmp/out"));
        form.remember_directory(Path::new("/srv/galleries"));
        assert_eq!(form.directory(), Path::new("/srv/galleries"));
    }
}
