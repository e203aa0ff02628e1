use crate::commands::download;
use crate::core::config::Config;
use crate::error::{GalleryError, Result};
use crate::ui::form::Form;
use crate::ui::log_view::{LogFormat, LogView};
use dialoguer::console::Term;

/// Prompt for downloads until the user declines to start another one.
pub fn run_session() -> Result<()> {
    let config = Config::load()?;
    let mut form = Form::new(config.default_download_dir);
    let term = Term::stdout();

    println!("📥 gallery-dl runner");
    println!();

    loop {
        let request = match form.prompt() {
            Ok(request) => request,
            Err(GalleryError::InvalidArgument { message, .. }) => {
                println!("⚠️  {message}");
                continue;
            }
            Err(e) => return Err(e),
        };

        term.clear_screen()?;
        let mut view = LogView::stdout(LogFormat::Text);

        match download::execute(&request, &form, &mut view) {
            Ok(_) => form.remember_directory(request.directory()),
            Err(e @ (GalleryError::InvalidArgument { .. } | GalleryError::PermissionDenied { .. })) => {
                println!("⚠️  {e}");
            }
            Err(e) => return Err(e),
        }

        println!();
        if !form.confirm_another()? {
            break;
        }
    }

    Ok(())
}
