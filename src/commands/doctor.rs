use crate::core::command::{self, GALLERY_DL};
use crate::core::config::{Config, DIR_ENV_VAR};
use crate::core::runner::{self, ExecutionOutcome};
use crate::error::Result;

pub fn check_environment() -> Result<()> {
    println!("🔍 gallery-runner - Environment Check");
    println!();

    let mut issues_found = 0;

    // Download directory
    println!("📁 Download Directory:");
    match Config::load() {
        Ok(config) => {
            let dir = &config.default_download_dir;
            println!("  default directory: {dir:?}");
            if dir.is_dir() {
                println!("    ✅ exists");
            } else {
                println!("    ❌ missing");
                issues_found += 1;
            }
            if std::env::var_os(DIR_ENV_VAR).is_some() {
                println!("    (set by {DIR_ENV_VAR})");
            }
        }
        Err(e) => {
            println!("  ❌ {e}");
            issues_found += 1;
        }
    }

    println!();

    // Search path lookup
    println!("🛣️  PATH Lookup:");
    match which::which(GALLERY_DL) {
        Ok(path) => println!("  ✅ {GALLERY_DL} found at {path:?}"),
        Err(_) => {
            println!("  ❌ {GALLERY_DL} not found on PATH");
            println!("    Install it with: python3 -m pip install -U gallery-dl");
            issues_found += 1;
        }
    }

    // Try to run gallery-dl
    println!();
    println!("🧪 Command Test:");
    let mut output = Vec::new();
    match runner::run(&command::build_version_probe(), |line| output.push(line)) {
        ExecutionOutcome::Success => {
            let version = output.first().map(String::as_str).unwrap_or("").trim();
            println!("  ✅ '{GALLERY_DL} --version' works: {version}");
        }
        ExecutionOutcome::ToolFailure { code } => {
            println!("  ❌ '{GALLERY_DL} --version' exited with code {code}");
            issues_found += 1;
        }
        ExecutionOutcome::LaunchFailure { message } => {
            println!("  ❌ {message}");
            issues_found += 1;
        }
    }

    println!();

    // Summary
    if issues_found == 0 {
        println!("🎉 Environment looks good! No issues found.");
    } else {
        println!("⚠️  Found {issues_found} issue(s) that need attention.");
    }

    Ok(())
}
