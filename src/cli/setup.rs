use crate::core::config::AppConfig;
use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::info;

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// Writes the example config to the platform config directory.
pub fn setup() -> Result<()> {
    setup_at_path(AppConfig::default_config_path()?)
}

/// Writes the example config to `path`, refusing to replace an existing file.
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create config directory {}", dir.display()))?;
    }
    write_example_config(path)?;
    info!(path = %path.display(), "Wrote example configuration");
    Ok(())
}

fn write_example_config(path: &Path) -> Result<()> {
    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            bail!(
                "A config already exists at {}; edit it or remove it first",
                path.display()
            )
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Cannot create {}", path.display()));
        }
    };
    file.write_all(EXAMPLE_CONFIG.as_bytes())
        .with_context(|| format!("Cannot write example config to {}", path.display()))
}
