use std::fs::{self, OpenOptions};
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

/// Send `log` output to `path`. The terminal belongs to the UI, so nothing
/// is written to stderr. Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init(path: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    match path {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).wrap_err_with(|| format!("creating {}", dir.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .wrap_err_with(|| format!("opening log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    builder.try_init()?;
    Ok(())
}
