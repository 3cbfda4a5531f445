use log::LevelFilter;
use std::env;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Initialize logging to a file.
///
/// The terminal is in raw mode on the alternate screen, so log lines never go
/// to stdout or stderr. Without a file nothing is logged. `debug_enabled`
/// raises the level to Debug and `RUST_LOG` overrides both.
pub fn init_logger(log_file: Option<&Path>, debug_enabled: bool) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_module_path(false)
        .format_target(false)
        .target(env_logger::Target::Pipe(Box::new(file)));

    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    builder
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    log::info!("logger initialized at {level:?} level");
    Ok(())
}
