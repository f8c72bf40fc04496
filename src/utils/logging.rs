//! File logging, for debugging. Only available with the `logging` feature;
//! otherwise the `log` macros used throughout the crate go nowhere.

/// Sends every record at or above `min_level` to the file at `path`.
#[cfg(feature = "logging")]
pub fn init_logger(
    min_level: log::LevelFilter, path: &std::path::Path,
) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            // Local time isn't sound to query once other threads exist, so stick to UTC.
            let now = time::OffsetDateTime::now_utc();
            let timestamp = now
                .format(&time::macros::format_description!(
                    // "[[" escapes a single "[".
                    "[[[year]-[month]-[day]][[[hour]:[minute]:[second][subsecond digits:9]]"
                ))
                .unwrap_or_default();

            out.finish(format_args!(
                "{timestamp}[{}][{}] {message}",
                record.target(),
                record.level(),
            ))
        })
        .level(min_level)
        .chain(fern::log_file(path)?)
        .apply()?;

    Ok(())
}
