// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;
use tracing::subscriber::DefaultGuard;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

use crate::{DisplayPreference, TracingConfig, WriterConfig, rolling_file_appender_impl};

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_thread_names(false)
    };
}

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

impl TracingConfig {
    /// Installs the global subscriber. This can only succeed once per process.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be created, or a global subscriber is
    /// already installed.
    pub fn install_global(self) -> miette::Result<()> {
        let layers = try_create_layers(self)?;
        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .into_diagnostic()
    }

    /// Installs a subscriber for the current thread only, until the returned guard is
    /// dropped. This is great for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be created.
    pub fn install_thread_local(self) -> miette::Result<DefaultGuard> {
        let layers = try_create_layers(self)?;
        let subscriber = tracing_subscriber::registry().with(layers);
        Ok(tracing::subscriber::set_default(subscriber))
    }
}

/// Returns the layers. This does not initialize the tracing system, see
/// [`TracingConfig::install_global()`] and [`TracingConfig::install_thread_local()`].
///
/// Returns [`None`] for [`WriterConfig::None`].
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_layers(
    tracing_config: TracingConfig,
) -> miette::Result<Option<Vec<Box<DynLayer<tracing_subscriber::Registry>>>>> {
    if tracing_config.writer_config == WriterConfig::None {
        return Ok(None);
    }

    let level_filter = tracing_config.get_level_filter();
    let mut return_it: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // Set the level filter from the tracing configuration. This is needed if you add
    // more layers which don't have a level filter.
    return_it.push(Box::new(level_filter));

    if let Some(layer) =
        try_create_display_layer(level_filter, tracing_config.get_writer_config())?
    {
        return_it.push(layer);
    }

    if let Some(layer) =
        try_create_file_layer(level_filter, tracing_config.get_writer_config())?
    {
        return_it.push(layer);
    }

    Ok(Some(return_it))
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// # Errors
///
/// This never fails today. It returns a `Result` to match [`try_create_file_layer()`].
pub fn try_create_display_layer<S>(
    level_filter: LevelFilter,
    writer_config: WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!();

    Ok(match writer_config {
        WriterConfig::DisplayAndFile(display_preference, _)
        | WriterConfig::Display(display_preference) => match display_preference {
            DisplayPreference::Stdout => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stdout)
                    .with_filter(level_filter),
            )),
            DisplayPreference::Stderr => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stderr)
                    .with_filter(level_filter),
            )),
        },
        _ => None,
    })
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    writer_config: WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!().with_ansi(false);

    Ok(match writer_config {
        WriterConfig::DisplayAndFile(_, file_path) | WriterConfig::File(file_path) => {
            let file = rolling_file_appender_impl::try_create(file_path.as_str())?;
            Some(Box::new(
                fmt_layer.with_writer(file).with_filter(level_filter),
            ))
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log_file_path(dir: &tempfile::TempDir) -> String {
        dir.path().join("momoko.log").to_str().unwrap().to_string()
    }

    #[test]
    fn test_try_create_display_layer() {
        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_display_layer(
                LevelFilter::DEBUG,
                WriterConfig::Display(DisplayPreference::Stderr),
            )
            .unwrap();
        assert!(layer.is_some());

        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_display_layer(LevelFilter::DEBUG, WriterConfig::File("x".into()))
                .unwrap();
        assert!(layer.is_none());
    }

    #[test]
    fn test_try_create_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = temp_log_file_path(&dir);

        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_file_layer(LevelFilter::DEBUG, WriterConfig::File(file_path.clone()))
                .unwrap();

        assert!(layer.is_some());
        assert!(std::path::Path::new(&file_path).exists());
    }

    #[test]
    fn test_try_create_both_layers() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = temp_log_file_path(&dir);

        let tracing_config = TracingConfig::new_file_and_display(
            Some(file_path.clone()),
            DisplayPreference::Stderr,
        );

        let layers = try_create_layers(tracing_config).unwrap().unwrap();
        assert_eq!(layers.len(), 3);
        assert!(std::path::Path::new(&file_path).exists());
    }

    #[test]
    fn test_writer_config_none_has_no_layers() {
        let tracing_config = TracingConfig {
            writer_config: WriterConfig::None,
            level_filter: LevelFilter::DEBUG,
        };
        assert!(try_create_layers(tracing_config).unwrap().is_none());
    }

    #[test]
    fn test_install_thread_local_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = temp_log_file_path(&dir);

        let default_guard = TracingConfig::new_file(Some(file_path.clone()))
            .with_level_filter(LevelFilter::INFO)
            .install_thread_local()
            .unwrap();

        tracing::info!(message = "line submitted");
        tracing::debug!(message = "filtered out");
        drop(default_guard);

        let contents = std::fs::read_to_string(&file_path).unwrap();
        assert!(contents.contains("line submitted"));
        assert!(!contents.contains("filtered out"));
    }
}
