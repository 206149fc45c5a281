//! Logger context
//!
//! A [`Logger`] owns everything one logging pipeline needs: the record
//! queue, the configuration (threshold, flags, file and socket handles), the
//! console sink, metrics, and the writer thread handle. Independent loggers
//! share nothing, so tests and libraries can each run their own.

use super::{
    config::ConfigState,
    error::{LoggerError, Result},
    failure_policy::{DispatchFailureCallback, DispatchFailurePolicy},
    flags::MetadataFlags,
    log_level::LogLevel,
    metrics::WriterMetrics,
    output_format::format_message,
    queue::RecordQueue,
    record::{Destination, Record},
    settings::Settings,
    sink::Sink,
    writer::{self, WriterState},
};
use crate::sinks::{ConsoleSink, FileSink, Protocol, SocketSink};
use parking_lot::{Mutex, RwLock};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

/// State shared between the logger handle and its writer thread.
pub(crate) struct Shared {
    pub(crate) queue: RecordQueue,
    pub(crate) config: RwLock<ConfigState>,
    pub(crate) console: ConsoleSink,
    pub(crate) metrics: WriterMetrics,
    pub(crate) failure_policy: DispatchFailurePolicy,
    pub(crate) on_dispatch_failure: Option<DispatchFailureCallback>,
}

impl Shared {
    pub(crate) fn new(console: ConsoleSink) -> Self {
        Self {
            queue: RecordQueue::new(),
            config: RwLock::new(ConfigState::new()),
            console,
            metrics: WriterMetrics::new(),
            failure_policy: DispatchFailurePolicy::default(),
            on_dispatch_failure: None,
        }
    }
}

/// Asynchronous logger with console, file and socket sinks.
///
/// Log calls format on the caller's thread and enqueue; the writer thread
/// started by [`Logger::init_writer`] does the I/O. Records enqueued while no
/// writer runs stay queued until one is started.
///
/// # Example
///
/// ```
/// use rust_sink_logger::prelude::*;
///
/// let logger = Logger::new();
/// logger.set_level(LogLevel::Info);
/// logger.init_writer().unwrap();
///
/// logger.info("Server started");
/// logger.debug("Below threshold, costs one comparison");
///
/// // Blocks until every queued record has been written
/// logger.stop_writer().unwrap();
/// ```
pub struct Logger {
    shared: Arc<Shared>,
    writer: Mutex<WriterState>,
}

impl Logger {
    /// Logger writing console records to stdout, default configuration
    /// (`Warn` threshold, `level` metadata), writer not started.
    #[must_use]
    pub fn new() -> Self {
        Self::from_shared(Shared::new(ConsoleSink::new()))
    }

    fn from_shared(shared: Shared) -> Self {
        Self {
            shared: Arc::new(shared),
            writer: Mutex::new(WriterState::Uninitialized),
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Start the writer thread.
    ///
    /// Only one writer may run per logger. Calling this while it runs is a
    /// usage error reported as [`LoggerError::WriterAlreadyRunning`]. A
    /// stopped writer can be started again.
    pub fn init_writer(&self) -> Result<()> {
        let mut state = self.writer.lock();
        if state.is_running() {
            return Err(LoggerError::WriterAlreadyRunning);
        }

        self.shared.queue.reset_shutdown();
        let handle = writer::spawn(Arc::clone(&self.shared))?;
        *state = WriterState::Running(handle);
        Ok(())
    }

    /// Stop the writer thread, blocking until it has dispatched every record
    /// queued before the call, then flush the sinks.
    ///
    /// Returns [`LoggerError::WriterNotRunning`] if no writer was started.
    pub fn stop_writer(&self) -> Result<()> {
        {
            let mut state = self.writer.lock();
            let handle = match std::mem::take(&mut *state) {
                WriterState::Running(handle) => handle,
                other => {
                    *state = other;
                    return Err(LoggerError::WriterNotRunning);
                }
            };
            *state = WriterState::Stopped;

            self.shared.queue.request_shutdown();
            handle.join().map_err(|panic_info| {
                LoggerError::WriterPanicked(writer::panic_message(panic_info.as_ref()))
            })?;
        }

        self.flush()
    }

    pub fn is_writer_running(&self) -> bool {
        self.writer.lock().is_running()
    }

    // ------------------------------------------------------------------
    // Core boundary
    // ------------------------------------------------------------------

    /// Queue already-formatted text for one sink. Never blocks on I/O.
    pub fn enqueue(&self, payload: impl Into<Arc<str>>, destination: Destination) {
        self.shared.metrics.record_enqueued();
        self.shared.queue.enqueue(Record::new(payload, destination));
    }

    /// Records waiting for the writer.
    pub fn queue_len(&self) -> usize {
        self.shared.queue.len()
    }

    pub fn metrics(&self) -> &WriterMetrics {
        &self.shared.metrics
    }

    // ------------------------------------------------------------------
    // Producer API
    // ------------------------------------------------------------------

    /// Log `message` at `level` to every open sink.
    ///
    /// Below the threshold this returns after one comparison. Otherwise the
    /// message is formatted once and queued for the console, plus the file
    /// and the socket when they are open, one record per sink.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let (payload, to_file, to_socket) = {
            let config = self.shared.config.read();
            if !config.accepts(level) {
                return;
            }
            (
                format_message(level, config.flags, message.as_ref()),
                config.is_file_open(),
                config.is_socket_open(),
            )
        };

        let payload: Arc<str> = payload.into();
        if to_file {
            self.enqueue(Arc::clone(&payload), Destination::File);
        }
        if to_socket {
            self.enqueue(Arc::clone(&payload), Destination::Socket);
        }
        self.enqueue(payload, Destination::Console);
    }

    pub fn log_to_console(&self, level: LogLevel, message: impl AsRef<str>) {
        self.log_single(level, message.as_ref(), Destination::Console);
    }

    /// Log to the file sink only; a no-op when no file is open.
    pub fn log_to_file(&self, level: LogLevel, message: impl AsRef<str>) {
        self.log_single(level, message.as_ref(), Destination::File);
    }

    /// Log to the socket sink only; a no-op when no socket is open.
    pub fn log_to_socket(&self, level: LogLevel, message: impl AsRef<str>) {
        self.log_single(level, message.as_ref(), Destination::Socket);
    }

    fn log_single(&self, level: LogLevel, message: &str, destination: Destination) {
        let payload = {
            let config = self.shared.config.read();
            let open = match destination {
                Destination::Console => true,
                Destination::File => config.is_file_open(),
                Destination::Socket => config.is_socket_open(),
            };
            if !open || !config.accepts(level) {
                return;
            }
            format_message(level, config.flags, message)
        };

        self.enqueue(payload, destination);
    }

    /// Queue `text` for the console verbatim: no threshold, no metadata.
    pub fn write_console(&self, text: impl Into<Arc<str>>) {
        self.enqueue(text, Destination::Console);
    }

    /// Queue `text` for the file verbatim if a file is open.
    pub fn write_file(&self, text: impl Into<Arc<str>>) {
        if self.is_file_open() {
            self.enqueue(text, Destination::File);
        }
    }

    /// Queue `text` for the socket verbatim if a socket is open.
    pub fn write_socket(&self, text: impl Into<Arc<str>>) {
        if self.is_socket_open() {
            self.enqueue(text, Destination::Socket);
        }
    }

    /// Run [`Logger::log`] on a short-lived thread.
    ///
    /// Drop the returned handle to detach; join it to wait for the enqueue.
    pub fn log_detached(
        self: &Arc<Self>,
        level: LogLevel,
        message: impl Into<String>,
    ) -> Result<thread::JoinHandle<()>> {
        let logger = Arc::clone(self);
        let message = message.into();
        thread::Builder::new()
            .name("sink-logger-detached".to_string())
            .spawn(move || logger.log(level, message))
            .map_err(|e| {
                LoggerError::io_operation("spawning detached log thread", "thread creation failed", e)
            })
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn output(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Output, message);
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn level(&self) -> LogLevel {
        self.shared.config.read().level
    }

    pub fn set_level(&self, level: LogLevel) {
        self.shared.config.write().level = level;
    }

    pub fn flags(&self) -> MetadataFlags {
        self.shared.config.read().flags
    }

    /// Replace the metadata flags.
    pub fn set_flags(&self, flags: MetadataFlags) {
        self.shared.config.write().flags = flags;
    }

    pub fn add_flags(&self, flags: MetadataFlags) {
        self.shared.config.write().flags.insert(flags);
    }

    pub fn remove_flags(&self, flags: MetadataFlags) {
        self.shared.config.write().flags.remove(flags);
    }

    pub fn is_file_open(&self) -> bool {
        self.shared.config.read().is_file_open()
    }

    /// Open `path` for appending and route file records to it.
    ///
    /// Any previously open file is closed first, even if opening the new one
    /// fails. The file must already exist.
    pub fn set_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut config = self.shared.config.write();
        config.file = None;
        config.file = Some(FileSink::open(path)?);
        Ok(())
    }

    pub fn close_file(&self) {
        self.shared.config.write().file = None;
    }

    pub fn is_socket_open(&self) -> bool {
        self.shared.config.read().is_socket_open()
    }

    /// Connect to a UNIX domain stream socket at `path`.
    ///
    /// Any previously open socket is closed first.
    #[cfg(unix)]
    pub fn set_unix_socket(&self, path: impl AsRef<Path>) -> Result<()> {
        self.close_socket();
        let sink = SocketSink::connect_unix(path)?;
        self.shared.config.write().socket = Some(sink);
        Ok(())
    }

    /// Connect to `addr:port` over TCP or UDP. `addr` must be an IP literal.
    ///
    /// Any previously open socket is closed first. The connect itself runs
    /// without holding the configuration lock.
    pub fn set_socket(&self, addr: &str, port: u16, protocol: Protocol) -> Result<()> {
        self.close_socket();
        let sink = SocketSink::connect(addr, port, protocol)?;
        self.shared.config.write().socket = Some(sink);
        Ok(())
    }

    pub fn close_socket(&self) {
        self.shared.config.write().socket = None;
    }

    /// Load a settings file and apply it: level, then flags, then file.
    pub fn load_settings(&self, path: impl AsRef<Path>) -> Result<()> {
        let settings = Settings::from_file(path)?;
        self.apply_settings(&settings)
    }

    pub fn apply_settings(&self, settings: &Settings) -> Result<()> {
        if let Some(level) = settings.level {
            self.set_level(level);
        }
        if let Some(flags) = settings.flags {
            self.set_flags(flags);
        }
        if let Some(ref file) = settings.file {
            self.set_file(file)?;
        }
        Ok(())
    }

    /// Flush the console and the open file/socket under the exclusive
    /// configuration lock.
    pub fn flush(&self) -> Result<()> {
        let config = self.shared.config.write();
        self.shared.console.flush()?;
        if let Some(ref file) = config.file {
            file.flush()?;
        }
        if let Some(ref socket) = config.socket {
            socket.flush()?;
        }
        Ok(())
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_sink_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Debug)
    ///     .flags(MetadataFlags::LEVEL | MetadataFlags::TIME)
    ///     .build()
    ///     .unwrap();
    /// assert!(!logger.is_writer_running());
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.is_writer_running() {
            if let Err(e) = self.stop_writer() {
                eprintln!("[LOGGER ERROR] Failed to stop writer during shutdown: {}", e);
            }
        }

        let dropped = self.shared.metrics.dropped();
        if dropped > 0 && self.shared.failure_policy == DispatchFailurePolicy::Alert {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped records (drop rate: {:.2}%)",
                dropped,
                self.shared.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_sink_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Info)
///     .console_writer(std::io::sink())
///     .failure_policy(DispatchFailurePolicy::Alert)
///     .on_dispatch_failure(Arc::new(|destination, count| {
///         eprintln!("ALERT: {} {} records dropped", count, destination);
///     }))
///     .start_writer(true)
///     .build()
///     .unwrap();
///
/// logger.info("hello");
/// logger.stop_writer().unwrap();
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    flags: MetadataFlags,
    console: Option<ConsoleSink>,
    file: Option<PathBuf>,
    failure_policy: DispatchFailurePolicy,
    on_dispatch_failure: Option<DispatchFailureCallback>,
    start_writer: bool,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: LogLevel::default(),
            flags: MetadataFlags::default(),
            console: None,
            file: None,
            failure_policy: DispatchFailurePolicy::default(),
            on_dispatch_failure: None,
            start_writer: false,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flags(mut self, flags: MetadataFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Send console records to `writer` instead of stdout
    #[must_use = "builder methods return a new value"]
    pub fn console_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.console = Some(ConsoleSink::with_writer(writer));
        self
    }

    /// Open an existing file as the file sink when building
    #[must_use = "builder methods return a new value"]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn failure_policy(mut self, policy: DispatchFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set a callback invoked for every record the writer drops
    #[must_use = "builder methods return a new value"]
    pub fn on_dispatch_failure(mut self, callback: DispatchFailureCallback) -> Self {
        self.on_dispatch_failure = Some(callback);
        self
    }

    /// Start the writer thread as part of `build`
    #[must_use = "builder methods return a new value"]
    pub fn start_writer(mut self, start: bool) -> Self {
        self.start_writer = start;
        self
    }

    /// Build the Logger
    ///
    /// Fails if the configured file cannot be opened or the writer thread
    /// cannot be spawned.
    pub fn build(self) -> Result<Logger> {
        let mut shared = Shared::new(self.console.unwrap_or_default());
        shared.failure_policy = self.failure_policy;
        shared.on_dispatch_failure = self.on_dispatch_failure;
        {
            let config = shared.config.get_mut();
            config.level = self.level;
            config.flags = self.flags;
            if let Some(ref path) = self.file {
                config.file = Some(FileSink::open(path)?);
            }
        }

        let logger = Logger::from_shared(shared);
        if self.start_writer {
            logger.init_writer()?;
        }
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_logger() -> Logger {
        Logger::builder()
            .console_writer(std::io::sink())
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let logger = quiet_logger();
        assert_eq!(logger.level(), LogLevel::Warn);
        assert_eq!(logger.flags(), MetadataFlags::LEVEL);
        assert!(!logger.is_file_open());
        assert!(!logger.is_socket_open());
        assert!(!logger.is_writer_running());
    }

    #[test]
    fn test_below_threshold_is_noop() {
        let logger = quiet_logger();
        logger.log(LogLevel::Info, "x");
        assert_eq!(logger.queue_len(), 0);
        assert_eq!(logger.metrics().enqueued(), 0);

        logger.log(LogLevel::Error, "y");
        assert_eq!(logger.queue_len(), 1);
    }

    #[test]
    fn test_disabled_threshold_suppresses_everything() {
        let logger = quiet_logger();
        logger.set_level(LogLevel::Disabled);
        logger.output("nothing");
        logger.log(LogLevel::Disabled, "nothing either");
        assert_eq!(logger.queue_len(), 0);
    }

    #[test]
    fn test_file_and_socket_variants_noop_when_closed() {
        let logger = quiet_logger();
        logger.log_to_file(LogLevel::Error, "x");
        logger.log_to_socket(LogLevel::Error, "x");
        logger.write_file("x\n");
        logger.write_socket("x\n");
        assert_eq!(logger.queue_len(), 0);

        logger.write_console("raw\n");
        logger.log_to_console(LogLevel::Error, "x");
        assert_eq!(logger.queue_len(), 2);
    }

    #[test]
    fn test_double_start_is_reported() {
        let logger = quiet_logger();
        logger.init_writer().unwrap();
        assert!(matches!(
            logger.init_writer(),
            Err(LoggerError::WriterAlreadyRunning)
        ));
        logger.stop_writer().unwrap();
    }

    #[test]
    fn test_stop_without_start_is_reported() {
        let logger = quiet_logger();
        assert!(matches!(
            logger.stop_writer(),
            Err(LoggerError::WriterNotRunning)
        ));

        logger.init_writer().unwrap();
        logger.stop_writer().unwrap();
        assert!(matches!(
            logger.stop_writer(),
            Err(LoggerError::WriterNotRunning)
        ));
    }

    #[test]
    fn test_restart_after_stop() {
        let logger = quiet_logger();
        logger.set_level(LogLevel::Debug);

        logger.init_writer().unwrap();
        logger.info("first run");
        logger.stop_writer().unwrap();

        logger.init_writer().unwrap();
        assert!(logger.is_writer_running());
        logger.info("second run");
        logger.stop_writer().unwrap();

        assert_eq!(logger.metrics().dispatched(), 2);
        assert_eq!(logger.queue_len(), 0);
    }

    #[test]
    fn test_flag_mutation() {
        let logger = quiet_logger();
        logger.set_flags(MetadataFlags::NONE);
        logger.add_flags(MetadataFlags::DATE | MetadataFlags::TIME);
        logger.remove_flags(MetadataFlags::DATE);
        assert_eq!(logger.flags(), MetadataFlags::TIME);
    }

    #[test]
    fn test_socket_record_without_handle_is_dropped() {
        let logger = quiet_logger();
        logger.enqueue("orphan\n", Destination::Socket);
        logger.init_writer().unwrap();
        logger.stop_writer().unwrap();

        assert_eq!(logger.metrics().dropped(), 1);
        assert_eq!(logger.metrics().dispatched(), 0);
    }

    #[test]
    fn test_build_with_missing_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Logger::builder()
            .console_writer(std::io::sink())
            .file(dir.path().join("missing.log"))
            .build();
        assert!(matches!(result, Err(LoggerError::FileNotFound { .. })));
    }
}
