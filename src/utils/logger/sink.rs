use crate::utils::error::{AppError, Result};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

type BoxedWriter = Box<dyn Write + Send>;

/// Shared, flushable destination for log records.
#[derive(Clone)]
pub struct LogSink {
    name: String,
    inner: Arc<Mutex<BoxedWriter>>,
}

impl LogSink {
    pub fn new<W: Write + Send + 'static>(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new("stdout", io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new("stderr", io::stderr())
    }

    /// Opens `path` for appending, creating it (and its parent directories)
    /// if needed.
    pub fn append_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AppError::LoggerInitError {
                message: format!("cannot open log file {}: {}", path.display(), e),
            })?;
        Ok(Self::new(path.display().to_string(), file))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }

    fn lock(&self) -> MutexGuard<'_, BoxedWriter> {
        // a panic while writing must not silence every later record
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink").field("name", &self.name).finish()
    }
}

/// Writer handed to the fmt layer for a single record.
pub struct SinkWriter<'a> {
    guard: MutexGuard<'a, BoxedWriter>,
}

impl Write for SinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.guard.flush()
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = SinkWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter { guard: self.lock() }
    }
}
