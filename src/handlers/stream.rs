//! Stream handler: appends formatted records to stdout, stderr or a file

use crate::core::{
    Formatter, Handler, HandlerCore, LogLevel, LogRecord, LoggerError, Processor, Result,
};
use crate::formatters::LineFormatter;
use fs2::FileExt;
use parking_lot::Mutex;
use std::any::Any;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a [`StreamHandler`] writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamTarget {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl StreamTarget {
    /// `stdout`, `stderr`, `file://PATH` or a plain path
    pub fn parse(stream: &str) -> Self {
        match stream {
            "stdout" => StreamTarget::Stdout,
            "stderr" => StreamTarget::Stderr,
            other => StreamTarget::File(PathBuf::from(
                other.strip_prefix("file://").unwrap_or(other),
            )),
        }
    }
}

pub struct StreamHandler {
    core: HandlerCore,
    url: String,
    target: StreamTarget,
    file_permission: Option<u32>,
    use_locking: bool,
    /// Opened on first write
    file: Mutex<Option<File>>,
}

impl StreamHandler {
    pub fn new(stream: impl Into<String>, level: LogLevel) -> Self {
        let url = stream.into();
        Self {
            core: HandlerCore::new(level, Arc::new(LineFormatter::default())),
            target: StreamTarget::parse(&url),
            url,
            file_permission: None,
            use_locking: false,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn with_bubble(mut self, bubble: bool) -> Self {
        self.core.bubble = bubble;
        self
    }

    /// Unix permission bits applied to the log file once it is opened;
    /// `None` keeps the system default
    #[must_use]
    pub fn with_file_permission(mut self, permission: Option<u32>) -> Self {
        self.file_permission = permission;
        self
    }

    /// Hold an exclusive advisory lock on the file around every write
    #[must_use]
    pub fn with_locking(mut self, use_locking: bool) -> Self {
        self.use_locking = use_locking;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn target(&self) -> &StreamTarget {
        &self.target
    }

    pub fn file_permission(&self) -> Option<u32> {
        self.file_permission
    }

    pub fn use_locking(&self) -> bool {
        self.use_locking
    }

    fn open(&self, path: &Path) -> Result<File> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::io_operation(
                        "creating log directory",
                        format!("cannot create '{}'", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log stream",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        #[cfg(unix)]
        if let Some(mode) = self.file_permission {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
        }

        Ok(file)
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let mut guard = self.file.lock();
        if guard.is_none() {
            *guard = Some(self.open(path)?);
        }
        let Some(file) = guard.as_mut() else {
            return Err(LoggerError::other("log stream not initialized"));
        };

        if self.use_locking {
            FileExt::lock_exclusive(&*file)
                .map_err(|_| LoggerError::file_lock(path.display().to_string()))?;
        }
        let written = file.write_all(bytes);
        if self.use_locking {
            // Released even when the write failed
            let _ = FileExt::unlock(&*file);
        }
        written?;
        Ok(())
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        match &self.target {
            StreamTarget::Stdout => std::io::stdout().lock().write_all(bytes)?,
            StreamTarget::Stderr => std::io::stderr().lock().write_all(bytes)?,
            StreamTarget::File(path) => self.write_file(path, bytes)?,
        }
        Ok(())
    }
}

impl Handler for StreamHandler {
    fn level(&self) -> LogLevel {
        self.core.level
    }

    fn bubble(&self) -> bool {
        self.core.bubble
    }

    fn handle(&self, record: &LogRecord) -> Result<bool> {
        if !self.is_handling(record.level) {
            return Ok(false);
        }
        let formatted = self.core.render(record);
        self.write(formatted.as_bytes())?;
        Ok(!self.core.bubble)
    }

    fn push_processor(&mut self, processor: Processor) {
        self.core.processors.push(processor);
    }

    fn processors(&self) -> &[Processor] {
        &self.core.processors
    }

    fn set_formatter(&mut self, formatter: Arc<dyn Formatter>) {
        self.core.formatter = formatter;
    }

    fn flush(&self) -> Result<()> {
        match &self.target {
            StreamTarget::Stdout => std::io::stdout().flush()?,
            StreamTarget::Stderr => std::io::stderr().flush()?,
            StreamTarget::File(_) => {
                if let Some(file) = self.file.lock().as_mut() {
                    file.flush()?;
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "stream"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
