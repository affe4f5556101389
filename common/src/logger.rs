use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::{Mutex, OnceLock};
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub enum LogSink {
    Stdout,
    File(Mutex<File>),
}

impl LogSink {
    /// Appends to `path`, creating the file if needed.
    pub fn file(path: &str) -> Result<Self, String> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("Failed to open log file {}: {}", path, e))?;
        Ok(LogSink::File(Mutex::new(file)))
    }
}

pub struct Logger {
    prefix: Option<String>,
    sink: LogSink,
}

impl Logger {
    fn new(prefix: Option<String>, sink: LogSink) -> Self {
        Self { prefix, sink }
    }

    fn format_line(&self, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        if let Some(ref prefix) = self.prefix {
            format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message)
        } else {
            format!("[{}][{}:{}] {}", timestamp, file_name, line, message)
        }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let formatted = self.format_line(file, line, message);
        match &self.sink {
            LogSink::Stdout => println!("{}", formatted),
            LogSink::File(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{}", formatted);
                }
            }
        }
    }
}

pub fn init_logger(prefix: Option<String>, sink: LogSink) {
    LOGGER.get_or_init(|| Logger::new(prefix, sink));
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    } else if !cfg!(test) {
        eprintln!("Logger not initialized! Call init_logger() first.");
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}
