use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    prefix: Option<String>,
}

impl Logger {
    fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        println!("{}", self.format_line(file, line, message));
    }

    fn format_line(&self, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message),
            None => format!("[{}][{}:{}] {}", timestamp, file_name, line, message),
        }
    }
}

pub fn init_logger(prefix: Option<String>) {
    LOGGER.get_or_init(|| Logger::new(prefix));
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    } else {
        eprintln!("Logger not initialized! Call init_logger() first. Dropped: {}", message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_strips_directories() {
        let logger = Logger::new(None);
        let line = logger.format_line("common/src/games/puzzle2048/session.rs", 42, "reset");
        assert!(line.ends_with("[session.rs:42] reset"));
    }

    #[test]
    fn test_format_line_includes_prefix() {
        let logger = Logger::new(Some("Cats".to_string()));
        let line = logger.format_line("C:\\src\\main.rs", 7, "hello");
        assert!(line.contains("[Cats][main.rs:7] hello"));
    }

    #[test]
    fn test_repeated_init_keeps_logger() {
        init_logger(None);
        init_logger(Some("Bench".to_string()));
        assert!(LOGGER.get().is_some());
        crate::log!("logged after init");
    }
}
