pub use crate::{logging_alert, logging_console, logging_critical, logging_debug, logging_emergency, logging_entry, logging_error, logging_information, logging_warning};
pub use common::utils::log_entry::detection::DetectionEntry;
pub use common::utils::log_entry::invoice::InvoiceEntry;
pub use common::utils::log_entry::io::IOEntry;
pub use common::utils::log_entry::network::NetworkEntry;
pub use common::utils::log_entry::system::SystemEntry;
pub use common::utils::logging::*;
pub use common::{alert_entry, critical_entry, debug_entry, emergency_entry, error_entry, information_entry, warning_entry};

use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

lazy_static! {
    static ref LOGGER: RwLock<Logger> = RwLock::new(Logger::new());
}

pub struct Logger {
    system_log: Vec<LogEntry>,
}

impl Logger {
    fn new() -> Self {
        let mut system_log = Vec::new();
        let log_entry = LogEntry::new(LogLevel::Information, "Logger", "Online now", "");
        system_log.push(log_entry);
        Self {
            system_log,
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Logger> {
        LOGGER.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Logger> {
        LOGGER.write().await
    }

    pub async fn add_system_log<T: Into<String>, U: Into<String>, V: Into<String>>(level: LogLevel, position: T, message: U, debug_info: V) {
        let log_entry = LogEntry::new(level, position, message, debug_info);
        Self::logging_console(log_entry.clone());
        let mut logger = Self::instance_mut().await;
        logger.system_log.push(log_entry);
    }

    pub async fn add_system_log_entry(log_entry: LogEntry) {
        Self::logging_console(log_entry.clone());
        let mut logger = Self::instance_mut().await;
        logger.system_log.push(log_entry);
    }

    pub fn logging_console(log_entry: LogEntry) {
        println!("{}", log_entry.to_colored_string());
    }

    pub async fn get_system_logs() -> Vec<LogEntry> {
        Self::instance().await.system_log.clone()
    }

    pub async fn get_system_logs_since(time: DateTime<Local>) -> Vec<LogEntry> {
        let logger = Self::instance().await;
        let index = logger.system_log.binary_search_by(|entry| entry.timestamp.cmp(&time)).unwrap_or_else(|x| x);
        logger.system_log[index..].to_vec()
    }

    pub async fn get_latest_system_logs(count: usize) -> Vec<LogEntry> {
        let logger = Self::instance().await;
        let skip = logger.system_log.len().saturating_sub(count);
        logger.system_log[skip..].to_vec()
    }
}

#[macro_export]
macro_rules! logging_debug {
    ($message:expr) => {
        Logger::add_system_log(LogLevel::Debug, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        Logger::add_system_log(LogLevel::Debug, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_information {
    ($message:expr) => {
        Logger::add_system_log(LogLevel::Information, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        Logger::add_system_log(LogLevel::Information, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_warning {
    ($message:expr) => {
        Logger::add_system_log(LogLevel::Warning, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        Logger::add_system_log(LogLevel::Warning, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_error {
    ($message:expr) => {
        Logger::add_system_log(LogLevel::Error, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        Logger::add_system_log(LogLevel::Error, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_critical {
    ($message:expr) => {
        Logger::add_system_log(LogLevel::Critical, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        Logger::add_system_log(LogLevel::Critical, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_alert {
    ($message:expr) => {
        Logger::add_system_log(LogLevel::Alert, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        Logger::add_system_log(LogLevel::Alert, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_emergency {
    ($message:expr) => {
        Logger::add_system_log(LogLevel::Emergency, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($message:expr, $debug_info:expr) => {
        Logger::add_system_log(LogLevel::Emergency, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_entry {
    ($entry:expr) => {
        Logger::add_system_log_entry($entry).await
    };
}

#[macro_export]
macro_rules! logging_console {
    ($entry:expr) => {
        Logger::logging_console($entry)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[tokio::test]
    async fn recorded_entries_are_retrievable() {
        Logger::add_system_log(LogLevel::Debug, "Test", "Weighbridge entry", "").await;
        let logs = Logger::get_system_logs().await;
        assert!(logs.iter().any(|entry| entry.message == "Weighbridge entry"));
    }

    #[tokio::test]
    async fn future_cutoff_returns_no_entries() {
        Logger::add_system_log(LogLevel::Debug, "Test", "Old entry", "").await;
        let cutoff = Local::now() + TimeDelta::hours(1);
        assert!(Logger::get_system_logs_since(cutoff).await.is_empty());
    }

    #[tokio::test]
    async fn past_cutoff_returns_every_entry() {
        let cutoff = Local::now() - TimeDelta::hours(1);
        let all = Logger::get_system_logs().await;
        let since = Logger::get_system_logs_since(cutoff).await;
        assert!(since.len() >= all.len());
    }

    #[tokio::test]
    async fn latest_cut_is_bounded_by_count() {
        Logger::add_system_log(LogLevel::Debug, "Test", "Tail entry", "").await;
        assert_eq!(Logger::get_latest_system_logs(1).await.len(), 1);
        assert!(!Logger::get_latest_system_logs(usize::MAX).await.is_empty());
    }
}
