use crate::utils::config::Config;
use crate::utils::logging::*;
use futures::future::{BoxFuture, FutureExt};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::Metadata;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_stream::wrappers::ReadDirStream;
use tokio_stream::StreamExt;

lazy_static! {
    static ref CLEANUP_MANAGER: RwLock<CleanupManager> = RwLock::new(CleanupManager::new());
}

pub struct CleanupManager {
    join_handles: Vec<JoinHandle<()>>,
    terminate: bool,
}

impl CleanupManager {
    fn new() -> Self {
        Self {
            join_handles: Vec::new(),
            terminate: false,
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Self> {
        CLEANUP_MANAGER.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Self> {
        CLEANUP_MANAGER.write().await
    }

    pub async fn run() {
        Self::initialize().await;
        let sweep_handle = tokio::spawn(async {
            Self::sweep_loop().await
        });
        Self::add_join_handle(sweep_handle).await;
        logging_information!(SystemEntry::Online);
    }

    async fn initialize() {
        logging_information!(SystemEntry::Initializing);
        let config = Config::now().await;
        for rule in &config.cleanup_rules {
            let path = Path::new(&rule.directory);
            if let Err(err) = fs::create_dir_all(path).await {
                logging_critical!(IOEntry::CreateDirectoryError(path.display(), err));
            }
        }
        logging_information!(SystemEntry::InitializeComplete);
    }

    pub async fn terminate() {
        logging_information!(SystemEntry::Terminating);
        let handles = {
            let mut instance = Self::instance_mut().await;
            instance.terminate = true;
            std::mem::take(&mut instance.join_handles)
        };
        for handle in handles {
            if let Err(err) = handle.await {
                logging_error!(SystemEntry::TaskPanickedError(err));
            }
        }
        logging_information!(SystemEntry::TerminateComplete);
    }

    async fn add_join_handle(join_handle: JoinHandle<()>) {
        Self::instance_mut().await.join_handles.push(join_handle);
    }

    async fn sweep_loop() {
        let config = Config::now().await;
        Self::sweep_now().await;
        let mut elapsed = 0_u64;
        while !Self::instance().await.terminate {
            sleep(Duration::from_millis(config.internal_timestamp)).await;
            elapsed += config.internal_timestamp;
            if elapsed < config.cleanup_interval * 1000 {
                continue;
            }
            elapsed = 0_u64;
            Self::sweep_now().await;
        }
    }

    pub async fn sweep_now() {
        logging_information!(SystemEntry::Cleaning);
        let config = Config::now().await;
        for rule in config.cleanup_rules {
            match Regex::new(&rule.pattern) {
                Ok(pattern) => Self::sweep_directory(PathBuf::from(&rule.directory), pattern, rule.max_age).await,
                Err(err) => logging_error!(format!("Invalid cleanup pattern: {}", rule.pattern), format!("Err: {err}")),
            }
        }
        logging_information!(SystemEntry::CleanComplete);
    }

    fn sweep_directory(path: PathBuf, pattern: Regex, max_age: u64) -> BoxFuture<'static, ()> {
        async move {
            let read_dir = match fs::read_dir(&path).await {
                Ok(read_dir) => read_dir,
                Err(err) if err.kind() == ErrorKind::NotFound => return,
                Err(err) => {
                    logging_warning!(IOEntry::ReadDirectoryError(path.display(), err));
                    return;
                },
            };
            let mut entries = ReadDirStream::new(read_dir);
            while let Some(entry) = entries.next().await {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        logging_warning!(IOEntry::ReadDirectoryError(path.display(), err));
                        continue;
                    },
                };
                let entry_path = entry.path();
                let metadata = match entry.metadata().await {
                    Ok(metadata) => metadata,
                    Err(err) if err.kind() == ErrorKind::NotFound => continue,
                    Err(err) => {
                        logging_warning!(IOEntry::ReadMetadataError(entry_path.display(), err));
                        continue;
                    },
                };
                if metadata.is_dir() {
                    Self::sweep_directory(entry_path.clone(), pattern.clone(), max_age).await;
                    Self::remove_directory_if_empty(&entry_path).await;
                } else if Self::name_matches(&pattern, &entry_path) && Self::is_expired(&metadata, max_age) {
                    Self::remove_file(&entry_path).await;
                }
            }
        }.boxed()
    }

    fn name_matches(pattern: &Regex, path: &Path) -> bool {
        match path.file_name() {
            Some(name) => pattern.is_match(&name.to_string_lossy()),
            None => false,
        }
    }

    fn is_expired(metadata: &Metadata, max_age: u64) -> bool {
        match metadata.modified() {
            Ok(modified) => match SystemTime::now().duration_since(modified) {
                Ok(elapsed) => elapsed > Duration::from_secs(max_age),
                Err(_) => false,
            },
            Err(_) => false,
        }
    }

    async fn remove_file(path: &Path) {
        match fs::remove_file(path).await {
            Ok(()) => logging_debug!(format!("Removed expired file {}", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => {},
            Err(err) => logging_warning!(IOEntry::DeleteFileError(path.display(), err)),
        }
    }

    async fn remove_directory_if_empty(path: &Path) {
        let mut read_dir = match fs::read_dir(path).await {
            Ok(read_dir) => read_dir,
            Err(_) => return,
        };
        if let Ok(None) = read_dir.next_entry().await {
            match fs::remove_dir(path).await {
                Ok(()) => {},
                Err(err) if err.kind() == ErrorKind::NotFound => {},
                Err(err) => logging_warning!(IOEntry::DeleteDirectoryError(path.display(), err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn match_all() -> Regex {
        Regex::new(".*").unwrap()
    }

    async fn sweep(root: &Path, pattern: Regex, max_age: u64) {
        CleanupManager::sweep_directory(root.to_path_buf(), pattern, max_age).await;
    }

    #[tokio::test]
    async fn expired_file_is_swept() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("temp_1.jpg");
        fs::write(&file, b"stale").await.unwrap();
        sleep(Duration::from_millis(20)).await;
        sweep(root.path(), match_all(), 0).await;
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn fresh_file_is_retained() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("temp_1.jpg");
        fs::write(&file, b"fresh").await.unwrap();
        sweep(root.path(), match_all(), 3600).await;
        assert!(file.exists());
    }

    #[tokio::test]
    async fn pattern_limits_deletion() {
        let root = TempDir::new().unwrap();
        let matching = root.path().join("temp_1.jpg");
        let unrelated = root.path().join("ledger.txt");
        fs::write(&matching, b"stale").await.unwrap();
        fs::write(&unrelated, b"stale").await.unwrap();
        sleep(Duration::from_millis(20)).await;
        sweep(root.path(), Regex::new("^temp_").unwrap(), 0).await;
        assert!(!matching.exists());
        assert!(unrelated.exists());
    }

    #[tokio::test]
    async fn emptied_subdirectory_is_removed() {
        let root = TempDir::new().unwrap();
        let subdirectory = root.path().join("predict");
        fs::create_dir(&subdirectory).await.unwrap();
        let file = subdirectory.join("temp_1.jpg");
        fs::write(&file, b"stale").await.unwrap();
        sleep(Duration::from_millis(20)).await;
        sweep(root.path(), match_all(), 0).await;
        assert!(!file.exists());
        assert!(!subdirectory.exists());
    }

    #[tokio::test]
    async fn occupied_subdirectory_is_retained() {
        let root = TempDir::new().unwrap();
        let subdirectory = root.path().join("predict");
        fs::create_dir(&subdirectory).await.unwrap();
        let file = subdirectory.join("temp_1.jpg");
        fs::write(&file, b"fresh").await.unwrap();
        sweep(root.path(), match_all(), 3600).await;
        assert!(file.exists());
        assert!(subdirectory.exists());
    }

    #[tokio::test]
    async fn sweep_is_idempotent() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("temp_1.jpg");
        fs::write(&file, b"stale").await.unwrap();
        sleep(Duration::from_millis(20)).await;
        sweep(root.path(), match_all(), 0).await;
        sweep(root.path(), match_all(), 0).await;
        assert!(!file.exists());
        assert!(root.path().exists());
    }
}
