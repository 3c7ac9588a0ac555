use crate::utils::config::Config;
use crate::utils::logging::*;
use chrono::Local;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

pub struct ArtifactSet {
    pub source_path: PathBuf,
    pub visualization_path: PathBuf,
}

pub struct ArtifactManager;

impl ArtifactManager {
    pub async fn initialize() {
        logging_information!(SystemEntry::Initializing);
        let config = Config::now().await;
        for folder in [&config.upload_folder, &config.visualization_folder] {
            let path = Path::new(folder);
            if let Err(err) = fs::create_dir_all(path).await {
                logging_critical!(IOEntry::CreateDirectoryError(path.display(), err));
            }
        }
        logging_information!(SystemEntry::InitializeComplete);
    }

    pub async fn acquire(data: &[u8], extension: &str) -> Result<ArtifactSet, LogEntry> {
        let config = Config::now().await;
        Self::acquire_into(Path::new(&config.upload_folder), Path::new(&config.visualization_folder), data, extension).await
    }

    async fn acquire_into(upload_folder: &Path, visualization_folder: &Path, data: &[u8], extension: &str) -> Result<ArtifactSet, LogEntry> {
        let file_name = format!("temp_{}-{}.{}", Local::now().timestamp_millis(), Uuid::new_v4(), extension);
        let source_path = upload_folder.join(&file_name);
        let visualization_path = visualization_folder.join(&file_name);
        if let Err(err) = fs::write(&source_path, data).await {
            let entry = error_entry!(IOEntry::WriteFileError(source_path.display(), err));
            Self::delete_artifact(&source_path).await;
            return Err(entry);
        }
        Ok(ArtifactSet {
            source_path,
            visualization_path,
        })
    }

    pub async fn release(artifact_set: &ArtifactSet) {
        Self::delete_artifact(&artifact_set.source_path).await;
        Self::delete_artifact(&artifact_set.visualization_path).await;
    }

    async fn delete_artifact(path: &Path) {
        match fs::remove_file(path).await {
            Ok(()) => {},
            Err(err) if err.kind() == ErrorKind::NotFound => {},
            Err(err) => logging_warning!(IOEntry::DeleteFileError(path.display(), err)),
        }
    }
}
