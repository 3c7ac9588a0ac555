use crate::management::artifact_manager::{ArtifactManager, ArtifactSet};
use crate::management::detector_runner::DetectorRunner;
use crate::management::utils::detection_report::DetectionReport;
use crate::management::utils::detection_run::OutputMode;
use crate::management::weight_extractor::WeightExtractor;
use crate::utils::logging::*;
use base64::engine::general_purpose;
use base64::Engine;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

pub struct DetectionManager;

impl DetectionManager {
    pub async fn detect_weight(data: &[u8], extension: &str) -> Result<DetectionReport, LogEntry> {
        Self::process(data, extension, OutputMode::Rich, true).await
    }

    pub async fn scan_regions(data: &[u8], extension: &str) -> Result<DetectionReport, LogEntry> {
        Self::process(data, extension, OutputMode::Simple, false).await
    }

    async fn process(data: &[u8], extension: &str, mode: OutputMode, with_visualization: bool) -> Result<DetectionReport, LogEntry> {
        let artifact_set = ArtifactManager::acquire(data, extension).await?;
        let result = Self::run_detection(&artifact_set, mode, with_visualization).await;
        //Artifacts are transient, they go away no matter how the run ended.
        ArtifactManager::release(&artifact_set).await;
        result
    }

    async fn run_detection(artifact_set: &ArtifactSet, mode: OutputMode, with_visualization: bool) -> Result<DetectionReport, LogEntry> {
        let run = DetectorRunner::execute(&artifact_set.source_path, mode).await?;
        if !run.success() {
            let debug_info = format!("Diagnostic: {}", run.diagnostic.trim());
            return Err(match run.exit_code {
                Some(code) => error_entry!(DetectionEntry::ProcessError(code), debug_info),
                None => error_entry!(DetectionEntry::ProcessKilledError, debug_info),
            });
        }
        let weight = WeightExtractor::extract(&run);
        logging_information!(DetectionEntry::RunComplete(run.records.len()));
        if weight.is_none() {
            logging_debug!(DetectionEntry::NoWeightRecognized);
        }
        let visualization = if with_visualization {
            Self::read_visualization(&artifact_set.visualization_path).await
        } else {
            None
        };
        Ok(DetectionReport {
            weight,
            detections: run.records,
            visualization,
        })
    }

    async fn read_visualization(path: &Path) -> Option<String> {
        match fs::read(path).await {
            Ok(image_data) => Some(format!("data:image/jpeg;base64,{}", general_purpose::STANDARD.encode(image_data))),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                logging_warning!(IOEntry::ReadFileError(path.display(), err));
                None
            },
        }
    }
}
