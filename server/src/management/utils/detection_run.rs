use crate::management::utils::detection_record::DetectionRecord;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum OutputMode {
    Rich,
    Simple,
}

#[derive(Debug, Clone)]
pub struct DetectionRun {
    pub mode: OutputMode,
    pub records: Vec<DetectionRecord>,
    pub raw_output: String,
    pub diagnostic: String,
    pub exit_code: Option<i32>,
}

impl DetectionRun {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
