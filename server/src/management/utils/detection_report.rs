use crate::management::utils::detection_record::DetectionRecord;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct DetectionReport {
    pub weight: Option<f64>,
    pub detections: Vec<DetectionRecord>,
    pub visualization: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_missing_weight_as_null() {
        let report = DetectionReport {
            weight: None,
            detections: Vec::new(),
            visualization: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["weight"].is_null());
        assert!(json["visualization"].is_null());
        assert!(json["detections"].as_array().is_some_and(|list| list.is_empty()));
    }

    #[test]
    fn report_serializes_recognized_weight() {
        let report = DetectionReport {
            weight: Some(3750.5),
            detections: Vec::new(),
            visualization: Some("data:image/jpeg;base64,AAAA".to_string()),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["weight"], 3750.5);
        assert_eq!(json["visualization"], "data:image/jpeg;base64,AAAA");
    }
}
