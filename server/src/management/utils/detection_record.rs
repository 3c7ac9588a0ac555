use crate::management::utils::bounding_box::BoundingBox;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DetectionRecord {
    pub class_id: i32,
    pub confidence: f64,
    pub bounding_box: Option<BoundingBox>,
    pub recognized_text: Option<String>,
}

impl DetectionRecord {
    pub fn from_rich_payload(payload: &str) -> Option<Self> {
        let fields = payload.split(',').collect::<Vec<&str>>();
        if fields.len() < 6 {
            return None;
        }
        let class_id = fields[0].trim().parse().ok()?;
        let confidence = fields[1].trim().parse().ok()?;
        let bounding_box = BoundingBox::from_fields(&fields[2..6])?;
        let recognized_text = fields[6..].join(",");
        let recognized_text = if recognized_text.is_empty() {
            None
        } else {
            Some(recognized_text)
        };
        Some(Self {
            class_id,
            confidence,
            bounding_box: Some(bounding_box),
            recognized_text,
        })
    }

    pub fn from_simple_line(line: &str) -> Option<Self> {
        let fields = line.split(',').collect::<Vec<&str>>();
        let bounding_box = match fields.len() {
            2 => None,
            6 => Some(BoundingBox::from_fields(&fields[2..6])?),
            _ => return None,
        };
        Some(Self {
            class_id: fields[0].trim().parse().ok()?,
            confidence: fields[1].trim().parse().ok()?,
            bounding_box,
            recognized_text: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rich_payload_keeps_commas_inside_recognized_text() {
        let record = DetectionRecord::from_rich_payload("0,0.93,10,20,110,220,Ağırlık: 3750,5 kg").unwrap();
        assert_eq!(record.class_id, 0);
        assert_eq!(record.confidence, 0.93);
        assert_eq!(record.recognized_text.as_deref(), Some("Ağırlık: 3750,5 kg"));
        assert!(record.bounding_box.is_some());
    }

    #[test]
    fn rich_payload_without_text_has_no_recognized_text() {
        let record = DetectionRecord::from_rich_payload("1,0.52,0,0,50,60").unwrap();
        assert_eq!(record.recognized_text, None);
        assert!(record.bounding_box.is_some());
    }

    #[test]
    fn rich_payload_with_missing_fields_is_rejected() {
        assert_eq!(DetectionRecord::from_rich_payload("0,0.93,10,20"), None);
    }

    #[test]
    fn rich_payload_with_unparsable_number_is_rejected() {
        assert_eq!(DetectionRecord::from_rich_payload("zero,0.93,10,20,110,220"), None);
    }

    #[test]
    fn simple_line_accepts_two_fields() {
        let record = DetectionRecord::from_simple_line("3,0.71").unwrap();
        assert_eq!(record.class_id, 3);
        assert_eq!(record.bounding_box, None);
    }

    #[test]
    fn simple_line_accepts_six_fields() {
        let record = DetectionRecord::from_simple_line("3,0.71,5,5,40,40").unwrap();
        assert!(record.bounding_box.is_some());
    }

    #[test]
    fn simple_line_rejects_other_field_counts() {
        assert_eq!(DetectionRecord::from_simple_line("3,0.71,5,5"), None);
        assert_eq!(DetectionRecord::from_simple_line("3,0.71,5,5,40,40,extra"), None);
    }
}
