use crate::management::utils::detection_record::DetectionRecord;
use crate::management::utils::detection_run::{DetectionRun, OutputMode};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DECIMAL_PATTERN: Regex = Regex::new(r"\d+(?:[.,]\d+)?").expect("Fail compile decimal pattern.");
    static ref DIGIT_RUN_PATTERN: Regex = Regex::new(r"\d{4,6}").expect("Fail compile digit run pattern.");
}

pub struct WeightExtractor;

impl WeightExtractor {
    pub fn extract(run: &DetectionRun) -> Option<f64> {
        let best = Self::select_best(&run.records)?;
        match run.mode {
            OutputMode::Rich => best.recognized_text.as_deref().and_then(Self::weight_from_text),
            OutputMode::Simple => Self::weight_from_digits(&run.raw_output),
        }
    }

    //Ties keep the earliest record.
    fn select_best(records: &[DetectionRecord]) -> Option<&DetectionRecord> {
        let mut best: Option<&DetectionRecord> = None;
        for record in records {
            match best {
                Some(current) if record.confidence <= current.confidence => {},
                _ => best = Some(record),
            }
        }
        best
    }

    fn weight_from_text(text: &str) -> Option<f64> {
        let value = DECIMAL_PATTERN.find(text)?.as_str().replace(',', ".");
        value.parse::<f64>().ok()
    }

    fn weight_from_digits(raw_output: &str) -> Option<f64> {
        DIGIT_RUN_PATTERN.find(raw_output)?.as_str().parse::<f64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::management::utils::bounding_box::BoundingBox;

    fn record(confidence: f64, recognized_text: Option<&str>) -> DetectionRecord {
        DetectionRecord {
            class_id: 0,
            confidence,
            bounding_box: Some(BoundingBox {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 10.0,
            }),
            recognized_text: recognized_text.map(str::to_string),
        }
    }

    fn rich_run(records: Vec<DetectionRecord>) -> DetectionRun {
        DetectionRun {
            mode: OutputMode::Rich,
            records,
            raw_output: String::new(),
            diagnostic: String::new(),
            exit_code: Some(0),
        }
    }

    fn simple_run(records: Vec<DetectionRecord>, raw_output: &str) -> DetectionRun {
        DetectionRun {
            mode: OutputMode::Simple,
            records,
            raw_output: raw_output.to_string(),
            diagnostic: String::new(),
            exit_code: Some(0),
        }
    }

    #[test]
    fn highest_confidence_record_supplies_the_weight() {
        let run = rich_run(vec![
            record(0.4, Some("1000 kg")),
            record(0.9, Some("2000 kg")),
        ]);
        assert_eq!(WeightExtractor::extract(&run), Some(2000.0));
    }

    #[test]
    fn confidence_tie_keeps_the_earlier_record() {
        let run = rich_run(vec![
            record(0.4, Some("1000 kg")),
            record(0.9, Some("2000 kg")),
            record(0.9, Some("3000 kg")),
        ]);
        assert_eq!(WeightExtractor::extract(&run), Some(2000.0));
    }

    #[test]
    fn decimal_comma_is_normalized() {
        let run = rich_run(vec![record(0.8, Some("Ağırlık: 3750,5 kg"))]);
        assert_eq!(WeightExtractor::extract(&run), Some(3750.5));
    }

    #[test]
    fn text_without_digits_yields_no_weight() {
        let run = rich_run(vec![record(0.8, Some("no digits here"))]);
        assert_eq!(WeightExtractor::extract(&run), None);
    }

    #[test]
    fn best_record_without_text_yields_no_weight() {
        let run = rich_run(vec![
            record(0.9, None),
            record(0.4, Some("1000 kg")),
        ]);
        assert_eq!(WeightExtractor::extract(&run), None);
    }

    #[test]
    fn empty_run_yields_no_weight() {
        let run = rich_run(Vec::new());
        assert_eq!(WeightExtractor::extract(&run), None);
    }

    #[test]
    fn simple_mode_scans_the_raw_output_for_a_digit_run() {
        let raw = "0,0.91,100,200,300,400\n1,0.88,34210,250,420,330\n";
        let run = simple_run(vec![record(0.91, None)], raw);
        assert_eq!(WeightExtractor::extract(&run), Some(34210.0));
    }

    #[test]
    fn short_digit_runs_are_ignored_in_simple_mode() {
        let raw = "1,0.88\n2,0.91\n";
        let run = simple_run(vec![record(0.88, None)], raw);
        assert_eq!(WeightExtractor::extract(&run), None);
    }

    #[test]
    fn simple_mode_without_records_yields_no_weight() {
        let run = simple_run(Vec::new(), "34210");
        assert_eq!(WeightExtractor::extract(&run), None);
    }
}
