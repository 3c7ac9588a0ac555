pub mod bounding_box;
pub mod cleanup_rule;
pub mod detection_record;
pub mod detection_report;
pub mod detection_run;
pub mod invoice;
