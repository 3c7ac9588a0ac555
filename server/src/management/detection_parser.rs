use crate::management::utils::detection_record::DetectionRecord;
use crate::management::utils::detection_run::OutputMode;
use crate::utils::logging::*;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const DATA_SENTINEL: &str = "DATA:";

pub struct ParsedOutput {
    pub records: Vec<DetectionRecord>,
    pub raw_text: String,
    pub diagnostic: String,
}

pub async fn read_output<R: AsyncBufRead + Unpin>(reader: R, mode: OutputMode) -> Result<ParsedOutput, LogEntry> {
    let mut lines = reader.lines();
    let mut records = Vec::new();
    let mut raw_text = String::new();
    let mut diagnostic = String::new();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => return Err(error_entry!(DetectionEntry::ReadOutputError(err))),
        };
        raw_text.push_str(&line);
        raw_text.push('\n');
        match mode {
            OutputMode::Rich => match line.strip_prefix(DATA_SENTINEL) {
                Some(payload) => match DetectionRecord::from_rich_payload(payload) {
                    Some(record) => records.push(record),
                    None => logging_warning!(DetectionEntry::MalformedLineError, format!("Line: {line}")),
                },
                None => {
                    diagnostic.push_str(&line);
                    diagnostic.push('\n');
                },
            },
            OutputMode::Simple => {
                if line.trim().is_empty() {
                    continue;
                }
                match DetectionRecord::from_simple_line(line.trim()) {
                    Some(record) => records.push(record),
                    None => logging_warning!(DetectionEntry::MalformedLineError, format!("Line: {line}")),
                }
            },
        }
    }
    Ok(ParsedOutput {
        records,
        raw_text,
        diagnostic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    async fn parse(bytes: &[u8], mode: OutputMode) -> ParsedOutput {
        read_output(BufReader::new(bytes), mode).await.unwrap()
    }

    #[tokio::test]
    async fn rich_sentinel_lines_become_records() {
        let stdout = b"Loading model\nDATA:0,0.93,10,20,110,220,Brut: 12500 kg\nDATA:1,0.52,0,0,50,60\nDone\n";
        let parsed = parse(stdout, OutputMode::Rich).await;
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].recognized_text.as_deref(), Some("Brut: 12500 kg"));
        assert_eq!(parsed.records[1].recognized_text, None);
    }

    #[tokio::test]
    async fn rich_non_sentinel_lines_feed_the_diagnostic_verbatim() {
        let stdout = b"Loading model\n\nDATA:0,0.93,10,20,110,220\n";
        let parsed = parse(stdout, OutputMode::Rich).await;
        assert_eq!(parsed.diagnostic, "Loading model\n\n");
    }

    #[tokio::test]
    async fn rich_malformed_sentinel_line_is_dropped() {
        let stdout = b"DATA:0,0.93,10\nDATA:0,0.93,10,20,110,220\n";
        let parsed = parse(stdout, OutputMode::Rich).await;
        assert_eq!(parsed.records.len(), 1);
    }

    #[tokio::test]
    async fn simple_lines_parse_without_a_sentinel() {
        let stdout = b"0,0.91,100,200,300,400\n1,0.88\n";
        let parsed = parse(stdout, OutputMode::Simple).await;
        assert_eq!(parsed.records.len(), 2);
        assert!(parsed.records[0].bounding_box.is_some());
        assert_eq!(parsed.records[1].bounding_box, None);
    }

    #[tokio::test]
    async fn simple_malformed_line_is_dropped() {
        let stdout = b"0,0.91,100,200\n1,0.88\n";
        let parsed = parse(stdout, OutputMode::Simple).await;
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].class_id, 1);
    }

    #[tokio::test]
    async fn raw_text_retains_every_line() {
        let stdout = b"Loading model\nDATA:0,0.93,10\n";
        let parsed = parse(stdout, OutputMode::Rich).await;
        assert_eq!(parsed.raw_text, "Loading model\nDATA:0,0.93,10\n");
    }

    #[tokio::test]
    async fn windows_line_endings_are_tolerated() {
        let stdout = b"DATA:0,0.93,10,20,110,220,Brut: 12500 kg\r\n";
        let parsed = parse(stdout, OutputMode::Rich).await;
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].recognized_text.as_deref(), Some("Brut: 12500 kg"));
    }
}
