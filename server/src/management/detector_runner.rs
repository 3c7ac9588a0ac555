use crate::management::detection_parser;
use crate::management::utils::detection_run::{DetectionRun, OutputMode};
use crate::utils::config::Config;
use crate::utils::logging::*;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncReadExt, BufReader};
use tokio::process::{Child, ChildStderr, Command as AsyncCommand};
use tokio::time::{timeout, Instant};

pub struct DetectorRunner;

impl DetectorRunner {
    pub async fn execute(source_path: &Path, mode: OutputMode) -> Result<DetectionRun, LogEntry> {
        let config = Config::now().await;
        #[cfg(target_os = "windows")]
        let python = "python";
        #[cfg(not(target_os = "windows"))]
        let python = "python3";
        let mut process = AsyncCommand::new(python)
            .arg(&config.detector_script)
            .arg("--source")
            .arg(source_path)
            .arg("--weights")
            .arg(&config.detector_model)
            .arg("--conf")
            .arg(config.detector_confidence.to_string())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| error_entry!(DetectionEntry::LaunchError(err)))?;
        let stdout = process.stdout.take()
            .ok_or(error_entry!(DetectionEntry::OutputStreamError))?;
        let stderr = process.stderr.take()
            .ok_or(error_entry!(DetectionEntry::OutputStreamError))?;
        let deadline = Duration::from_secs(config.detector_timeout);
        let started = Instant::now();
        //Both pipes drain concurrently, otherwise a chatty detector fills one and stalls.
        let streams = timeout(deadline, async {
            tokio::join!(detection_parser::read_output(BufReader::new(stdout), mode), Self::read_diagnostic(stderr))
        }).await;
        let (parsed, stderr_text) = match streams {
            Ok((Ok(parsed), stderr_text)) => (parsed, stderr_text),
            Ok((Err(entry), _)) => {
                Self::kill_process(&mut process).await;
                return Err(entry);
            },
            Err(_) => {
                Self::kill_process(&mut process).await;
                return Err(error_entry!(DetectionEntry::DeadlineExceededError(config.detector_timeout)));
            },
        };
        let remain = deadline.saturating_sub(started.elapsed());
        let status = match timeout(remain, process.wait()).await {
            Ok(status) => status.map_err(|err| error_entry!(DetectionEntry::WaitProcessError(err)))?,
            Err(_) => {
                Self::kill_process(&mut process).await;
                return Err(error_entry!(DetectionEntry::DeadlineExceededError(config.detector_timeout)));
            },
        };
        let mut diagnostic = parsed.diagnostic;
        diagnostic.push_str(&stderr_text);
        Ok(DetectionRun {
            mode,
            records: parsed.records,
            raw_output: parsed.raw_text,
            diagnostic,
            exit_code: status.code(),
        })
    }

    async fn read_diagnostic(mut stderr: ChildStderr) -> String {
        let mut text = String::new();
        if let Err(err) = stderr.read_to_string(&mut text).await {
            logging_warning!(DetectionEntry::ReadOutputError(err));
        }
        text
    }

    async fn kill_process(process: &mut Child) {
        if let Err(err) = process.kill().await {
            logging_warning!(SystemEntry::ChildProcessError(err.to_string()));
        }
    }
}
