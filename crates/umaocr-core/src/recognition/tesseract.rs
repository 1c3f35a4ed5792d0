use crate::config::EngineConfig;
use crate::error::UmaError;
use crate::model::{Fragment, Quad};
use crate::recognition::RecognitionEngine;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Recognition backend that shells out to the `tesseract` CLI.
///
/// Word-level TSV output becomes one fragment per word. The child is killed
/// if it runs past `timeout_secs`.
pub struct TesseractEngine {
    executable: PathBuf,
    language: String,
    page_segmentation_mode: u8,
    timeout: Duration,
}

impl TesseractEngine {
    pub fn new(config: &EngineConfig) -> Self {
        let executable = config
            .executable
            .clone()
            .or_else(|| std::env::var_os("TESSERACT_PATH").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("tesseract"));

        TesseractEngine {
            executable,
            language: config.language.clone(),
            page_segmentation_mode: config.page_segmentation_mode,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Check if the configured tesseract binary can be started.
    pub fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn run(&self, mut cmd: Command) -> Result<RunOutput, UmaError> {
        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    UmaError::TesseractNotFound
                } else {
                    UmaError::Recognition(format!("failed to start tesseract: {}", e))
                }
            })?;

        // Drain stderr while the child runs so a chatty child never blocks
        // on a full pipe.
        let stderr_reader = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });
        let collect_stderr = |reader: Option<thread::JoinHandle<Vec<u8>>>| {
            reader
                .and_then(|h| h.join().ok())
                .map(|buf| String::from_utf8_lossy(&buf).to_string())
                .unwrap_or_default()
        };

        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(RunOutput {
                    status,
                    stderr: collect_stderr(stderr_reader),
                });
            }
            if Instant::now() >= deadline {
                tracing::warn!(pid = child.id(), "tesseract timed out, killing");
                let _ = child.kill();
                let _ = child.wait();
                let _ = collect_stderr(stderr_reader);
                return Err(UmaError::RecognitionTimeout {
                    secs: self.timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

struct RunOutput {
    status: ExitStatus,
    stderr: String,
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl RecognitionEngine for TesseractEngine {
    fn recognize(&self, image: &[u8]) -> Result<Vec<Fragment>, UmaError> {
        let mut input = tempfile::NamedTempFile::new()?;
        input.write_all(image)?;
        input.flush()?;

        // Tesseract appends ".tsv" to the output base.
        let output_dir = tempfile::tempdir()?;
        let output_base = output_dir.path().join("ocr");

        let mut cmd = Command::new(&self.executable);
        cmd.arg(input.path())
            .arg(&output_base)
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(self.page_segmentation_mode.to_string())
            .arg("tsv");

        let started = Instant::now();
        let output = self.run(cmd)?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            return Err(UmaError::RecognitionFailed {
                code,
                stderr: output.stderr,
            });
        }

        let tsv_path = output_base.with_extension("tsv");
        let tsv = std::fs::read_to_string(&tsv_path).map_err(|e| {
            UmaError::Recognition(format!("failed to read tesseract output: {}", e))
        })?;

        let fragments = parse_tsv(&tsv);
        tracing::debug!(
            fragments = fragments.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "tesseract finished"
        );
        Ok(fragments)
    }

    fn backend_name(&self) -> &str {
        "tesseract"
    }
}

/// Convert tesseract TSV into word fragments.
///
/// Columns: level, page_num, block_num, par_num, line_num, word_num,
/// left, top, width, height, conf, text. Only level 5 (word) rows with a
/// non-negative confidence and non-empty text are kept.
fn parse_tsv(tsv: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();

    for row in tsv.lines().skip(1) {
        let fields: Vec<&str> = row.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        if fields[0].trim() != "5" {
            continue;
        }

        let text = fields[11].trim();
        if text.is_empty() {
            continue;
        }

        let conf: f32 = match fields[10].trim().parse() {
            Ok(c) if c >= 0.0 => c,
            _ => continue,
        };

        let dims: Option<Vec<f32>> = fields[6..10]
            .iter()
            .map(|f| f.trim().parse::<f32>().ok())
            .collect();
        let Some(dims) = dims else {
            continue;
        };

        fragments.push(Fragment {
            bbox: Quad::from_rect(dims[0], dims[1], dims[2], dims[3]),
            text: text.to_string(),
            confidence: (conf / 100.0).clamp(0.0, 1.0),
        });
    }

    fragments
}
