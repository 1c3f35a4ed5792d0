use std::path::{Path, PathBuf};
use umaocr_core::annotate::annotate;
use umaocr_core::error::UmaError;
use umaocr_core::model::Column;
use umaocr_core::recognition::{parse_fragments_json, RecognitionEngine};
use umaocr_core::recognition::tesseract::TesseractEngine;
use umaocr_core::session::{PassSummary, Session};
use umaocr_core::source::{FileImageSource, ImageSource};

use super::{effective_config, is_fragment_file};
use crate::output;
use crate::OutputFormat;

pub fn run(
    inputs: Vec<PathBuf>,
    config_file: Option<PathBuf>,
    sort: Option<&str>,
    descending: bool,
    output_format: OutputFormat,
    annotate_dir: Option<PathBuf>,
    show_stats: bool,
) -> Result<(), UmaError> {
    let config = effective_config(config_file.as_deref())?;
    let sort_column = sort.map(str::parse::<Column>).transpose()?;
    let engine = TesseractEngine::new(&config.engine);
    let mut session = Session::new(config);

    if let Some(ref dir) = annotate_dir {
        std::fs::create_dir_all(dir)?;
    }

    let outcome = paste_all(
        &mut session,
        &engine,
        &inputs,
        annotate_dir.as_deref(),
        show_stats,
    );

    if let Some(column) = sort_column {
        session.sort_by(column, descending);
    }

    let table = session.table();
    match output_format {
        OutputFormat::Table => output::table::print(table),
        OutputFormat::Json => output::json::print(table.records())?,
        OutputFormat::Csv => println!("{}", table.rows_as_csv()),
        OutputFormat::Points => println!("{}", table.value_column()),
    }

    if let Some(e) = outcome.aborted {
        return Err(e);
    }
    if outcome.failed > 0 {
        return Err(UmaError::Recognition(format!(
            "{} of {} input(s) could not be recognized",
            outcome.failed,
            inputs.len()
        )));
    }

    Ok(())
}

/// Per-input results of one scan.
#[derive(Debug, Default)]
struct ScanOutcome {
    failed: usize,
    /// Set when an error makes every remaining input pointless.
    aborted: Option<UmaError>,
}

/// Paste each input in order. A bad input is reported and counted, and the
/// rows of every other input still reach the table.
fn paste_all(
    session: &mut Session,
    engine: &dyn RecognitionEngine,
    inputs: &[PathBuf],
    annotate_dir: Option<&Path>,
    show_stats: bool,
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for input in inputs {
        match paste_input(session, engine, input) {
            Ok((summary, image)) => {
                if let (Some(dir), Some(bytes)) = (annotate_dir, &image) {
                    let max_height = session.config().display_max_height;
                    if let Err(e) = write_preview(dir, input, bytes, &summary, max_height) {
                        tracing::warn!(input = %input.display(), error = %e, "preview not written");
                    }
                }
                if show_stats {
                    output::table::print_stats(input, &summary);
                }
            }
            Err(UmaError::NoInput) => {
                eprintln!("warning: no image at {}, skipped", input.display());
            }
            Err(UmaError::TesseractNotFound) => {
                outcome.aborted = Some(UmaError::TesseractNotFound);
                break;
            }
            Err(e) => {
                eprintln!("warning: {}: {}", input.display(), e);
                outcome.failed += 1;
            }
        }
    }
    outcome
}

/// Run one input as a paste. Returns the image bytes for image inputs so a
/// preview can be drawn from them.
fn paste_input(
    session: &mut Session,
    engine: &dyn RecognitionEngine,
    input: &Path,
) -> Result<(PassSummary, Option<Vec<u8>>), UmaError> {
    if is_fragment_file(input) {
        let bytes = std::fs::read(input)?;
        let fragments = parse_fragments_json(&bytes)?;
        return Ok((session.paste_fragments(fragments), None));
    }

    let image = FileImageSource::new(input).acquire()?;
    let summary = session.paste(image.as_deref(), engine)?;
    Ok((summary, image))
}

fn write_preview(
    dir: &Path,
    input: &Path,
    image: &[u8],
    summary: &PassSummary,
    max_height: u32,
) -> Result<(), UmaError> {
    let kept: Vec<_> = summary
        .lines
        .iter()
        .flat_map(|l| l.fragments.iter().cloned())
        .collect();
    let preview = annotate(image, &kept, max_height)?;

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| format!("pass{}", summary.pass_number));
    let path = dir.join(format!("{stem}.annotated.png"));
    preview.save(&path)?;
    tracing::info!(path = %path.display(), "wrote preview");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use umaocr_core::config::PipelineConfig;
    use umaocr_core::model::{Fragment, Quad};

    struct MockEngine(Result<Vec<Fragment>, fn() -> UmaError>);

    impl RecognitionEngine for MockEngine {
        fn recognize(&self, _image: &[u8]) -> Result<Vec<Fragment>, UmaError> {
            match &self.0 {
                Ok(fragments) => Ok(fragments.clone()),
                Err(make) => Err(make()),
            }
        }

        fn backend_name(&self) -> &str {
            "mock"
        }
    }

    fn score_row(name: &str, points: &str) -> Vec<Fragment> {
        [(name, 20.0), (points, 200.0), ("pts", 320.0)]
            .into_iter()
            .map(|(text, x)| Fragment {
                bbox: Quad::from_rect(x, 90.0, 80.0, 20.0),
                text: text.to_string(),
                confidence: 0.9,
            })
            .collect()
    }

    fn write_fragments(dir: &Path, file: &str, fragments: &[Fragment]) -> PathBuf {
        let path = dir.join(file);
        std::fs::write(&path, serde_json::to_vec(fragments).unwrap()).unwrap();
        path
    }

    fn names(session: &Session) -> Vec<(u32, String)> {
        session
            .table()
            .records()
            .iter()
            .map(|r| (r.seq, r.name.clone()))
            .collect()
    }

    #[test]
    fn test_bad_input_between_good_ones_keeps_their_rows() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_fragments(dir.path(), "first.json", &score_row("Alice", "1,200"));
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, b"{ not fragments").unwrap();
        let last = write_fragments(dir.path(), "last.json", &score_row("Bob", "900"));

        let mut session = Session::new(PipelineConfig::default());
        let engine = MockEngine(Ok(Vec::new()));
        let outcome = paste_all(&mut session, &engine, &[first, bad, last], None, false);

        assert_eq!(outcome.failed, 1);
        assert!(outcome.aborted.is_none());
        assert_eq!(
            names(&session),
            vec![(1, "Alice".to_string()), (2, "Bob".to_string())]
        );
    }

    #[test]
    fn test_unreadable_input_is_counted_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file.
        let unreadable = dir.path().join("folder.png");
        std::fs::create_dir(&unreadable).unwrap();
        let good = write_fragments(dir.path(), "good.json", &score_row("Alice", "5"));

        let mut session = Session::new(PipelineConfig::default());
        let engine = MockEngine(Ok(score_row("Never", "1")));
        let outcome = paste_all(&mut session, &engine, &[unreadable, good], None, false);

        assert_eq!(outcome.failed, 1);
        assert_eq!(names(&session), vec![(1, "Alice".to_string())]);
    }

    #[test]
    fn test_preview_failure_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let previews = dir.path().join("previews");
        std::fs::create_dir(&previews).unwrap();
        // Bytes the image decoder cannot read.
        let shot = dir.path().join("shot.tif");
        std::fs::write(&shot, b"definitely not an image").unwrap();

        let mut session = Session::new(PipelineConfig::default());
        let engine = MockEngine(Ok(score_row("Alice", "1,234")));
        let outcome = paste_all(&mut session, &engine, &[shot], Some(&previews), false);

        assert_eq!(outcome.failed, 0);
        assert!(outcome.aborted.is_none());
        assert_eq!(session.table().rows_as_csv(), "Alice,1234");
        assert!(!previews.join("shot.annotated.png").exists());
    }

    #[test]
    fn test_missing_image_is_skipped_without_failing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let good = write_fragments(dir.path(), "good.json", &score_row("Alice", "5"));

        let mut session = Session::new(PipelineConfig::default());
        let engine = MockEngine(Ok(Vec::new()));
        let outcome = paste_all(&mut session, &engine, &[missing, good], None, false);

        assert_eq!(outcome.failed, 0);
        assert_eq!(session.table().len(), 1);
    }

    #[test]
    fn test_missing_tesseract_stops_but_keeps_earlier_rows() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_fragments(dir.path(), "first.json", &score_row("Alice", "5"));
        let shot = dir.path().join("shot.png");
        std::fs::write(&shot, b"png bytes").unwrap();
        let last = write_fragments(dir.path(), "last.json", &score_row("Bob", "6"));

        let mut session = Session::new(PipelineConfig::default());
        let engine = MockEngine(Err(|| UmaError::TesseractNotFound));
        let outcome = paste_all(&mut session, &engine, &[first, shot, last], None, false);

        assert!(matches!(outcome.aborted, Some(UmaError::TesseractNotFound)));
        assert_eq!(names(&session), vec![(1, "Alice".to_string())]);
    }
}
