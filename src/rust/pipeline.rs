use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use log::{debug, info, warn};

use crate::classifier::{ClassifierError, RowScores, SdgPredictor};
use crate::config::Config;
use crate::progress::{Progress, StopHandle};
use crate::table::{output_file_path, OutputColumns, SdgTable};

/// Everything a pass needs besides the predictor.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub text_column: String,
    /// Minimum score for a goal to count as relevant, 0..=1.
    pub threshold: f64,
    /// Pause before every classifier call.
    pub delay: Duration,
}

impl From<&Config> for RunSettings {
    fn from(config: &Config) -> Self {
        Self {
            input: config.input_path(),
            output_dir: config.data_output_folder.clone(),
            text_column: config.text_column.clone(),
            threshold: config.sdg_threshold,
            delay: config.delay(),
        }
    }
}

/// Row counts of one pass over a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCounts {
    pub classified: usize,
    /// Rows without text.
    pub skipped: usize,
    /// Rows whose classifier call failed or came back empty.
    pub failed: usize,
    /// Whether the pass ended because a stop was requested.
    pub stopped: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub total_rows: usize,
    pub counts: RowCounts,
}

/// Classifies every row of `table` in order, one classifier call at a time.
///
/// The stop handle is checked before each row; once set, the remaining rows keep
/// their defaults. `progress` is invoked after every handled row.
pub async fn classify_table<P>(
    table: &mut SdgTable,
    predictor: &P,
    threshold: f64,
    delay: Duration,
    stop: &StopHandle,
    mut progress: Option<&mut (dyn FnMut(Progress) + Send)>,
) -> RowCounts
where
    P: SdgPredictor + ?Sized,
{
    let total_rows = table.len();
    let mut counts = RowCounts::default();

    for row in 0..total_rows {
        if stop.is_stop_requested() {
            info!("Stopping classification after {} of {} rows", row, total_rows);
            counts.stopped = true;
            break;
        }

        match table.text(row).map(str::to_owned) {
            None => {
                debug!("Row {} has no text, skipping", row);
                counts.skipped += 1;
            }
            Some(text) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                match predictor.predict(&text).await {
                    Ok(predictions) if !predictions.is_empty() => {
                        table.set_scores(row, RowScores::derive(&predictions, threshold));
                        counts.classified += 1;
                    }
                    Ok(_) => {
                        warn!("Row {}: classifier returned no predictions", row);
                        counts.failed += 1;
                    }
                    Err(e) => {
                        warn!("Row {}: {}", row, e);
                        counts.failed += 1;
                    }
                }
            }
        }

        if let Some(callback) = progress.as_deref_mut() {
            callback(Progress::new(row + 1, total_rows, delay));
        }
    }

    counts
}

/// Runs a full pass: load the input CSV, classify it, write the timestamped output.
///
/// A stopped pass still writes its output, with unprocessed rows at their defaults.
pub async fn process_csv<P>(
    settings: &RunSettings,
    predictor: &P,
    stop: &StopHandle,
    progress: Option<&mut (dyn FnMut(Progress) + Send)>,
) -> Result<RunSummary, ClassifierError>
where
    P: SdgPredictor + ?Sized,
{
    if !(0.0..=1.0).contains(&settings.threshold) {
        return Err(ClassifierError::ValidationError(format!(
            "Threshold must be between 0 and 1, got {}",
            settings.threshold
        )));
    }

    let mut table = SdgTable::from_path(&settings.input, &settings.text_column)?;
    let total_rows = table.len();
    info!(
        "Classifying {} rows with {} (threshold {}, delay {:?})",
        total_rows,
        predictor.model_id(),
        settings.threshold,
        settings.delay
    );

    let counts = classify_table(
        &mut table,
        predictor,
        settings.threshold,
        settings.delay,
        stop,
        progress,
    )
    .await;

    let columns = OutputColumns::new(settings.threshold, predictor.model_id());
    let output_path = output_file_path(&settings.output_dir, &settings.input, &Local::now());
    table.write_to_path(&output_path, &columns)?;

    info!(
        "Progress saved to {}: {} classified, {} without text, {} failed{}",
        output_path.display(),
        counts.classified,
        counts.skipped,
        counts.failed,
        if counts.stopped { " (stopped early)" } else { "" }
    );

    Ok(RunSummary { output_path, total_rows, counts })
}

/// Convenience wrapper for callers holding a validated [`Config`].
pub async fn process_with_config<P>(
    config: &Config,
    predictor: &P,
    stop: &StopHandle,
    progress: Option<&mut (dyn FnMut(Progress) + Send)>,
) -> Result<RunSummary, ClassifierError>
where
    P: SdgPredictor + ?Sized,
{
    process_csv(&RunSettings::from(config), predictor, stop, progress).await
}
