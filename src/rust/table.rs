//! CSV input/output for a classification pass.
//!
//! The input table is kept as raw records. Derived values live next to it as one
//! `Option<RowScores>` per row and are only turned into columns when the table is
//! written, so a row is either fully classified or left at the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use csv::{ReaderBuilder, StringRecord, Writer};
use log::info;

use crate::classifier::{ClassifierError, RowScores, SDG_COUNT, TOP_N};

const DEFAULT_SCORE: f64 = 0.0;

/// Names of the columns appended to the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputColumns {
    certainty: String,
    threshold_percentile: String,
    top_threshold_percentile: String,
    model_used: String,
}

impl OutputColumns {
    /// Column names for a pass run with `threshold`, tagged with `model_used`.
    ///
    /// The percentage in the names is `threshold * 100` truncated toward zero, the
    /// naming existing output files use, so `0.29` yields `SDG_28%_certainty`.
    pub fn new(threshold: f64, model_used: impl Into<String>) -> Self {
        let pct = (threshold * 100.0).trunc() as i64;
        Self {
            certainty: format!("SDG_{}%_certainty", pct),
            threshold_percentile: format!("SDG_{}%_threshold_percentile", pct),
            top_threshold_percentile: format!("SDG_Top_{}th_Percentile", pct),
            model_used: model_used.into(),
        }
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = (1..=SDG_COUNT).map(|code| format!("SDG_{}", code)).collect();
        headers.push(self.certainty.clone());
        headers.push("SDG_AVG".to_string());
        headers.push("SDG_90th_percentile".to_string());
        headers.push(self.threshold_percentile.clone());
        headers.push(format!("SDG_Top_{}", TOP_N));
        headers.push("SDG_Top_AVG".to_string());
        headers.push("SDG_Top_90th_percentile".to_string());
        headers.push(self.top_threshold_percentile.clone());
        headers.push("Classifier_Model_Used".to_string());
        headers
    }

    /// Cell values for one row, in `headers()` order.
    pub fn render(&self, scores: Option<&RowScores>) -> Vec<String> {
        let mut cells = Vec::with_capacity(SDG_COUNT + 9);
        match scores {
            Some(scores) => {
                cells.extend(scores.per_sdg.iter().map(|score| format_float(*score)));
                cells.push(scores.above_threshold.join("|"));
                cells.push(format_float(scores.mean));
                cells.push(format_float(scores.percentile_90));
                cells.push(format_float(scores.threshold_percentile));
                cells.push(scores.top_3.clone());
                cells.push(scores.top_mean.clone());
                cells.push(scores.top_percentile_90.clone());
                cells.push(scores.top_threshold_percentile.clone());
            }
            None => {
                cells.extend((0..SDG_COUNT).map(|_| format_float(DEFAULT_SCORE)));
                cells.push(String::new());
                cells.push(format_float(DEFAULT_SCORE));
                cells.push(format_float(DEFAULT_SCORE));
                cells.push(format_float(DEFAULT_SCORE));
                cells.extend((0..4).map(|_| String::new()));
            }
        }
        cells.push(self.model_used.clone());
        cells
    }
}

// Debug keeps a trailing ".0" on whole numbers, like the pandas output users know.
fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// An input CSV plus the derived scores gathered for its rows.
#[derive(Debug)]
pub struct SdgTable {
    headers: StringRecord,
    records: Vec<StringRecord>,
    text_index: usize,
    scores: Vec<Option<RowScores>>,
}

impl SdgTable {
    pub fn from_path(path: impl AsRef<Path>, text_column: &str) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|e| {
            ClassifierError::IoError(io::Error::new(
                e.kind(),
                format!("Failed to open {}: {}", path.display(), e),
            ))
        })?;
        let table = Self::from_reader(file, text_column)?;
        info!("Loaded {} rows from {}", table.len(), path.display());
        Ok(table)
    }

    /// Reads a table from any CSV source. Rows may be shorter or longer than the header.
    pub fn from_reader<R: io::Read>(reader: R, text_column: &str) -> Result<Self, ClassifierError> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();
        let text_index = headers
            .iter()
            .position(|header| header.trim() == text_column)
            .ok_or_else(|| {
                ClassifierError::ValidationError(format!(
                    "Text column '{}' not found, available columns: {}",
                    text_column,
                    headers.iter().collect::<Vec<_>>().join(", ")
                ))
            })?;

        let records = reader.records().collect::<Result<Vec<_>, _>>()?;
        let scores = vec![None; records.len()];
        Ok(Self { headers, records, text_index, scores })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The row's text as stored in the file, `None` when missing or blank.
    pub fn text(&self, row: usize) -> Option<&str> {
        self.records
            .get(row)?
            .get(self.text_index)
            .filter(|text| !text.trim().is_empty())
    }

    pub fn scores(&self, row: usize) -> Option<&RowScores> {
        self.scores.get(row)?.as_ref()
    }

    pub fn set_scores(&mut self, row: usize, scores: RowScores) {
        if let Some(slot) = self.scores.get_mut(row) {
            *slot = Some(scores);
        }
    }

    pub fn classified_rows(&self) -> usize {
        self.scores.iter().filter(|scores| scores.is_some()).count()
    }

    /// Writes the original columns followed by the derived ones.
    pub fn write<W: io::Write>(&self, writer: W, columns: &OutputColumns) -> Result<(), ClassifierError> {
        let mut writer = Writer::from_writer(writer);
        let width = self.headers.len();

        let mut header_row: Vec<String> = self.headers.iter().map(str::to_string).collect();
        header_row.extend(columns.headers());
        writer.write_record(&header_row)?;

        for (record, scores) in self.records.iter().zip(&self.scores) {
            let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
            row.resize(width, String::new());
            row.extend(columns.render(scores.as_ref()));
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn write_to_path(&self, path: impl AsRef<Path>, columns: &OutputColumns) -> Result<(), ClassifierError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(path)?;
        self.write(io::BufWriter::new(file), columns)?;
        info!("Wrote {} rows to {}", self.len(), path.display());
        Ok(())
    }
}

/// `<output_dir>/<input stem>_sdg_<YYYYmmdd_HHMMSS>.csv`
pub fn output_file_path(output_dir: &Path, input: &Path, timestamp: &DateTime<Local>) -> PathBuf {
    let base = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{}_sdg_{}.csv", base, timestamp.format("%Y%m%d_%H%M%S")))
}
