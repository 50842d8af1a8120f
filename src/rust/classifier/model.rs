use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use super::utils::{at_least, format_entries, mean, percentile, top_n};

/// Number of fixed per-category columns (`SDG_1` .. `SDG_17`).
pub const SDG_COUNT: usize = 17;

/// How many categories end up in the `SDG_Top_3` column.
pub const TOP_N: usize = 3;

/// An SDG as identified by the classifier service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sdg {
    #[serde(deserialize_with = "deserialize_code")]
    pub code: i64,
    pub name: String,
}

/// One (category, score) pair of a prediction set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdgPrediction {
    pub sdg: Sdg,
    pub prediction: f64,
}

impl SdgPrediction {
    pub fn new(code: i64, name: impl Into<String>, prediction: f64) -> Self {
        Self {
            sdg: Sdg { code, name: name.into() },
            prediction,
        }
    }
}

/// Request body sent to the classifier.
#[derive(Debug, Serialize)]
pub(crate) struct ClassifyRequest<'a> {
    pub text: &'a str,
}

/// Response body returned by the classifier. Extra fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct ClassifyResponse {
    pub predictions: Vec<SdgPrediction>,
}

// Some deployments send the goal code as a string ("3"), others as a number.
fn deserialize_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Int(i64),
        Text(String),
    }

    match Code::deserialize(deserializer)? {
        Code::Int(code) => Ok(code),
        Code::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Every derived field of a successfully classified row.
///
/// A row either carries a complete `RowScores` or nothing at all, so partially
/// populated rows cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub struct RowScores {
    /// Score per SDG code, index 0 holds `SDG_1`.
    pub per_sdg: [f64; SDG_COUNT],
    /// Labels scoring at or above the threshold, service order.
    pub above_threshold: Vec<String>,
    pub mean: f64,
    pub percentile_90: f64,
    /// Percentile taken at `threshold * 100`.
    pub threshold_percentile: f64,
    pub top_3: String,
    pub top_mean: String,
    pub top_percentile_90: String,
    pub top_threshold_percentile: String,
}

impl RowScores {
    /// Derives all output fields from one prediction set.
    ///
    /// # Example
    /// ```
    /// use sdg_classify::{RowScores, SdgPrediction};
    ///
    /// let predictions = vec![
    ///     SdgPrediction::new(1, "No poverty", 0.1),
    ///     SdgPrediction::new(2, "Zero hunger", 0.2),
    ///     SdgPrediction::new(3, "Good health", 0.9),
    /// ];
    /// let scores = RowScores::derive(&predictions, 0.5);
    /// assert!((scores.mean - 0.4).abs() < 1e-12);
    /// assert_eq!(scores.above_threshold, vec!["Good health".to_string()]);
    /// ```
    pub fn derive(predictions: &[SdgPrediction], threshold: f64) -> Self {
        let scores: Vec<f64> = predictions.iter().map(|p| p.prediction).collect();
        let mean = mean(&scores);
        let percentile_90 = percentile(&scores, 90.0);
        let threshold_percentile = percentile(&scores, threshold * 100.0);

        let mut per_sdg = [0.0; SDG_COUNT];
        let mut above_threshold = Vec::new();
        for prediction in predictions {
            match sdg_index(prediction.sdg.code) {
                Some(index) => per_sdg[index] = prediction.prediction,
                None => warn!(
                    "Ignoring score for unknown SDG code {} ({})",
                    prediction.sdg.code, prediction.sdg.name
                ),
            }
            if prediction.prediction >= threshold {
                above_threshold.push(prediction.sdg.name.clone());
            }
        }

        Self {
            per_sdg,
            above_threshold,
            mean,
            percentile_90,
            threshold_percentile,
            top_3: format_entries(top_n(predictions, TOP_N)),
            top_mean: format_entries(at_least(predictions, mean)),
            top_percentile_90: format_entries(at_least(predictions, percentile_90)),
            top_threshold_percentile: format_entries(at_least(predictions, threshold_percentile)),
        }
    }

    /// Score for SDG `code`, `None` when the code has no fixed column.
    pub fn score(&self, code: i64) -> Option<f64> {
        sdg_index(code).map(|index| self.per_sdg[index])
    }
}

fn sdg_index(code: i64) -> Option<usize> {
    if (1..=SDG_COUNT as i64).contains(&code) {
        Some(code as usize - 1)
    } else {
        None
    }
}
