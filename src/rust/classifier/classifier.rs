use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};

use super::error::ClassifierError;
use super::model::{ClassifyRequest, ClassifyResponse, SdgPrediction};

/// Anything that can turn a piece of text into an SDG prediction set.
///
/// The row loop only talks to this trait, so it can be driven by [`SdgClient`]
/// or by an in-memory stand-in.
#[async_trait]
pub trait SdgPredictor: Send + Sync {
    /// Classifies `text`, returning scores in the order the backend produced them.
    async fn predict(&self, text: &str) -> Result<Vec<SdgPrediction>, ClassifierError>;

    /// Identifies the model in the `Classifier_Model_Used` column.
    fn model_id(&self) -> String;
}

/// HTTP client for an Aurora-style SDG classifier.
///
/// `SdgClient` is cheap to clone and safe to share across tasks; the underlying
/// `reqwest::Client` pools connections.
///
/// ```rust,no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use sdg_classify::{SdgClient, SdgPredictor, BuiltinEndpoint};
///
/// let client = SdgClient::builder()
///     .with_endpoint(BuiltinEndpoint::AuroraSdgMulti)?
///     .build()?;
///
/// for prediction in client.predict("Access to clean water in rural areas").await? {
///     println!("{} {:.2}", prediction.sdg.name, prediction.prediction);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SdgClient {
    pub(crate) endpoint: Url,
    pub(crate) http: Client,
}

impl SdgClient {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SdgPredictor for SdgClient {
    async fn predict(&self, text: &str) -> Result<Vec<SdgPrediction>, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::ValidationError("Input text cannot be empty".into()));
        }

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&ClassifyRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Classifier answered {} for {} chars of text", status, text.len());
            return Err(ClassifierError::StatusError(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: ClassifyResponse = serde_json::from_slice(&body)
            .map_err(|e| ClassifierError::ResponseError(format!("Invalid classifier response: {}", e)))?;

        debug!("Classifier returned {} predictions", parsed.predictions.len());
        Ok(parsed.predictions)
    }

    fn model_id(&self) -> String {
        self.endpoint.to_string()
    }
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<SdgClient>();
    }
};
