use log::{error, info};
use reqwest::Url;

use super::classifier::SdgClient;
use super::error::ClassifierError;
use crate::endpoints::BuiltinEndpoint;
use crate::runtime::{create_http_client, HttpConfig};

/// A builder for constructing an [`SdgClient`] with a fluent interface.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    endpoint: Option<Url>,
    http_config: HttpConfig,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    ///
    /// # Example
    /// ```
    /// use sdg_classify::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP settings used for every classifier call
    pub fn with_http_config(mut self, config: HttpConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Uses one of the hosted Aurora endpoints
    ///
    /// # Example
    /// ```
    /// use sdg_classify::{ClassifierBuilder, BuiltinEndpoint};
    ///
    /// let builder = ClassifierBuilder::new()
    ///     .with_endpoint(BuiltinEndpoint::AuroraSdgMulti);
    /// assert!(builder.is_ok());
    /// ```
    pub fn with_endpoint(self, endpoint: BuiltinEndpoint) -> Result<Self, ClassifierError> {
        self.with_custom_endpoint(endpoint.url())
    }

    /// Uses an arbitrary classifier URL
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - an error if:
    ///   - an endpoint is already set
    ///   - the URL does not parse or is not http(s)
    pub fn with_custom_endpoint(mut self, url: &str) -> Result<Self, ClassifierError> {
        if self.endpoint.is_some() {
            return Err(ClassifierError::BuildError("Classifier endpoint already set".to_string()));
        }

        let url = Url::parse(url.trim()).map_err(|e| {
            error!("Invalid classifier URL '{}': {}", url, e);
            ClassifierError::ValidationError(format!("Invalid classifier URL '{}': {}", url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClassifierError::ValidationError(format!(
                "Classifier URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        self.endpoint = Some(url);
        Ok(self)
    }

    /// Builds the client
    ///
    /// # Errors
    /// Returns `BuildError` if no endpoint was set or the HTTP client cannot be created.
    pub fn build(self) -> Result<SdgClient, ClassifierError> {
        let endpoint = self.endpoint.ok_or_else(|| {
            ClassifierError::BuildError("No classifier endpoint set".to_string())
        })?;

        let http = create_http_client(&self.http_config)
            .map_err(|e| ClassifierError::BuildError(format!("Failed to create HTTP client: {}", e)))?;

        info!("Classifier client ready for {}", endpoint);
        Ok(SdgClient { endpoint, http })
    }
}
