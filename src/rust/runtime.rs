use std::time::Duration;

use reqwest::Client;

#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole-request timeout. `None` keeps the client default.
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// The public classifier has been served with certificates that do not verify.
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("sdg-classify/{}", env!("CARGO_PKG_VERSION")),
            accept_invalid_certs: true,
        }
    }
}

pub fn create_http_client(config: &HttpConfig) -> reqwest::Result<Client> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.clone())
        .danger_accept_invalid_certs(config.accept_invalid_certs);

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}
