use crate::config::LookupConfig;
use crate::domain::model::LookupRequest;
use crate::domain::ports::Geocoder;
use crate::utils::error::{LookupError, Result};
use crate::utils::validation;
use reqwest::Client;
use std::time::Duration;
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// One GET per lookup against an OpenCage-style `geocode/v1/json` endpoint.
pub struct HttpGeocoder {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpGeocoder {
    pub fn new(config: &LookupConfig) -> Result<Self> {
        let client = Client::builder()
            .use_rustls_tls()
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Refuses non-loopback plain-http endpoints so the key never leaves
    /// the machine without TLS.
    pub fn build_url(&self, place: &str) -> Result<Url> {
        validation::validate_secure_url("Endpoint", &self.endpoint)?;
        Url::parse_with_params(&self.endpoint, &[("q", place), ("key", self.api_key.as_str())])
            .map_err(|e| LookupError::InvalidConfigValueError {
                field: "Endpoint".to_string(),
                value: self.endpoint.clone(),
                reason: format!("Invalid URL format: {}", e),
            })
    }
}

#[async_trait::async_trait]
impl Geocoder for HttpGeocoder {
    async fn fetch(&self, request: &LookupRequest) -> Result<String> {
        let url = self.build_url(&request.raw_input)?;

        tracing::debug!("Requesting {} for '{}'", self.endpoint, request.raw_input);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("Response status code: {}", status);

        if !status.is_success() {
            return Err(LookupError::HttpStatus {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
