use crate::adapters::LocalStorage;
use crate::config::LookupConfig;
use crate::core::fetch::HttpGeocoder;
use crate::core::normalize::normalize;
use crate::core::parse::parse_response;
use crate::core::writer::ResultWriter;
use crate::core::{ExecuteOutcome, GeocodeResult, Geocoder, Host, LookupRequest, OutputRecord, Storage};
use crate::domain::model::ParseOutcome;
use crate::utils::error::{LookupError, Result};

/// Fetch, parse and persist for one configured measure.
pub struct LookupPipeline<G: Geocoder, S: Storage, H: Host> {
    geocoder: G,
    writer: ResultWriter<S>,
    host: H,
    config: LookupConfig,
    last_city: String,
}

impl<H: Host> LookupPipeline<HttpGeocoder, LocalStorage, H> {
    pub fn from_config(config: LookupConfig, host: H) -> Result<Self> {
        let geocoder = HttpGeocoder::new(&config)?;
        Ok(Self::new(geocoder, LocalStorage::new(), host, config))
    }
}

impl<G: Geocoder, S: Storage, H: Host> LookupPipeline<G, S, H> {
    pub fn new(geocoder: G, storage: S, host: H, config: LookupConfig) -> Self {
        Self {
            geocoder,
            writer: ResultWriter::new(storage),
            host,
            config,
            last_city: String::new(),
        }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Normalized place name of the most recent accepted request.
    pub fn last_city(&self) -> &str {
        &self.last_city
    }

    /// Runs one lookup. The outcome is informational; the host only sees the
    /// results file and the completion action.
    pub async fn execute(&mut self, raw_args: &str) -> ExecuteOutcome {
        let request = match normalize(raw_args) {
            Ok(request) => request,
            Err(e) => {
                tracing::error!("{}", e);
                return ExecuteOutcome::Rejected;
            }
        };
        self.last_city = request.raw_input.clone();

        let record = match self.lookup(&request).await {
            Ok(result) => OutputRecord::success(&result, &self.config.action_targets),
            Err(e) => OutputRecord::error(e.record_message()),
        };

        let written = match self
            .writer
            .write_record(&self.config.results_save, &record)
            .await
        {
            Ok(()) => {
                if let OutputRecord::Success { text, .. } = &record {
                    tracing::debug!("Data successfully saved for city: {}", text);
                }
                true
            }
            Err(e) => {
                tracing::error!(
                    "Failed to write results to '{}': {}",
                    self.config.results_save,
                    e
                );
                false
            }
        };

        // 不論成功或失敗都通知宿主刷新畫面
        if !self.config.on_complete_action.is_empty() {
            self.host.execute(&self.config.on_complete_action);
        }

        ExecuteOutcome::Saved { record, written }
    }

    async fn lookup(&self, request: &LookupRequest) -> Result<GeocodeResult> {
        let body = self.geocoder.fetch(request).await.map_err(|e| {
            tracing::error!("HTTP request failed: {}", e);
            e
        })?;

        match parse_response(&body, &request.raw_input) {
            Ok(ParseOutcome::Found(result)) => Ok(result),
            Ok(ParseOutcome::Empty) => Err(LookupError::NoResultFound {
                city: self.last_city.clone(),
            }),
            Err(e) => {
                tracing::error!("Error processing API response: {}", e);
                Err(LookupError::NoResultFound {
                    city: self.last_city.clone(),
                })
            }
        }
    }
}
