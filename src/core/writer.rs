use crate::domain::model::{ActionTargets, GeocodeResult, OutputRecord};
use crate::domain::ports::Storage;
use crate::utils::error::Result;

/// Writes the single result the display layer renders.
pub struct ResultWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> ResultWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn write_success(
        &self,
        path: &str,
        result: &GeocodeResult,
        targets: &ActionTargets,
    ) -> Result<()> {
        self.write_record(path, &OutputRecord::success(result, targets))
            .await
    }

    pub async fn write_error(&self, path: &str, message: &str) -> Result<()> {
        self.write_record(path, &OutputRecord::error(message)).await
    }

    pub async fn write_record(&self, path: &str, record: &OutputRecord) -> Result<()> {
        let content = record.render();
        tracing::debug!("Writing {} bytes to {}", content.len(), path);
        self.storage.write_file(path, content.as_bytes()).await
    }
}
