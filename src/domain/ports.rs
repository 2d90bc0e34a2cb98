use crate::domain::model::LookupRequest;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    /// Replaces the whole file; readers never see a partial write.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// External key/value configuration, e.g. the host's measure section.
pub trait ConfigSource {
    fn read_string(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn read_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn read_string(&self, key: &str) -> Option<String> {
        (**self).read_string(key)
    }
}

/// The application embedding the lookup.
pub trait Host: Send + Sync {
    /// Runs an opaque host command such as the configured completion action.
    fn execute(&self, command: &str);
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns the raw response body for one lookup.
    async fn fetch(&self, request: &LookupRequest) -> Result<String>;
}
