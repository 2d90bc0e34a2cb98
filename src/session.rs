//! Host-facing lifecycle: one pipeline per host-assigned session.
//!
//! The host drives everything synchronously (initialize, reload, execute,
//! update, finalize). The registry owns the async runtime the pipelines run
//! on and serializes lookups that write to the same results file.

use crate::adapters::LocalStorage;
use crate::config::LookupConfig;
use crate::core::fetch::HttpGeocoder;
use crate::core::pipeline::LookupPipeline;
use crate::core::{ConfigSource, ExecuteOutcome, Host};
use crate::utils::error::{LookupError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::{Builder, Runtime};

pub type SessionId = u64;

type HttpPipeline<H> = LookupPipeline<HttpGeocoder, LocalStorage, H>;

struct Session<H: Host> {
    pipeline: Option<HttpPipeline<H>>,
}

pub struct SessionRegistry<H: Host + Clone> {
    runtime: Runtime,
    host: H,
    next_id: AtomicU64,
    sessions: Mutex<HashMap<SessionId, Arc<tokio::sync::Mutex<Session<H>>>>>,
    path_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl<H: Host + Clone> SessionRegistry<H> {
    pub fn new(host: H) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        Ok(Self {
            runtime,
            host,
            next_id: AtomicU64::new(1),
            sessions: Mutex::new(HashMap::new()),
            path_locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn initialize(&self) -> SessionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(tokio::sync::Mutex::new(Session { pipeline: None })));
        tracing::info!("Session {} initialized", id);
        id
    }

    /// (Re)reads the configuration. Missing keys are tolerated; the session
    /// keeps working and lookups fail when they run.
    pub fn reload(&self, id: SessionId, source: &impl ConfigSource) -> Result<()> {
        let session = self.session(id)?;
        let config = LookupConfig::load(source);

        let built = {
            let _runtime = self.runtime.enter();
            LookupPipeline::from_config(config, self.host.clone())
        };

        let mut session = self.runtime.block_on(session.lock());
        match built {
            Ok(pipeline) => {
                session.pipeline = Some(pipeline);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Session {}: failed to build HTTP client: {}", id, e);
                session.pipeline = None;
                Err(e)
            }
        }
    }

    pub fn execute(&self, id: SessionId, args: &str) -> Result<ExecuteOutcome> {
        let session = self.session(id)?;
        self.runtime.block_on(self.execute_locked(id, &session, args))
    }

    async fn execute_locked(
        &self,
        id: SessionId,
        session: &tokio::sync::Mutex<Session<H>>,
        args: &str,
    ) -> Result<ExecuteOutcome> {
        let mut session = session.lock().await;
        let pipeline = session.pipeline.as_mut().ok_or_else(|| {
            tracing::error!("Session {}: execute called before configuration", id);
            LookupError::ConfigError {
                message: format!("session {} has not been configured", id),
            }
        })?;

        // 同一個結果檔一次只跑一個查詢
        let path_lock = self.path_lock(&pipeline.config().results_save);
        let _guard = path_lock.lock().await;
        Ok(pipeline.execute(args).await)
    }

    /// Polling hook. Results are delivered through the file, so there is no value.
    pub fn update(&self, id: SessionId) -> Result<f64> {
        self.session(id)?;
        Ok(0.0)
    }

    pub fn finalize(&self, id: SessionId) -> Result<()> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .map(|_| tracing::info!("Session {} finalized", id))
            .ok_or(LookupError::UnknownSession { id })
    }

    pub fn session_count(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn session(&self, id: SessionId) -> Result<Arc<tokio::sync::Mutex<Session<H>>>> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(LookupError::UnknownSession { id })
    }

    fn path_lock(&self, path: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.path_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(path.to_string())
            .or_default()
            .clone()
    }
}
