//! Processes one hand-off payload against the configured store and runtime.
//!
//! Usage:
//!
//! ```text
//! worker <payload-path>
//! ```
//!
//! The JSON payload at `payload-path` must serialize a hand-off message:
//!
//! ```json
//! {
//!   "task_id": "3f6c0a9e-93a1-4bc8-b2fb-5a3f6f6f2f10",
//!   "description": "Find me a landscaper in Charlotte under $300"
//! }
//! ```
//!
//! Configuration comes from the environment (`DATABASE_URL`,
//! `AGENT_RUNTIME_ENDPOINT`, `AGENT_RUNTIME_ID`, optional
//! `AGENT_TIMEOUT_SECS`); missing required values abort startup. The exit
//! code reflects the worker reply: zero for 2xx, non-zero otherwise.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;

use majordomo::config::ServiceConfig;
use majordomo::gateway::{WorkerGateway, WorkerResponse};
use majordomo::task::adapters::postgres::PostgresTaskStore;
use majordomo::task::adapters::runtime::HttpAgentRuntime;
use majordomo::task::services::ProcessingService;

/// Errors that abort the worker before a payload is processed.
#[derive(Debug, Error)]
enum WorkerSetupError {
    #[error("usage: worker <payload-path>")]
    MissingPayloadPath,

    #[error("could not read payload at {path}: {source}")]
    PayloadRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("payload is not valid JSON: {0}")]
    PayloadParse(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] majordomo::config::ConfigError),

    #[error("could not build database pool: {0}")]
    Pool(String),

    #[error("could not build agent runtime client: {0}")]
    Runtime(String),

    #[error("could not build async runtime: {0}")]
    AsyncRuntime(#[from] std::io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(response) => {
            tracing::info!(status = response.status_code, body = %response.body, "worker reply");
            if response.status_code < 400 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "worker aborted");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<WorkerResponse, WorkerSetupError> {
    let payload_path = std::env::args()
        .nth(1)
        .ok_or(WorkerSetupError::MissingPayloadPath)?;
    let raw_payload =
        std::fs::read_to_string(&payload_path).map_err(|source| WorkerSetupError::PayloadRead {
            path: payload_path.clone(),
            source,
        })?;
    let payload: serde_json::Value = serde_json::from_str(&raw_payload)?;

    let config = ServiceConfig::from_env()?;
    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    let pool = Pool::builder()
        .build(manager)
        .map_err(|err| WorkerSetupError::Pool(err.to_string()))?;
    let store = Arc::new(PostgresTaskStore::new(pool));
    let agent = Arc::new(
        HttpAgentRuntime::new(
            &config.agent.endpoint,
            &config.agent.runtime_id,
            config.agent.timeout,
        )
        .map_err(|err| WorkerSetupError::Runtime(err.to_string()))?,
    );
    let gateway = WorkerGateway::new(ProcessingService::new(
        store,
        agent,
        Arc::new(DefaultClock),
    ));

    let runtime = Builder::new_multi_thread().enable_all().build()?;
    Ok(runtime.block_on(gateway.handle(payload)))
}
