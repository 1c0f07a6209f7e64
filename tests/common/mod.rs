#![allow(dead_code)]

use async_trait::async_trait;
use datasources::backend::{ApiError, DatasourceApi};
use datasources::datasource::{
    DataSource, HttpParameters, OnMissing, RequestMethod, RequestMode, RunParameters, Schedule, SourceType,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A request received by [`FakeApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchAll,
    Create(String),
    Update(String),
    UpdatePartial(String, serde_json::Value),
    Delete(String),
}

/// In-memory server that records every call and can be switched to failing.
#[derive(Default)]
pub struct FakeApi {
    sources: Mutex<Vec<DataSource>>,
    calls: Mutex<Vec<Call>>,
    failing: AtomicBool,
}

impl FakeApi {
    pub fn with_sources(sources: Vec<DataSource>) -> Self {
        Self {
            sources: Mutex::new(sources),
            ..Default::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn server_sources(&self) -> Vec<DataSource> {
        self.sources.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            Err(ApiError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DatasourceApi for FakeApi {
    async fn fetch_all(&self) -> Result<Vec<DataSource>, ApiError> {
        self.record(Call::FetchAll)?;
        Ok(self.server_sources())
    }

    async fn create(&self, source: &DataSource) -> Result<(), ApiError> {
        self.record(Call::Create(source.id.clone()))?;
        self.sources.lock().unwrap().push(source.clone());
        Ok(())
    }

    async fn update(&self, id: &str, source: &DataSource) -> Result<(), ApiError> {
        self.record(Call::Update(id.to_string()))?;
        let mut sources = self.sources.lock().unwrap();
        match sources.iter_mut().find(|s| s.id == id) {
            Some(existing) => {
                *existing = source.clone();
                Ok(())
            }
            None => Err(ApiError::Status {
                status: 404,
                message: format!("no data source '{}'", id),
            }),
        }
    }

    async fn update_partial(&self, id: &str, fields: serde_json::Value) -> Result<(), ApiError> {
        self.record(Call::UpdatePartial(id.to_string(), fields.clone()))?;
        let mut sources = self.sources.lock().unwrap();
        if let Some(existing) = sources.iter_mut().find(|s| s.id == id) {
            if let Some(enabled) = fields.get("enabled").and_then(|v| v.as_bool()) {
                existing.enabled = enabled;
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.record(Call::Delete(id.to_string()))?;
        self.sources.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}

/// A saved HTTP data source
pub fn source(id: &str, name: &str) -> DataSource {
    DataSource {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        source_type: SourceType::Http(HttpParameters {
            url: format!("https://cmdb.example.com/{}", id),
            path: "$.value".to_string(),
            check_ssl: true,
            request_timeout: 30,
            request_method: RequestMethod::Get,
            request_mode: RequestMode::ByNode,
            headers: Vec::new(),
            params: Vec::new(),
            on_missing: OnMissing::Delete,
            max_parallel_req: 10,
        }),
        run_parameters: RunParameters {
            on_generation: true,
            on_new_node: true,
            schedule: Schedule::Scheduled { duration: 3600 },
        },
        update_timeout: 60,
        enabled: true,
    }
}
