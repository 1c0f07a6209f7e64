//! Data source model as exchanged with the server.
//!
//! These types mirror the JSON documents of the `datasources` REST collection.
//! View-only decoration used while editing (duration breakdowns, scratch rows)
//! lives in [`record::Record`] and is never serialized to the server.

mod de;
pub mod record;

use serde::{Deserialize, Serialize};

pub use record::{ModifiedTimes, Record};

/// A named, configured integration that fetches external property values
/// into the managed nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    /// Unique identifier, derived from the name at creation and frozen afterwards
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub run_parameters: RunParameters,
    /// Seconds allowed for a full refresh of this source
    pub update_timeout: u64,
    #[serde(default)]
    pub enabled: bool,
}

/// Kind of data source, with its kind-specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "parameters")]
pub enum SourceType {
    #[serde(rename = "HTTP")]
    Http(HttpParameters),
}

impl SourceType {
    /// Type tag as shown to users
    pub fn name(&self) -> &'static str {
        match self {
            SourceType::Http(_) => "HTTP",
        }
    }

    pub fn http(&self) -> &HttpParameters {
        match self {
            SourceType::Http(params) => params,
        }
    }

    pub fn http_mut(&mut self) -> &mut HttpParameters {
        match self {
            SourceType::Http(params) => params,
        }
    }
}

/// Parameters of an HTTP data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpParameters {
    pub url: String,
    /// JSON path applied to the response body
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_check_ssl")]
    pub check_ssl: bool,
    /// Per-request timeout, in seconds
    pub request_timeout: u64,
    #[serde(default)]
    pub request_method: RequestMethod,
    #[serde(default)]
    pub request_mode: RequestMode,
    #[serde(default, deserialize_with = "de::name_values")]
    pub headers: Vec<NameValue>,
    #[serde(default, deserialize_with = "de::name_values")]
    pub params: Vec<NameValue>,
    #[serde(default)]
    pub on_missing: OnMissing,
    pub max_parallel_req: u32,
}

fn default_check_ssl() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequestMethod {
    #[default]
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
        }
    }
}

impl std::str::FromStr for RequestMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(RequestMethod::Get),
            "POST" => Ok(RequestMethod::Post),
            other => Err(format!("unsupported request method '{}'", other)),
        }
    }
}

/// How the server queries the remote endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum RequestMode {
    /// One request per node
    #[default]
    #[serde(rename = "byNode")]
    ByNode,
    /// One request for all nodes, matched back to nodes by `attribute`
    #[serde(rename = "allNodes")]
    AllNodes { path: String, attribute: String },
}

/// Policy applied to a node when the remote endpoint has no value for it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum OnMissing {
    /// Remove the node property
    #[default]
    #[serde(rename = "delete")]
    Delete,
    /// Keep whatever value the node already has
    #[serde(rename = "noChange")]
    NoChange,
    /// Set the property to `value`.
    ///
    /// The server accepts arbitrary JSON here. The client always holds it as
    /// text: structured values are rendered to their JSON form on load and the
    /// server parses the text back when the source is saved.
    #[serde(rename = "defaultValue")]
    DefaultValue {
        #[serde(deserialize_with = "de::json_as_string")]
        value: String,
    },
}

impl OnMissing {
    pub fn name(&self) -> &'static str {
        match self {
            OnMissing::Delete => "delete",
            OnMissing::NoChange => "noChange",
            OnMissing::DefaultValue { .. } => "defaultValue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunParameters {
    #[serde(default)]
    pub on_generation: bool,
    #[serde(default)]
    pub on_new_node: bool,
    pub schedule: Schedule,
}

/// Automatic refresh schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Schedule {
    /// Refresh every `duration` seconds
    #[serde(rename = "scheduled")]
    Scheduled { duration: u64 },
    /// No periodic refresh; `duration` is kept so it survives re-enabling
    #[serde(rename = "notscheduled")]
    NotScheduled { duration: u64 },
}

impl Schedule {
    pub fn duration(&self) -> u64 {
        match self {
            Schedule::Scheduled { duration } | Schedule::NotScheduled { duration } => *duration,
        }
    }

    pub fn set_duration(&mut self, seconds: u64) {
        match self {
            Schedule::Scheduled { duration } | Schedule::NotScheduled { duration } => *duration = seconds,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, Schedule::Scheduled { .. })
    }
}

/// A header or query parameter sent with each request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NameValue {
    pub name: String,
    pub value: String,
}

impl NameValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive name comparison
    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }

    /// Reset to an empty row
    pub fn clear(&mut self) {
        self.name.clear();
        self.value.clear();
    }
}

impl DataSource {
    pub fn http(&self) -> &HttpParameters {
        self.source_type.http()
    }

    pub fn http_mut(&mut self) -> &mut HttpParameters {
        self.source_type.http_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "id": "inventory",
            "name": "Inventory",
            "description": "CMDB lookup",
            "type": {
                "name": "HTTP",
                "parameters": {
                    "url": "https://cmdb.example.com/nodes/${rudder.node.id}",
                    "path": "$.owner",
                    "checkSsl": false,
                    "requestTimeout": 45,
                    "requestMethod": "POST",
                    "requestMode": { "name": "allNodes", "path": "$.nodes", "attribute": "hostname" },
                    "headers": [ { "name": "Accept", "value": "application/json" } ],
                    "params": [],
                    "onMissing": { "name": "defaultValue", "value": { "owner": "nobody" } },
                    "maxParallelReq": 4
                }
            },
            "runParameters": {
                "onGeneration": true,
                "onNewNode": false,
                "schedule": { "type": "notscheduled", "duration": 3600 }
            },
            "updateTimeout": 60,
            "enabled": true
        })
    }

    #[test]
    fn test_deserialize_full_document() {
        let source: DataSource = serde_json::from_value(sample()).unwrap();
        let http = source.http();

        assert_eq!(source.id, "inventory");
        assert_eq!(http.request_method, RequestMethod::Post);
        assert_eq!(
            http.request_mode,
            RequestMode::AllNodes {
                path: "$.nodes".to_string(),
                attribute: "hostname".to_string()
            }
        );
        assert_eq!(http.headers, vec![NameValue::new("Accept", "application/json")]);
        assert_eq!(source.run_parameters.schedule, Schedule::NotScheduled { duration: 3600 });
    }

    #[test]
    fn test_structured_default_value_becomes_text() {
        let source: DataSource = serde_json::from_value(sample()).unwrap();
        assert_eq!(
            source.http().on_missing,
            OnMissing::DefaultValue {
                value: r#"{"owner":"nobody"}"#.to_string()
            }
        );
    }

    #[test]
    fn test_string_default_value_is_kept_verbatim() {
        let mut doc = sample();
        doc["type"]["parameters"]["onMissing"] = json!({ "name": "defaultValue", "value": "unknown" });
        let source: DataSource = serde_json::from_value(doc).unwrap();
        assert_eq!(
            source.http().on_missing,
            OnMissing::DefaultValue {
                value: "unknown".to_string()
            }
        );
    }

    #[test]
    fn test_headers_as_object_are_normalized() {
        let mut doc = sample();
        doc["type"]["parameters"]["headers"] = json!({ "Accept": "text/plain", "X-Retries": 3 });
        let source: DataSource = serde_json::from_value(doc).unwrap();
        assert_eq!(
            source.http().headers,
            vec![NameValue::new("Accept", "text/plain"), NameValue::new("X-Retries", "3")]
        );
    }

    #[test]
    fn test_serialized_shape_matches_server_format() {
        let source: DataSource = serde_json::from_value(sample()).unwrap();
        let value = serde_json::to_value(&source).unwrap();

        assert_eq!(value["type"]["name"], "HTTP");
        assert_eq!(value["type"]["parameters"]["maxParallelReq"], 4);
        assert_eq!(value["runParameters"]["schedule"]["type"], "notscheduled");
        assert_eq!(value["updateTimeout"], 60);
    }

    #[test]
    fn test_same_name_ignores_case() {
        let header = NameValue::new("Content-Type", "x");
        assert!(header.same_name("content-type"));
        assert!(!header.same_name("content"));
    }
}
