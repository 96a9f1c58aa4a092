//! Monitored-resource records and the platform metadata they are labeled with.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::future::Future;
use std::time::Duration;

use super::metricskey::VALUE_UNKNOWN;
use super::view::Tag;

pub mod eventing;
pub mod serving;

/// A Stackdriver monitored resource: a resource type plus its labels.
pub trait MonitoredResource: fmt::Debug + Send + Sync {
    fn monitored_resource(&self) -> (&'static str, BTreeMap<&'static str, String>);
}

/// The resource of metrics that belong to no Knative resource type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

impl MonitoredResource for Global {
    fn monitored_resource(&self) -> (&'static str, BTreeMap<&'static str, String>) {
        ("global", BTreeMap::new())
    }
}

/// Where the reporting process runs, as far as GCP is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcpMetadata {
    pub project: String,
    pub location: String,
    pub cluster: String,
}

impl Default for GcpMetadata {
    fn default() -> Self {
        Self {
            project: VALUE_UNKNOWN.to_owned(),
            location: VALUE_UNKNOWN.to_owned(),
            cluster: VALUE_UNKNOWN.to_owned(),
        }
    }
}

const PROJECT_ID_PATH: &str = "project/numeric-project-id";
const CLUSTER_LOCATION_PATH: &str = "instance/attributes/cluster-location";
const CLUSTER_NAME_PATH: &str = "instance/attributes/cluster-name";

impl GcpMetadata {
    /// Reads project, location and cluster from `source`.
    /// Anything that cannot be read is left as `unknown`.
    pub async fn retrieve<S: MetadataSource>(source: &S) -> Self {
        Self {
            project: lookup(source, PROJECT_ID_PATH).await,
            location: lookup(source, CLUSTER_LOCATION_PATH).await,
            cluster: lookup(source, CLUSTER_NAME_PATH).await,
        }
    }
}

async fn lookup<S: MetadataSource>(source: &S, path: &str) -> String {
    match source.fetch(path).await {
        Ok(value) if !value.trim().is_empty() => value.trim().to_owned(),
        Ok(_) => {
            log::debug!("metadata {path} is empty, using {VALUE_UNKNOWN}");
            VALUE_UNKNOWN.to_owned()
        }
        Err(err) => {
            log::debug!("cannot read metadata {path}, using {VALUE_UNKNOWN}: {err}");
            VALUE_UNKNOWN.to_owned()
        }
    }
}

/// A store of instance metadata, addressed by path.
pub trait MetadataSource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, MetadataError>> + Send;
}

/// The GCE metadata server.
#[derive(Debug, Clone)]
pub struct GceMetadataServer {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl GceMetadataServer {
    pub const DEFAULT_ENDPOINT: &'static str = "http://metadata.google.internal/computeMetadata/v1";

    pub fn new() -> Self {
        Self::with_endpoint(Self::DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            // the metadata server is link-local and never reached through a proxy
            client: reqwest::Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(2),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for GceMetadataServer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataSource for GceMetadataServer {
    async fn fetch(&self, path: &str) -> Result<String, MetadataError> {
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), path);
        let response = self
            .client
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MetadataError::Status {
                path: path.to_owned(),
                status: response.status().as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Errors reading instance metadata.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("metadata request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("metadata server returned {status} for {path}")]
    Status { path: String, status: u16 },
    #[error("no metadata at {0}")]
    NotDefined(String),
}

/// Indexes tags by key. A later tag wins over an earlier one with the same key.
pub fn tags_map(tags: &[Tag]) -> HashMap<&str, &str> {
    tags.iter()
        .map(|tag| (tag.key.as_str(), tag.value.as_str()))
        .collect()
}

/// The value of `key`, or `unknown`.
pub fn value_or_unknown(key: &str, tags: &HashMap<&str, &str>) -> String {
    tags.get(key).copied().unwrap_or(VALUE_UNKNOWN).to_owned()
}

/// Drops the tags whose keys are resource labels, keeping the order of the rest.
pub(crate) fn without_labels(tags: Vec<Tag>, labels: &[&str]) -> Vec<Tag> {
    tags.into_iter()
        .filter(|tag| !labels.contains(&tag.key.as_str()))
        .collect()
}
