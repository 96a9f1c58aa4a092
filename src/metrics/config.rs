//! Metrics exporter configuration, read from the observability ConfigMap.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use k8s_openapi::api::core::v1::ConfigMap;

use super::join_path;
use super::stackdriver::CUSTOM_METRIC_TYPE_PREFIX;

/// Name of the ConfigMap holding observability settings.
pub const CONFIG_MAP_NAME: &str = "config-observability";

pub const BACKEND_DESTINATION_KEY: &str = "metrics.backend-destination";
pub const REPORTING_PERIOD_KEY: &str = "metrics.reporting-period-seconds";
pub const STACKDRIVER_PROJECT_ID_KEY: &str = "metrics.stackdriver-project-id";
pub const ALLOW_STACKDRIVER_CUSTOM_METRICS_KEY: &str = "metrics.allow-stackdriver-custom-metrics";

const DEFAULT_PROMETHEUS_PORT: u16 = 9090;
const MIN_PROMETHEUS_PORT: u16 = 1024;
const DEFAULT_PROMETHEUS_REPORTING_PERIOD: Duration = Duration::from_secs(5);
const DEFAULT_STACKDRIVER_REPORTING_PERIOD: Duration = Duration::from_secs(60);

/// Where metrics are sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BackendDestination {
    #[default]
    Prometheus,
    Stackdriver,
}

impl BackendDestination {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendDestination::Prometheus => "prometheus",
            BackendDestination::Stackdriver => "stackdriver",
        }
    }

    fn default_reporting_period(&self) -> Duration {
        match self {
            BackendDestination::Prometheus => DEFAULT_PROMETHEUS_REPORTING_PERIOD,
            BackendDestination::Stackdriver => DEFAULT_STACKDRIVER_REPORTING_PERIOD,
        }
    }
}

impl fmt::Display for BackendDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a component passes in to get its exporter configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExporterOptions {
    /// Metric domain, e.g. `knative.dev/serving`.
    pub domain: String,
    /// Reporting component, e.g. `activator`.
    pub component: String,
    /// Port of the Prometheus scrape endpoint; 9090 when unset.
    pub prometheus_port: Option<u16>,
    /// Data of the observability ConfigMap.
    pub config_map: BTreeMap<String, String>,
}

impl ExporterOptions {
    pub fn from_config_map(
        domain: impl Into<String>,
        component: impl Into<String>,
        config_map: &ConfigMap,
    ) -> Self {
        Self {
            domain: domain.into(),
            component: component.into(),
            prometheus_port: None,
            config_map: config_map.data.clone().unwrap_or_default(),
        }
    }
}

/// A validated exporter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    pub domain: String,
    pub component: String,
    pub backend_destination: BackendDestination,
    pub reporting_period: Duration,
    pub prometheus_port: u16,
    pub stackdriver_project_id: String,
    /// Whether metrics outside the Knative resource types are sent to Stackdriver.
    pub allow_stackdriver_custom_metrics: bool,
    /// `<domain>/<component>`, the prefix of built-in metric types.
    pub stackdriver_metric_type_prefix: String,
    /// `custom.googleapis.com/knative.dev/<component>`, the prefix of custom metric types.
    pub stackdriver_custom_metric_type_prefix: String,
}

impl MetricsConfig {
    pub fn from_options(options: &ExporterOptions) -> Result<Self, ConfigError> {
        if options.domain.is_empty() {
            return Err(ConfigError::EmptyDomain);
        }
        if options.component.is_empty() {
            return Err(ConfigError::EmptyComponent);
        }
        if options.config_map.is_empty() {
            return Err(ConfigError::EmptyConfigMap);
        }
        let data = &options.config_map;

        let backend_destination = match data.get(BACKEND_DESTINATION_KEY).map(String::as_str) {
            None | Some("") | Some("prometheus") => BackendDestination::Prometheus,
            Some("stackdriver") => BackendDestination::Stackdriver,
            Some(other) => return Err(ConfigError::UnsupportedBackend(other.to_owned())),
        };

        let reporting_period = match data.get(REPORTING_PERIOD_KEY).map(|v| v.trim()) {
            None | Some("") => backend_destination.default_reporting_period(),
            Some(raw) => match raw.parse::<u64>() {
                Ok(seconds) if seconds > 0 => Duration::from_secs(seconds),
                _ => return Err(ConfigError::InvalidReportingPeriod(raw.to_owned())),
            },
        };

        let allow_stackdriver_custom_metrics =
            match data.get(ALLOW_STACKDRIVER_CUSTOM_METRICS_KEY).map(|v| v.trim()) {
                None | Some("") => false,
                Some(raw) => raw
                    .parse::<bool>()
                    .map_err(|_| ConfigError::InvalidAllowCustomMetrics(raw.to_owned()))?,
            };

        let prometheus_port = options.prometheus_port.unwrap_or(DEFAULT_PROMETHEUS_PORT);
        if prometheus_port < MIN_PROMETHEUS_PORT {
            return Err(ConfigError::InvalidPrometheusPort(prometheus_port));
        }

        let config = Self {
            domain: options.domain.clone(),
            component: options.component.clone(),
            backend_destination,
            reporting_period,
            prometheus_port,
            stackdriver_project_id: data
                .get(STACKDRIVER_PROJECT_ID_KEY)
                .cloned()
                .unwrap_or_default(),
            allow_stackdriver_custom_metrics,
            stackdriver_metric_type_prefix: join_path(&[&options.domain, &options.component]),
            stackdriver_custom_metric_type_prefix: join_path(&[
                CUSTOM_METRIC_TYPE_PREFIX,
                &options.component,
            ]),
        };
        log::debug!("metrics config for {}/{}: {config:?}", config.domain, config.component);
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("metrics domain cannot be empty")]
    EmptyDomain,
    #[error("metrics component name cannot be empty")]
    EmptyComponent,
    #[error("metrics config map cannot be empty")]
    EmptyConfigMap,
    #[error("unsupported metrics backend value {0:?}")]
    UnsupportedBackend(String),
    #[error("invalid metrics.reporting-period-seconds value {0:?}")]
    InvalidReportingPeriod(String),
    #[error("invalid metrics.allow-stackdriver-custom-metrics value {0:?}")]
    InvalidAllowCustomMetrics(String),
    #[error("invalid port {0}, should be between 1024 and 65535")]
    InvalidPrometheusPort(u16),
}
