use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// DATA SOURCES
// ═══════════════════════════════════════════════════════════════════════════

/// Prometheus data source attached to a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prometheus {
    pub url: String,
    /// Scrape refresh interval in seconds, 0 means the backend default
    pub refresh_interval: u64,
    pub tls_skip_verify: bool,
    pub basic_auth: Option<BasicAuth>,
    pub custom_headers: Vec<HttpHeader>,
    pub extra_selector: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicAuth {
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpHeader {
    pub key: String,
    pub value: String,
}

// ═══════════════════════════════════════════════════════════════════════════
// APPLICATION TYPES
// ═══════════════════════════════════════════════════════════════════════════

/// Classification tag detected for an application
///
/// Tags this enum does not list are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    Postgres,
    Mysql,
    Mongodb,
    Mongos,
    Redis,
    Keydb,
    Memcached,
    Aerospike,
    Elasticsearch,
    Opensearch,
    Cassandra,
    Clickhouse,
    Zookeeper,
    Foundationdb,
    Couchbase,
    Kafka,
    Rabbitmq,
    Nats,
    Nginx,
    Envoy,
    Haproxy,
    Golang,
    Java,
    Php,
    Python,
    Nodejs,
    Ruby,
    Dotnet,
    #[serde(rename = "victoria-metrics")]
    VictoriaMetrics,
    Prometheus,
    #[serde(untagged)]
    Other(String),
}

impl ApplicationType {
    pub const KNOWN: [ApplicationType; 30] = [
        ApplicationType::Postgres,
        ApplicationType::Mysql,
        ApplicationType::Mongodb,
        ApplicationType::Mongos,
        ApplicationType::Redis,
        ApplicationType::Keydb,
        ApplicationType::Memcached,
        ApplicationType::Aerospike,
        ApplicationType::Elasticsearch,
        ApplicationType::Opensearch,
        ApplicationType::Cassandra,
        ApplicationType::Clickhouse,
        ApplicationType::Zookeeper,
        ApplicationType::Foundationdb,
        ApplicationType::Couchbase,
        ApplicationType::Kafka,
        ApplicationType::Rabbitmq,
        ApplicationType::Nats,
        ApplicationType::Nginx,
        ApplicationType::Envoy,
        ApplicationType::Haproxy,
        ApplicationType::Golang,
        ApplicationType::Java,
        ApplicationType::Php,
        ApplicationType::Python,
        ApplicationType::Nodejs,
        ApplicationType::Ruby,
        ApplicationType::Dotnet,
        ApplicationType::VictoriaMetrics,
        ApplicationType::Prometheus,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ApplicationType::Postgres => "postgres",
            ApplicationType::Mysql => "mysql",
            ApplicationType::Mongodb => "mongodb",
            ApplicationType::Mongos => "mongos",
            ApplicationType::Redis => "redis",
            ApplicationType::Keydb => "keydb",
            ApplicationType::Memcached => "memcached",
            ApplicationType::Aerospike => "aerospike",
            ApplicationType::Elasticsearch => "elasticsearch",
            ApplicationType::Opensearch => "opensearch",
            ApplicationType::Cassandra => "cassandra",
            ApplicationType::Clickhouse => "clickhouse",
            ApplicationType::Zookeeper => "zookeeper",
            ApplicationType::Foundationdb => "foundationdb",
            ApplicationType::Couchbase => "couchbase",
            ApplicationType::Kafka => "kafka",
            ApplicationType::Rabbitmq => "rabbitmq",
            ApplicationType::Nats => "nats",
            ApplicationType::Nginx => "nginx",
            ApplicationType::Envoy => "envoy",
            ApplicationType::Haproxy => "haproxy",
            ApplicationType::Golang => "golang",
            ApplicationType::Java => "java",
            ApplicationType::Php => "php",
            ApplicationType::Python => "python",
            ApplicationType::Nodejs => "nodejs",
            ApplicationType::Ruby => "ruby",
            ApplicationType::Dotnet => "dotnet",
            ApplicationType::VictoriaMetrics => "victoria-metrics",
            ApplicationType::Prometheus => "prometheus",
            ApplicationType::Other(tag) => tag,
        }
    }

    /// Storage engines: databases, caches and coordination stores
    pub fn is_database(&self) -> bool {
        matches!(
            self,
            ApplicationType::Postgres
                | ApplicationType::Mysql
                | ApplicationType::Mongodb
                | ApplicationType::Mongos
                | ApplicationType::Redis
                | ApplicationType::Keydb
                | ApplicationType::Memcached
                | ApplicationType::Aerospike
                | ApplicationType::Elasticsearch
                | ApplicationType::Opensearch
                | ApplicationType::Cassandra
                | ApplicationType::Clickhouse
                | ApplicationType::Zookeeper
                | ApplicationType::Foundationdb
                | ApplicationType::Couchbase
        )
    }
}

impl std::fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ApplicationType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ApplicationType::KNOWN
            .iter()
            .find(|t| t.as_str() == s)
            .cloned()
            .unwrap_or_else(|| ApplicationType::Other(s.to_string())))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CHECK CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════

/// Availability SLO: ratio of failed requests to total requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfigSloAvailability {
    pub custom: bool,
    pub total_requests_query: String,
    pub failed_requests_query: String,
    pub objective_percentage: f32,
}

/// Latency SLO: share of requests served within the objective histogram bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfigSloLatency {
    pub custom: bool,
    pub histogram_query: String,
    pub objective_bucket: String,
    pub objective_percentage: f32,
}

/// Three-level threshold hierarchy: global, then project, then application.
///
/// An absent override inherits the value of the next broader level.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThresholdOverrides {
    pub global: f64,
    pub project: Option<f64>,
    pub application: Option<f64>,
}

impl ThresholdOverrides {
    /// The most specific threshold that is set
    pub fn effective(&self) -> f64 {
        self.application.or(self.project).unwrap_or(self.global)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_type_wire_names() {
        for t in ApplicationType::KNOWN {
            let encoded = serde_json::to_string(&t).unwrap();
            assert_eq!(encoded, format!("\"{}\"", t.as_str()));
            assert_eq!(t.as_str().parse::<ApplicationType>().unwrap(), t);
        }
    }

    #[test]
    fn test_unlisted_application_type_round_trips() {
        let t: ApplicationType = serde_json::from_str("\"custom-app\"").unwrap();
        assert_eq!(t, ApplicationType::Other("custom-app".to_string()));
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"custom-app\"");
        assert_eq!(t.to_string(), "custom-app");
        assert_eq!("custom-app".parse::<ApplicationType>().unwrap(), t);
    }

    #[test]
    fn test_application_type_rejects_non_string() {
        assert!(serde_json::from_str::<ApplicationType>("42").is_err());
    }

    #[test]
    fn test_is_database() {
        assert!(ApplicationType::Postgres.is_database());
        assert!(ApplicationType::Redis.is_database());
        assert!(!ApplicationType::Nginx.is_database());
        assert!(!ApplicationType::Other("postgres-fork".to_string()).is_database());
    }

    #[test]
    fn test_prometheus_defaults_missing_fields() {
        let p: Prometheus = serde_json::from_str(r#"{"url":"http://prom:9090"}"#).unwrap();
        assert_eq!(p.url, "http://prom:9090");
        assert_eq!(p.refresh_interval, 0);
        assert!(p.basic_auth.is_none());
        assert!(p.custom_headers.is_empty());
    }

    #[test]
    fn test_threshold_override_resolution() {
        let global_only = ThresholdOverrides { global: 0.5, project: None, application: None };
        assert_eq!(global_only.effective(), 0.5);

        let project = ThresholdOverrides { global: 0.5, project: Some(0.7), application: None };
        assert_eq!(project.effective(), 0.7);

        let application = ThresholdOverrides {
            global: 0.5,
            project: Some(0.7),
            application: Some(0.9),
        };
        assert_eq!(application.effective(), 0.9);

        // zero is a real override, not "unset"
        let zero = ThresholdOverrides { global: 0.5, project: Some(0.0), application: None };
        assert_eq!(zero.effective(), 0.0);
    }
}
