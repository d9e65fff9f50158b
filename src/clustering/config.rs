use crate::clustering::{ClusteringParams, EngineKind};
use crate::core::{ClusteringError, ClusteringResult};
use crate::distances::DistanceKind;
use log::{error, LevelFilter};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct ClusteringParamsConfig {
    pub number_clusters: usize,
    #[serde(default = "default_engine")]
    pub engine: String, // "Reference" or "Optimized"
    #[serde(default = "default_distance_metric")]
    pub distance_metric: String, // "Euclidean" or "SquaredEuclidean"
    #[serde(default)]
    pub record_history: bool,
}

fn default_engine() -> String {
    "Reference".to_string()
}

fn default_distance_metric() -> String {
    "Euclidean".to_string()
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String, // Log level, e.g., "info", "debug", "warn", "error"
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub clustering_params: ClusteringParamsConfig,
    pub data_file: Option<String>, // Path to a whitespace separated sample file
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Clustering Parameters:")?;
        writeln!(
            f,
            "    Number of Clusters: {}",
            self.clustering_params.number_clusters
        )?;
        writeln!(f, "    Engine: {}", self.clustering_params.engine)?;
        writeln!(
            f,
            "    Distance Metric: {}",
            self.clustering_params.distance_metric
        )?;
        writeln!(
            f,
            "    Record History: {}",
            self.clustering_params.record_history
        )?;
        if let Some(data_file) = &self.data_file {
            writeln!(f, "  Data File: {}", data_file)?;
        } else {
            writeln!(f, "  Data File: None")?;
        }
        writeln!(f, "  Logging:")?;
        writeln!(f, "    Level: {}", self.logging.level)?;
        Ok(())
    }
}

impl Config {
    /// Reads the YAML configuration file and returns a `Config` instance.
    pub fn from_file<P: AsRef<Path>>(file_path: P) -> ClusteringResult<Self> {
        let file_content = std::fs::read_to_string(file_path)?;
        Self::from_yaml_str(&file_content)
    }

    pub fn from_yaml_str(content: &str) -> ClusteringResult<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClusteringResult<()> {
        if EngineKind::parse(&self.clustering_params.engine).is_none() {
            return Err(ClusteringError::Config(format!(
                "Unsupported engine: {}",
                self.clustering_params.engine
            )));
        }

        if DistanceKind::parse(&self.clustering_params.distance_metric).is_none() {
            return Err(ClusteringError::Config(format!(
                "Unsupported distance metric: {}",
                self.clustering_params.distance_metric
            )));
        }

        if self.clustering_params.number_clusters == 0 {
            return Err(ClusteringError::Config(
                "number_clusters must be greater than 0".to_string(),
            ));
        }

        self.level_filter().map(|_| ())
    }

    /// Converts `ClusteringParamsConfig` into `ClusteringParams`.
    pub fn to_clustering_params(&self) -> ClusteringResult<ClusteringParams> {
        let engine = EngineKind::parse(&self.clustering_params.engine).ok_or_else(|| {
            ClusteringError::Config(format!(
                "Unsupported engine: {}",
                self.clustering_params.engine
            ))
        })?;
        let distance =
            DistanceKind::parse(&self.clustering_params.distance_metric).ok_or_else(|| {
                ClusteringError::Config(format!(
                    "Unsupported distance metric: {}",
                    self.clustering_params.distance_metric
                ))
            })?;

        Ok(ClusteringParams {
            number_clusters: self.clustering_params.number_clusters,
            engine,
            distance,
            record_history: self.clustering_params.record_history,
        })
    }

    pub fn level_filter(&self) -> ClusteringResult<LevelFilter> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => Ok(LevelFilter::Trace),
            "debug" => Ok(LevelFilter::Debug),
            "info" => Ok(LevelFilter::Info),
            "warn" => Ok(LevelFilter::Warn),
            "error" => Ok(LevelFilter::Error),
            "off" => Ok(LevelFilter::Off),
            _ => Err(ClusteringError::Config(format!(
                "Unsupported log level: {}",
                self.logging.level
            ))),
        }
    }

    /// Sets up logging based on the logging level in the configuration.
    pub fn setup_logging(&self) {
        let level_filter = self.level_filter().unwrap_or(LevelFilter::Info);

        if let Err(e) = env_logger::Builder::new()
            .filter_level(level_filter)
            .try_init()
        {
            error!("Failed to initialize logger: {}", e);
        }
    }
}
