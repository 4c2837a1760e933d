use std::fmt;

use config::{builder::DefaultState, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;

const CONFIG_FILE: &str = "readership";

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    pub labels: String,
    pub word_counts: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub train_fraction: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// File-based settings, read from `readership.toml` in the working
/// directory. CLI flags override whatever is loaded here.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub pipeline: PipelineConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder: ConfigBuilder<DefaultState> = ConfigBuilder::default();

        builder = builder
            .set_default("corpus.labels", "labels.json")?
            .set_default("corpus.word_counts", "word_counts.json")?
            .set_default("pipeline.train_fraction", 0.7)?
            .set_default("logging.level", "info")?
            .add_source(File::with_name(CONFIG_FILE).format(FileFormat::Toml).required(false));

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Settings with the config file absent or unreadable: defaults.
    pub fn load_or_default() -> Self {
        Self::new().unwrap_or_else(|_| Config {
            corpus: CorpusConfig {
                labels: "labels.json".to_string(),
                word_counts: "word_counts.json".to_string(),
            },
            pipeline: PipelineConfig { train_fraction: 0.7 },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        })
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "labels={} word_counts={} train_fraction={} log_level={}",
            self.corpus.labels,
            self.corpus.word_counts,
            self.pipeline.train_fraction,
            self.logging.level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let config = Config::load_or_default();
        assert_eq!(config.pipeline.train_fraction, 0.7);
        assert_eq!(config.logging.level, "info");
        assert!(!config.corpus.labels.is_empty());
    }
}
