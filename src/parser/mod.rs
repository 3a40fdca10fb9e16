//! Config parser (verb module)
//!
//! Transforms YAML files into `ExplorerConfig`.

use std::path::Path;
use crate::config::ExplorerConfig;
use crate::error::ParseError;

/// Parse and validate a config from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ExplorerConfig, ParseError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
        path: path_str,
        source: e,
    })?;
    parse_str(&contents)
}

/// Parse and validate a config from a YAML string
pub fn parse_str(yaml: &str) -> Result<ExplorerConfig, ParseError> {
    let config: ExplorerConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
