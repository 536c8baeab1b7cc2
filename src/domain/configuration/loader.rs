//! Scheduler configuration loading.

use std::path::Path;

use crate::domain::{AppError, ToolConfig};
use crate::ports::WorkflowFilesystem;

/// Location of the optional config file, relative to the repository root.
pub const CONFIG_FILE: &str = ".github/ghsched.toml";

/// Load `.github/ghsched.toml`, falling back to defaults when it is absent.
pub fn load_config(fs: &impl WorkflowFilesystem) -> Result<ToolConfig, AppError> {
    let path = Path::new(CONFIG_FILE);
    if !fs.file_exists(path) {
        return Ok(ToolConfig::default());
    }

    let content = fs.read_file(path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<ToolConfig, AppError> {
    let config: ToolConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
