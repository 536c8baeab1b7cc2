pub mod loader;
mod schedule_config;
mod time_zone_mode;

pub use loader::{CONFIG_FILE, load_config, parse_config_content};
pub use schedule_config::{DEFAULT_WORKFLOW_PATH, ScheduleConfig, ToolConfig};
pub use time_zone_mode::TimeZoneMode;
