pub const APIMETA_CONFIG: &str = "apimeta.yaml";
pub const GLOBAL_CONFIG_RELATIVE: &str = "apimeta/config.yaml";
pub const CONFIG_PATH_ENV: &str = "APIMETA_CONFIG_PATH";
pub const METADATA_FILE_ENV: &str = "APIMETA_METADATA_FILE";
pub const LOG_ENV: &str = "APIMETA_LOG";

pub const DEFAULT_COMMAND_PREFIX: &str = "atlas api";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
