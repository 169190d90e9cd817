//! Canonical default values shared by the CLI, the pipeline and the store.

pub const DEFAULT_INPUT_DIR: &str = "data/input";
pub const DEFAULT_PROCESSED_DIR: &str = "data/processed";
pub const DEFAULT_FAILED_DIR: &str = "data/failed";
pub const DEFAULT_ARCHIVE_DIR: &str = "data/archive";
pub const DEFAULT_REPORTS_DIR: &str = "reports";
pub const DEFAULT_LOGS_DIR: &str = "logs";

pub const DEFAULT_DATABASE_URL: &str = "sqlite:crm_dev.sqlite3?mode=rwc";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_FILE_TIMEOUT_SECS: u64 = 300;

/// Config file picked up from the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "leadflow.toml";
pub const CONFIG_ENV_VAR: &str = "LEADFLOW_CONFIG";

pub const ALLOWED_INDUSTRIES: &[&str] = &[
    "Technology",
    "Healthcare",
    "Finance",
    "Manufacturing",
    "Retail",
    "Education",
    "Other",
];

pub const VALID_STATUSES: &[&str] = &[
    "New",
    "Contacted",
    "Qualified",
    "Proposal Sent",
    "Converted",
    "Lost",
];

/// Status written to storage when a lead has none.
pub const DEFAULT_LEAD_STATUS: &str = "New";

/// Status that requires a contact person.
pub const CONVERTED_STATUS: &str = "Converted";

pub const VALID_ARTIFACT_PREFIX: &str = "valid_";
pub const INVALID_ARTIFACT_PREFIX: &str = "invalid_";
