// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Roster";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "roster";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".roster";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "roster.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "ROSTER_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "ROSTER_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "ROSTER_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "ROSTER_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "ROSTER_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "ROSTER_DATA_DIR";

/// Environment variable for the SQLite pool size
pub const ENV_DB_MAX_CONNECTIONS: &str = "ROSTER_DB_MAX_CONNECTIONS";

// =============================================================================
// Environment Variables - Query
// =============================================================================

/// Environment variable for the default listing page size
pub const ENV_DEFAULT_PAGE_SIZE: &str = "ROSTER_DEFAULT_PAGE_SIZE";

/// Environment variable for the maximum listing page size
pub const ENV_MAX_PAGE_SIZE: &str = "ROSTER_MAX_PAGE_SIZE";

/// Environment variable for lenient expression filtering
pub const ENV_LENIENT_EXPRESSIONS: &str = "ROSTER_LENIENT_EXPRESSIONS";

// =============================================================================
// Query Defaults
// =============================================================================

/// Default items per page for criteria listings
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum items per page for criteria listings
pub const MAX_PAGE_SIZE: u32 = 500;

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "roster.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -16000 = 16MB)
pub const SQLITE_CACHE_SIZE: &str = "-16000";

/// SQLite WAL auto-checkpoint threshold (pages, ~4MB at 1000)
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// WAL checkpoint interval in seconds (5 minutes)
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Request Body Limits
// =============================================================================

/// Body limit for API requests (64 KB)
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

// =============================================================================
// Shutdown
// =============================================================================

/// Graceful shutdown timeout in seconds
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Accounts & Departments
// =============================================================================

/// Account role: full administrative access
pub const ROLE_ADMIN: &str = "ADMIN";

/// Account role: regular employee
pub const ROLE_EMPLOYEE: &str = "EMPLOYEE";

/// Account role: department manager
pub const ROLE_MANAGER: &str = "MANAGER";

/// All account roles
pub const ACCOUNT_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EMPLOYEE, ROLE_MANAGER];

/// All department types
pub const DEPARTMENT_TYPES: &[&str] = &["DEV", "TEST", "SCRUM_MASTER", "PM"];

/// Maximum username length
pub const MAX_USERNAME_LENGTH: u64 = 50;

/// Maximum first/last name length
pub const MAX_PERSON_NAME_LENGTH: u64 = 50;

/// Maximum department name length
pub const MAX_DEPARTMENT_NAME_LENGTH: u64 = 100;
