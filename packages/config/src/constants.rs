// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Drafter

// Port Configuration
pub const DRAFTER_PORT: &str = "DRAFTER_PORT";

// Database Configuration
pub const DRAFTER_DB_PATH: &str = "DRAFTER_DB_PATH";

// CORS Configuration
pub const DRAFTER_CORS_ORIGIN: &str = "DRAFTER_CORS_ORIGIN";

// LLM Gateway Configuration
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const DRAFTER_MODEL: &str = "DRAFTER_MODEL";
pub const DRAFTER_OPENAI_BASE_URL: &str = "DRAFTER_OPENAI_BASE_URL";

// Chat Context Configuration
pub const DRAFTER_CHAT_CONTEXT: &str = "DRAFTER_CHAT_CONTEXT";
