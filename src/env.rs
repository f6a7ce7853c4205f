//! Environment constants shared across the application.
//!
//! This module centralizes env-var names, endpoint URLs, and the various
//! timeout tiers so they are defined in exactly one place.

use std::time::Duration;

/// Configuration file name looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "blendchat.toml";

/// User configuration directory name (under the home directory)
pub const USER_CONFIG_DIR_NAME: &str = ".blendchat";

/// Provider credentials and endpoints
pub mod provider {
    use std::time::Duration;

    /// Environment variable holding the Anthropic API key
    pub const CLAUDE_API_KEY_ENV: &str = "CLAUDE_API_KEY";

    /// Environment variable holding the DeepSeek API key
    pub const DEEPSEEK_API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

    /// Anthropic messages endpoint
    pub const CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";

    /// Required Anthropic version header value
    pub const ANTHROPIC_VERSION: &str = "2023-06-01";

    /// DeepSeek chat completions endpoint
    pub const DEEPSEEK_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";

    /// Default primary model
    pub const CLAUDE_MODEL: &str = "claude-3-sonnet-20240229";

    /// Default reasoning model
    pub const DEEPSEEK_MODEL: &str = "deepseek-reasoner";

    /// Completion budget sent with every upstream request
    pub const MAX_TOKENS: u64 = 4096;

    /// Per-adapter wall-clock budget. Must stay strictly below
    /// [`super::dispatch::OUTER_CEILING`].
    pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(290);

    /// Bounded retry attempts for transient upstream failures
    pub const MAX_RETRIES: u32 = 3;

    /// Base delay for exponential backoff, doubled on each attempt
    pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(1000);
}

/// Dispatch-level limits
pub mod dispatch {
    use std::time::Duration;

    /// Whole-request ceiling; every in-flight adapter call is cancelled when
    /// this expires.
    pub const OUTER_CEILING: Duration = Duration::from_secs(300);
}

/// Store gateway limits
pub mod store {
    use std::time::Duration;

    /// Per-operation timeout for the persistence backend. Seconds-scale by
    /// design, distinct from the minutes-scale upstream timeouts.
    pub const OP_TIMEOUT: Duration = Duration::from_secs(5);

    /// Default page size for message listings
    pub const PAGE_SIZE: usize = 20;

    /// Session ids with this prefix are throwaway containers, deleted once
    /// their messages have been written.
    pub const EPHEMERAL_SESSION_PREFIX: &str = "ephemeral-";

    /// Title given to sessions created without one
    pub const DEFAULT_SESSION_TITLE: &str = "New Chat";
}

/// Local cache limits
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);
