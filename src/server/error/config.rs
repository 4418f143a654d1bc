use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// Check `.env.example` for the variables the server expects.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but cannot be parsed into the expected type.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar { name: String, value: String },

    /// Rate limit settings rejected by the limiter, e.g. a zero period or burst.
    #[error("Invalid rate limit: {per_second} per second with burst {burst}")]
    InvalidRateLimit { per_second: u64, burst: u32 },
}
