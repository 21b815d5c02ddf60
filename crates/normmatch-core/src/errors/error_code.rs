//! NormMatchErrorCode trait for host-facing error reporting.

/// Every error enum implements this to provide a stable, structured
/// error code string for hosts that embed the matcher.
pub trait NormMatchErrorCode {
    /// Returns the error code string (e.g., "FORMAT_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const FORMAT_ERROR: &str = "FORMAT_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const BOUNDS_ERROR: &str = "BOUNDS_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const MATCH_ERROR: &str = "MATCH_ERROR";
pub const TABLE_ERROR: &str = "TABLE_ERROR";
pub const NOT_LOADED: &str = "NOT_LOADED";
