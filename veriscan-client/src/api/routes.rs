//! API route constants for the Veriscan backend.
//!
//! The backend exposes a flat, unversioned path space.

/// Authentication and identity endpoints
pub mod auth {
    /// Account registration (JSON payload)
    pub const REGISTER: &str = "/register";
    /// Login (OAuth2 password form)
    pub const LOGIN: &str = "/login";
    /// Current user profile
    pub const ME: &str = "/me";
}

/// Analysis endpoints
pub mod scan {
    /// Analyze raw text (JSON payload)
    pub const ANALYZE_TEXT: &str = "/analyze";
    /// Analyze an uploaded document (multipart payload)
    pub const ANALYZE_FILE: &str = "/analyze-file";
    /// Scan history (GET to list, DELETE to clear)
    pub const HISTORY: &str = "/history";
}
