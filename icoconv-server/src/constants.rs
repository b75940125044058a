// ABOUTME: Centralized constants for the icoconv web server
// ABOUTME: Contains network defaults, routes, content types, and response messages

/// Listener defaults
pub mod server {
    pub const DEFAULT_BIND: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_WORKERS: usize = 4;
}

/// Route paths
pub mod routes {
    pub const GENERATE: &str = "/generate";
    pub const SITEMAP: &str = "/sitemap.xml";
    pub const ROBOTS: &str = "/robots.txt";
    pub const FAVICON: &str = "/favicon.ico";
}

/// Response content types
pub mod content_types {
    pub const ICON_DOWNLOAD: &str = "image/x-icon";
    pub const SITE_ICON: &str = "image/vnd.microsoft.icon";
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const XML: &str = "application/xml";
    pub const TEXT: &str = "text/plain; charset=utf-8";
}

/// Upload form field names and download naming
pub mod form {
    pub const FILE_FIELD: &str = "file";
    pub const SIZE_FIELD: &str = "size";
    pub const DOWNLOAD_DISPOSITION: &str = "attachment; filename=\"favicon.ico\"";
}

/// Client-facing messages
pub mod messages {
    pub const MISSING_FILE: &str = "Error: No file uploaded";
    pub const MALFORMED_FORM: &str = "Error: Malformed upload";
    pub const PAYLOAD_TOO_LARGE: &str = "Error: File too large";
    pub const RATE_LIMITED: &str = "Too many requests. Please try again later.";
    pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
    pub const INTERNAL: &str = "Processing failed";
}

/// Environment variables read at startup
pub mod env {
    pub const SECRET_KEY: &str = "SECRET_KEY";
    pub const PREFIXED_SECRET_KEY: &str = "ICOCONV_SECRET_KEY";
    pub const MAX_UPLOAD_BYTES: &str = "ICOCONV_MAX_UPLOAD_BYTES";
    pub const PORT: &str = "PORT";
}
