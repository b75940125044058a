// ABOUTME: Centralized constants for the icon conversion core
// ABOUTME: Contains upload limits, icon sizes, hardening thresholds, and rate limit quotas

/// Upload and icon size limits
pub mod limits {
    /// Largest accepted upload body (4.5 MiB)
    pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024 + 512 * 1024;

    /// Edge length used when the caller does not pick one
    pub const DEFAULT_EDGE: u32 = 32;

    /// Smallest representable icon frame edge
    pub const MIN_EDGE: u32 = 1;

    /// Largest representable icon frame edge
    pub const MAX_EDGE: u32 = 256;

    /// Edge lengths offered on the upload form
    pub const OFFERED_EDGES: &[u32] = &[16, 32, 48, 64, 128, 256];
}

/// Oversized source protection
pub mod clamp {
    /// Decoded sources wider or taller than this are shrunk before processing
    pub const MAX_SOURCE_DIMENSION: u32 = 2500;

    /// Bounding box oversized sources are shrunk into
    pub const CLAMP_BOX: u32 = 512;
}

/// Edge highlight applied to transparent artwork
pub mod glow {
    /// Minimum alpha at which an image counts as fully opaque (~98% of 255)
    pub const OPAQUE_ALPHA_THRESHOLD: u8 = 250;

    /// Opacity of each shifted white layer
    pub const LAYER_OPACITY: f32 = 0.45;

    /// One-pixel shifts: up, down, left, right
    pub const OFFSETS: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
}

/// Admission guard quotas
pub mod rate_limit {
    use std::time::Duration;

    pub const PER_MINUTE: u32 = 15;
    pub const PER_HOUR: u32 = 50;
    pub const PER_DAY: u32 = 200;

    pub const MINUTE: Duration = Duration::from_secs(60);
    pub const HOUR: Duration = Duration::from_secs(60 * 60);
    pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    /// Number of checks between sweeps of expired client entries
    pub const SWEEP_INTERVAL: u64 = 1024;
}
