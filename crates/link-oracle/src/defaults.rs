//! Schemes treated as openable when no registry is configured.

/// URL schemes a stock handset opens out of the box.
pub const DEFAULT_SCHEMES: &[&str] = &[
    "http",
    "https",
    "mailto",
    "tel",
    "sms",
    "facetime",
    "facetime-audio",
    "maps",
];
