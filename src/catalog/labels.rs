//! Fixed labels and colors for danger levels and IUCN status codes.

const FALLBACK_COLOR: &str = "#999";

pub fn danger_label(level: u8) -> &'static str {
    match level {
        1 => "harmless",
        2 => "low",
        3 => "moderate",
        4 => "dangerous",
        5 => "extreme",
        _ => "unknown",
    }
}

pub fn danger_color(level: u8) -> &'static str {
    match level {
        1 => "#4CAF50",
        2 => "#8BC34A",
        3 => "#FFC107",
        4 => "#FF5722",
        5 => "#D32F2F",
        _ => FALLBACK_COLOR,
    }
}

pub fn iucn_color(status: &str) -> &'static str {
    match status {
        "LC" => "#006400",
        "NT" => "#8B8000",
        "VU" => "#CC6600",
        "EN" => "#CC0000",
        "CR" => "#8B0000",
        "EW" => "#4B0082",
        "EX" => "#000000",
        _ => FALLBACK_COLOR,
    }
}
