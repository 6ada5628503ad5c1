//! Activity categories and their block colors.
//!
//! Categories are free-form names kept on the profile. The five defaults
//! have fixed pastel colors; anything else falls back to the default blue.

pub const DEFAULT_CATEGORIES: [&str; 5] = ["Academy", "Study", "Play", "Sports", "Other"];

/// Fallback block color for categories without a fixed color.
pub const FALLBACK_COLOR: &str = "#E0F2FE";

/// Hex color for a category name.
pub fn color_for(category: &str) -> &'static str {
    match category {
        "Academy" => "#E0F2FE",
        "Study" => "#FEF3C7",
        "Play" => "#DCFCE7",
        "Sports" => "#FEE2E2",
        "Other" => "#F3F4F6",
        _ => FALLBACK_COLOR,
    }
}

/// Parses `#RRGGBB` into RGB components.
pub fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// RGB components for a category, never failing.
pub fn rgb_for(category: &str) -> [u8; 3] {
    parse_hex(color_for(category)).unwrap_or([224, 242, 254])
}
