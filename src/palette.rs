// src/palette.rs
use regex::Regex;
use std::sync::OnceLock;

use crate::models::ImpactTag;

pub const ALERT: &str = "#ff0055";
pub const WARNING: &str = "#f59e0b";
pub const NOMINAL: &str = "#22c55e";
pub const DEGRADED: &str = "#ef4444";
pub const MUTED: &str = "#94a3b8";

/// Border and badge colour of a leaderboard row.
pub fn impact_color(tag: &ImpactTag) -> &'static str {
    match tag {
        ImpactTag::Critical => ALERT,
        ImpactTag::High => WARNING,
        ImpactTag::Other(_) => NOMINAL,
    }
}

/// Score colour: the impact colour only when drift was actually detected.
pub fn score_color(tag: &ImpactTag, detected: bool) -> &'static str {
    if detected { impact_color(tag) } else { NOMINAL }
}

fn hex_pattern() -> &'static Regex {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| {
        Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$")
            .expect("static hex colour pattern")
    })
}

/// Parses a `#rrggbb` token. Named colours and other CSS forms yield `None`.
pub fn hex_to_rgb(token: &str) -> Option<(u8, u8, u8)> {
    let caps = hex_pattern().captures(token.trim())?;
    let channel = |i: usize| u8::from_str_radix(&caps[i], 16).ok();
    Some((channel(1)?, channel(2)?, channel(3)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_color_is_total() {
        assert_eq!(impact_color(&ImpactTag::Critical), ALERT);
        assert_eq!(impact_color(&ImpactTag::High), WARNING);
        assert_eq!(impact_color(&ImpactTag::Other("LOW".into())), NOMINAL);
        assert_eq!(impact_color(&ImpactTag::Other(String::new())), NOMINAL);
    }

    #[test]
    fn test_score_color_requires_detection() {
        assert_eq!(score_color(&ImpactTag::Critical, true), ALERT);
        assert_eq!(score_color(&ImpactTag::High, true), WARNING);
        assert_eq!(score_color(&ImpactTag::Critical, false), NOMINAL);
        assert_eq!(score_color(&ImpactTag::High, false), NOMINAL);
        assert_eq!(score_color(&ImpactTag::Other("MEDIUM".into()), true), NOMINAL);
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#ff0055"), Some((255, 0, 85)));
        assert_eq!(hex_to_rgb(" #22C55E "), Some((34, 197, 94)));
        assert_eq!(hex_to_rgb("red"), None);
        assert_eq!(hex_to_rgb("#fff"), None);
    }
}
