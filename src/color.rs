//! Cladding color normalization.
//!
//! Style blocks specify a cladding color either as a named web color
//! (e.g. "red") or as a hex literal (e.g. "#A52A2A"). Material identifiers
//! embed the color, so it has to be reduced to one canonical token first:
//! a lowercase palette name or a lowercase 6-digit hex string without the
//! leading '#'. Tokens never contain separators or path-unsafe characters
//! because they end up in texture file names.

use crate::error::{ExportError, Result};

/// Named web colors accepted in style blocks, with their RGB values.
///
/// The basic CSS palette plus the two extras commonly used for cladding.
const PALETTE: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("silver", [0xc0, 0xc0, 0xc0]),
    ("gray", [0x80, 0x80, 0x80]),
    ("white", [0xff, 0xff, 0xff]),
    ("maroon", [0x80, 0x00, 0x00]),
    ("red", [0xff, 0x00, 0x00]),
    ("purple", [0x80, 0x00, 0x80]),
    ("fuchsia", [0xff, 0x00, 0xff]),
    ("green", [0x00, 0x80, 0x00]),
    ("lime", [0x00, 0xff, 0x00]),
    ("olive", [0x80, 0x80, 0x00]),
    ("yellow", [0xff, 0xff, 0x00]),
    ("navy", [0x00, 0x00, 0x80]),
    ("blue", [0x00, 0x00, 0xff]),
    ("teal", [0x00, 0x80, 0x80]),
    ("aqua", [0x00, 0xff, 0xff]),
    ("orange", [0xff, 0xa5, 0x00]),
    ("brown", [0xa5, 0x2a, 0x2a]),
];

/// Normalize a style color value to a canonical identifier token.
///
/// Returns `Ok(None)` when no color is specified (absent or blank value).
/// Named palette colors normalize to their lowercase name, hex literals
/// (3 or 6 digits, with or without '#') to lowercase 6-digit hex.
/// Anything else is an [`ExportError::InvalidColorFormat`].
pub fn normalize_color(raw: Option<&str>) -> Result<Option<String>> {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s.trim(),
        _ => return Ok(None),
    };

    let lower = raw.to_ascii_lowercase();
    if PALETTE.iter().any(|(name, _)| *name == lower) {
        return Ok(Some(lower));
    }

    let hex = lower.strip_prefix('#').unwrap_or(&lower);
    if hex.chars().all(|c| c.is_ascii_hexdigit()) {
        match hex.len() {
            6 => return Ok(Some(hex.to_string())),
            3 => {
                // Expand shorthand: "f80" -> "ff8800"
                let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
                return Ok(Some(expanded));
            }
            _ => {}
        }
    }

    Err(ExportError::InvalidColorFormat(raw.to_string()))
}

/// Resolve a normalized color token to RGB.
///
/// Accepts palette names and 6-digit hex tokens as produced by
/// [`normalize_color`]. Returns `None` for anything else.
pub fn color_to_rgb(token: &str) -> Option<[u8; 3]> {
    if let Some((_, rgb)) = PALETTE.iter().find(|(name, _)| *name == token) {
        return Some(*rgb);
    }
    if token.len() == 6 && token.chars().all(|c| c.is_ascii_hexdigit()) {
        let r = u8::from_str_radix(&token[0..2], 16).ok()?;
        let g = u8::from_str_radix(&token[2..4], 16).ok()?;
        let b = u8::from_str_radix(&token[4..6], 16).ok()?;
        return Some([r, g, b]);
    }
    None
}
