pub mod config;
pub mod faves;
pub mod info;
pub mod view;

use filterview_core::geometry::PixelSize;

/// Parse a `WIDTHxHEIGHT` widget size.
pub fn parse_size(s: &str) -> Result<PixelSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width: u32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let height: u32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if width == 0 || height == 0 {
        return Err(format!("widget size must not be empty, got {width}x{height}"));
    }
    Ok(PixelSize::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("800x600"), Ok(PixelSize::new(800, 600)));
        assert_eq!(parse_size("64X48"), Ok(PixelSize::new(64, 48)));
        assert!(parse_size("800").is_err());
        assert!(parse_size("0x600").is_err());
    }
}
