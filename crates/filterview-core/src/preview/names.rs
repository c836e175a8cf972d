//! Layer names may carry a `pos(x,y)` tag with the layer offset in full-image
//! pixels. When the preview renders a zoomed crop those offsets must be
//! rescaled to preview pixels.

use super::PreviewController;
use crate::source::{ImageSource, InputMode};

impl<S: ImageSource> PreviewController<S> {
    /// Preview pixels spanned by the visible rect, per axis.
    pub fn position_string_correction(&self) -> (f64, f64) {
        (
            self.zoom * (self.visible_rect.w * self.full_image_size.width as f64),
            self.zoom * (self.visible_rect.h * self.full_image_size.height as f64),
        )
    }

    /// Rewrite `pos(x,y)` tags from the extent of `mode` to preview coordinates.
    pub fn rescale_position_names(&self, names: &mut [String], mode: InputMode) {
        let extent = self.source.extent(mode);
        if extent.is_empty() {
            return;
        }
        let (x_factor, y_factor) = self.position_string_correction();
        let sx = x_factor as f32 / extent.width as f32;
        let sy = y_factor as f32 / extent.height as f32;
        for name in names.iter_mut() {
            if let Some(rescaled) = rescale_position_name(name, sx, sy) {
                *name = rescaled;
            }
        }
    }
}

struct PositionTag<'a> {
    matched: &'a str,
    x: &'a str,
    separator: &'a str,
    y: &'a str,
}

/// Scale the first `pos(x<sep>y)` tag in `name`. Returns `None` when there is no tag.
pub fn rescale_position_name(name: &str, sx: f32, sy: f32) -> Option<String> {
    let tag = find_position_tag(name)?;
    let x: i64 = tag.x.parse().unwrap_or(0);
    let y: i64 = tag.y.parse().unwrap_or(0);
    let new_x = (x as f32 * sx) as i64;
    let new_y = (y as f32 * sy) as i64;
    Some(name.replace(
        tag.matched,
        &format!("pos({new_x}{}{new_y})", tag.separator),
    ))
}

fn find_position_tag(name: &str) -> Option<PositionTag<'_>> {
    let mut search_from = 0;
    while let Some(offset) = name[search_from..].find("pos(") {
        let start = search_from + offset;
        if let Some(tag) = parse_tag_at(name, start) {
            return Some(tag);
        }
        search_from = start + 1;
    }
    None
}

/// Match `pos(` digits* non-digits* digits* `)` starting at `start`, taking the
/// longest separator that still leaves a closing parenthesis.
fn parse_tag_at(name: &str, start: usize) -> Option<PositionTag<'_>> {
    let body = start + "pos(".len();
    let x_end = body + leading_len(&name[body..], |c| c.is_ascii_digit());
    let run_end = x_end + leading_len(&name[x_end..], |c| !c.is_ascii_digit());

    let y_end = run_end + leading_len(&name[run_end..], |c| c.is_ascii_digit());
    if name[y_end..].starts_with(')') {
        return Some(PositionTag {
            matched: &name[start..=y_end],
            x: &name[body..x_end],
            separator: &name[x_end..run_end],
            y: &name[run_end..y_end],
        });
    }
    // Backtrack: the separator gives up characters until it ends right before a ')'.
    let close = x_end + name[x_end..run_end].rfind(')')?;
    Some(PositionTag {
        matched: &name[start..=close],
        x: &name[body..x_end],
        separator: &name[x_end..close],
        y: "",
    })
}

fn leading_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescale_comma_separated() {
        let out = rescale_position_name("layer pos(100,40) mode(screen)", 0.5, 0.25).unwrap();
        assert_eq!(out, "layer pos(50,10) mode(screen)");
    }

    #[test]
    fn test_rescale_keeps_separator() {
        let out = rescale_position_name("pos(10 x 20)", 2.0, 3.0).unwrap();
        assert_eq!(out, "pos(20 x 60)");
    }

    #[test]
    fn test_missing_y_backtracks_to_parenthesis() {
        let out = rescale_position_name("pos(10)", 2.0, 2.0).unwrap();
        assert_eq!(out, "pos(200)");
    }

    #[test]
    fn test_no_tag() {
        assert!(rescale_position_name("name(Background)", 1.0, 1.0).is_none());
    }
}
