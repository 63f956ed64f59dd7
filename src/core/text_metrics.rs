/// Estimates the rendered width of a single-line label.
///
/// Deterministic and backend-independent so layout never depends on font
/// rasterization of the host.
#[must_use]
pub fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Width of the widest label in `labels`.
#[must_use]
pub fn widest_label_px<'a>(labels: impl IntoIterator<Item = &'a str>, font_size_px: f64) -> f64 {
    labels
        .into_iter()
        .map(|label| estimate_label_text_width_px(label, font_size_px))
        .fold(0.0, f64::max)
}
