pub(crate) const VALUE_AXIS_TARGET_SPACING_PX: f64 = 40.0;
pub(crate) const VALUE_AXIS_MIN_TICKS: usize = 2;
pub(crate) const VALUE_AXIS_MAX_TICKS: usize = 10;

/// Ticks over a "nice" value domain (1/2/5 step ladder).
#[derive(Debug, Clone, PartialEq)]
pub struct NiceTicks {
    /// Domain widened to whole steps; the value scale maps this range.
    pub domain: (f64, f64),
    pub step: f64,
    pub values: Vec<f64>,
}

pub(crate) fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

// Keeps the widened domain and its span representable as finite `f64`.
const VALUE_MAGNITUDE_LIMIT: f64 = f64::MAX / 16.0;

/// Builds ticks covering `[min, max]` with roughly `target_count` values.
///
/// Values beyond `f64::MAX / 16` are clamped so the domain stays finite.
#[must_use]
pub fn nice_ticks(min: f64, max: f64, target_count: usize) -> NiceTicks {
    let (mut lo, mut hi) = if min <= max { (min, max) } else { (max, min) };
    if !lo.is_finite() || !hi.is_finite() {
        lo = 0.0;
        hi = 1.0;
    }
    lo = lo.clamp(-VALUE_MAGNITUDE_LIMIT, VALUE_MAGNITUDE_LIMIT);
    hi = hi.clamp(-VALUE_MAGNITUDE_LIMIT, VALUE_MAGNITUDE_LIMIT);
    if lo == hi {
        hi = lo + lo.abs().max(1.0);
    }

    let intervals = target_count.max(2) - 1;
    let step = normalize_step((hi - lo) / intervals as f64);
    let nice_lo = snap_to_step((lo / step).floor() * step, step);
    let nice_hi = snap_to_step((hi / step).ceil() * step, step);
    if !nice_lo.is_finite() || !nice_hi.is_finite() || nice_hi <= nice_lo {
        return NiceTicks {
            domain: (lo, hi),
            step: hi - lo,
            values: vec![lo, hi],
        };
    }

    // A nice step never yields more than two intervals beyond the target.
    let max_count = intervals.saturating_add(3);
    let raw_count = ((nice_hi - nice_lo) / step).round();
    let count = if raw_count.is_finite() && raw_count >= 0.0 {
        (raw_count as usize).saturating_add(1).min(max_count)
    } else {
        2
    };

    let values = (0..count)
        .map(|index| snap_to_step(nice_lo + step * index as f64, step))
        .collect();

    NiceTicks {
        domain: (nice_lo, nice_hi),
        step,
        values,
    }
}

fn normalize_step(step_abs: f64) -> f64 {
    if !step_abs.is_finite() || step_abs <= 0.0 {
        return 1.0;
    }

    let magnitude = 10.0_f64.powf(step_abs.log10().floor());
    if !magnitude.is_finite() || magnitude <= 0.0 {
        return step_abs;
    }

    let normalized = step_abs / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

// Removes accumulated float noise such as `0.30000000000000004`.
fn snap_to_step(value: f64, step: f64) -> f64 {
    let precision = i32::try_from(precision_from_step(step)).unwrap_or(i32::MAX);
    let factor = 10.0_f64.powi(precision);
    let snapped = (value * factor).round() / factor;
    if !factor.is_finite() || !snapped.is_finite() {
        return value;
    }
    if snapped == 0.0 { 0.0 } else { snapped }
}

const EXPONENT_LABEL_ABOVE: f64 = 1e15;
const MAX_FIXED_DECIMALS: usize = 9;

/// Formats a tick value with just enough decimals for `step`.
///
/// Magnitudes from `1e15` up, and steps finer than nine decimals, use
/// exponent notation (`2e307`, `5e-13`).
#[must_use]
pub fn format_tick_label(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let precision = precision_from_step(step);
    if value != 0.0 && (value.abs() >= EXPONENT_LABEL_ABOVE || precision > MAX_FIXED_DECIMALS) {
        return format!("{value:e}");
    }
    trim_decimal(format!("{value:.precision$}"))
}

// Decimals needed to print every multiple of `step` exactly.
fn precision_from_step(step: f64) -> usize {
    const MAX_EXTRA_DIGITS: usize = 3;
    if !step.is_finite() || step <= 0.0 {
        return 2;
    }
    let leading = -step.log10().floor();
    if !leading.is_finite() {
        return 0;
    }
    let base = leading.max(0.0) as usize;
    for digits in base.saturating_sub(1)..=base + MAX_EXTRA_DIGITS {
        let scaled = step * 10.0_f64.powi(digits as i32);
        if !scaled.is_finite() || (scaled - scaled.round()).abs() <= scaled.abs() * 1e-9 {
            return digits;
        }
    }
    base + MAX_EXTRA_DIGITS
}

fn trim_decimal(mut text: String) -> String {
    if let Some(index) = text.find('.') {
        let mut trim_start = text.len();
        for (idx, ch) in text.char_indices().rev() {
            if idx <= index || ch != '0' {
                break;
            }
            trim_start = idx;
        }
        text.truncate(trim_start);
        if text.ends_with('.') {
            text.pop();
        }
    }

    if text == "-0" { "0".to_owned() } else { text }
}
