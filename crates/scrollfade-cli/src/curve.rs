//! `scrollfade curve` - print the opacity an element gets at each position

use anyhow::{bail, Result};
use scrollfade_core::fade::{fade_factors, visibility, Visibility};
use scrollfade_core::{compute_opacity, ElementRect, FadeConfig};

/// Most rows a single curve may print
const MAX_SAMPLES: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveRow {
    pub top: f64,
    pub visibility: Visibility,
    pub entry: f64,
    pub exit: f64,
    pub opacity: f64,
}

/// Sample an element of `height` moving from just below the viewport to just above it
pub fn curve_rows(
    config: &FadeConfig,
    viewport: f64,
    height: f64,
    step: f64,
) -> Result<Vec<CurveRow>> {
    for (name, value) in [("viewport", viewport), ("height", height), ("step", step)] {
        if !value.is_finite() {
            bail!("{name} must be a finite number, got {value}");
        }
    }
    if height < 0.0 {
        bail!("height must not be negative, got {height}");
    }

    let step = if step > 0.0 { step } else { 1.0 };
    let start = viewport + step;
    let end = -(height + step);
    let samples = ((start - end) / step).floor();
    if samples > MAX_SAMPLES as f64 {
        bail!("step {step} is too small: more than {MAX_SAMPLES} samples between {start} and {end}");
    }

    let rows = (0..=samples as usize)
        .map(|i| {
            let top = start - i as f64 * step;
            let rect = ElementRect::new(top, top + height);
            let factors = fade_factors(rect, viewport, config);
            CurveRow {
                top,
                visibility: visibility(rect, viewport),
                entry: factors.entry,
                exit: factors.exit,
                opacity: compute_opacity(rect, viewport, config),
            }
        })
        .collect();
    Ok(rows)
}

pub fn print_curve(
    name: &str,
    config: &FadeConfig,
    viewport: f64,
    height: f64,
    step: f64,
) -> Result<()> {
    let rows = curve_rows(config, viewport, height, step)?;

    println!("Fade curve '{name}' (viewport {viewport}, element height {height})");
    println!();
    println!("  {:>8}  {:<8}  {:>6}  {:>6}  {:>7}", "top", "where", "entry", "exit", "opacity");

    for row in rows {
        let place = match row.visibility {
            Visibility::Above => "above",
            Visibility::Visible => "visible",
            Visibility::Below => "below",
        };
        let bar = "█".repeat((row.opacity * 20.0).round() as usize);
        println!(
            "  {:>8.1}  {:<8}  {:>6.3}  {:>6.3}  {:>7.3}  {}",
            row.top, place, row.entry, row.exit, row.opacity, bar
        );
    }
    Ok(())
}
