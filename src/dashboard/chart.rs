//! Chart Geometry
//!
//! Lays out the donut charts and the staff bar chart as SVG path data.
//! The templates only place the precomputed shapes.

use serde::Serialize;
use std::f64::consts::PI;

use crate::dashboard::series::ChartSlice;
use crate::summary::StaffStat;

/// Chart colors, indexed per slice
pub const PALETTE: [&str; 4] = ["#8b5cf6", "#06b6d4", "#f59e0b", "#10b981"];

/// Fill for staff bars
pub const BAR_COLOR: &str = "#8b5cf6";

/// Donut layout parameters (degrees for angles)
#[derive(Debug, Clone, Copy)]
pub struct PieGeometry {
    pub size: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub padding_angle: f64,
}

impl Default for PieGeometry {
    fn default() -> Self {
        Self {
            size: 300.0,
            inner_radius: 60.0,
            outer_radius: 100.0,
            padding_angle: 5.0,
        }
    }
}

/// A laid-out pie slice with its legend entry
#[derive(Debug, Clone, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    pub percentage: String,
    pub color: &'static str,
    /// SVG path, `None` for zero-valued slices
    pub path: Option<String>,
}

/// A donut chart ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct PieChart {
    pub title: String,
    pub size: f64,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Lay out `series` as a donut; colors start at `color_offset` in the palette
    pub fn build(
        title: impl Into<String>,
        series: &[ChartSlice],
        color_offset: usize,
        geometry: &PieGeometry,
    ) -> Self {
        let sum: u64 = series.iter().map(|s| s.value).sum();
        let non_zero = series.iter().filter(|s| s.value > 0).count();
        let available = (360.0 - geometry.padding_angle * non_zero as f64).max(0.0);
        let center = geometry.size / 2.0;

        let mut start = 0.0;
        let mut slices = Vec::with_capacity(series.len());

        for (index, item) in series.iter().enumerate() {
            let color = PALETTE[(index + color_offset) % PALETTE.len()];

            let path = if item.value > 0 && sum > 0 {
                let sweep = item.value as f64 / sum as f64 * available;
                let d = donut_sector(
                    center,
                    center,
                    geometry.inner_radius,
                    geometry.outer_radius,
                    start,
                    start + sweep,
                );
                start += sweep + geometry.padding_angle;
                Some(d)
            } else {
                None
            };

            slices.push(PieSlice {
                label: item.label.clone(),
                value: item.value,
                percentage: item.percentage.clone(),
                color,
                path,
            });
        }

        Self {
            title: title.into(),
            size: geometry.size,
            slices,
        }
    }
}

/// Point on a circle; angles grow counterclockwise from three o'clock
fn polar(cx: f64, cy: f64, radius: f64, degrees: f64) -> (f64, f64) {
    let radians = degrees * PI / 180.0;
    (cx + radius * radians.cos(), cy - radius * radians.sin())
}

/// SVG path for a ring sector between two angles
fn donut_sector(cx: f64, cy: f64, inner: f64, outer: f64, start: f64, end: f64) -> String {
    let sweep = end - start;

    if sweep >= 359.999 {
        // a single arc cannot close on itself, so draw two halves per ring
        let (ox0, oy0) = polar(cx, cy, outer, 0.0);
        let (ox1, oy1) = polar(cx, cy, outer, 180.0);
        let (ix0, iy0) = polar(cx, cy, inner, 0.0);
        let (ix1, iy1) = polar(cx, cy, inner, 180.0);
        return format!(
            "M {:.2} {:.2} A {o} {o} 0 1 0 {:.2} {:.2} A {o} {o} 0 1 0 {:.2} {:.2} Z \
             M {:.2} {:.2} A {i} {i} 0 1 1 {:.2} {:.2} A {i} {i} 0 1 1 {:.2} {:.2} Z",
            ox0, oy0, ox1, oy1, ox0, oy0, ix0, iy0, ix1, iy1, ix0, iy0,
            o = outer,
            i = inner,
        );
    }

    let large = if sweep > 180.0 { 1 } else { 0 };
    let (osx, osy) = polar(cx, cy, outer, start);
    let (oex, oey) = polar(cx, cy, outer, end);
    let (iex, iey) = polar(cx, cy, inner, end);
    let (isx, isy) = polar(cx, cy, inner, start);

    format!(
        "M {:.2} {:.2} A {o} {o} 0 {l} 0 {:.2} {:.2} L {:.2} {:.2} A {i} {i} 0 {l} 1 {:.2} {:.2} Z",
        osx,
        osy,
        oex,
        oey,
        iex,
        iey,
        isx,
        isy,
        o = outer,
        i = inner,
        l = large,
    )
}

/// Bar chart layout parameters
#[derive(Debug, Clone, Copy)]
pub struct BarGeometry {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    /// Fraction of each category band left empty
    pub category_gap: f64,
    pub corner_radius: f64,
    pub tick_count: u32,
}

impl Default for BarGeometry {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 350.0,
            margin_left: 50.0,
            margin_right: 20.0,
            margin_top: 20.0,
            margin_bottom: 40.0,
            category_gap: 0.2,
            corner_radius: 8.0,
            tick_count: 5,
        }
    }
}

/// One staff bar
#[derive(Debug, Clone, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: u64,
    pub color: &'static str,
    /// SVG path, `None` when the bar has no height
    pub path: Option<String>,
    pub label_x: f64,
}

/// A horizontal grid line with its axis label
#[derive(Debug, Clone, Serialize)]
pub struct Tick {
    pub value: u64,
    pub y: f64,
}

/// A bar chart ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct BarChart {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub plot_left: f64,
    pub plot_right: f64,
    pub plot_bottom: f64,
    pub label_y: f64,
    pub bars: Vec<Bar>,
    pub ticks: Vec<Tick>,
}

impl BarChart {
    /// One bar per staff member, in input order
    pub fn build(title: impl Into<String>, stats: &[StaffStat], geometry: &BarGeometry) -> Self {
        let plot_left = geometry.margin_left;
        let plot_right = geometry.width - geometry.margin_right;
        let plot_top = geometry.margin_top;
        let plot_bottom = geometry.height - geometry.margin_bottom;
        let plot_width = plot_right - plot_left;
        let plot_height = plot_bottom - plot_top;

        let max = stats.iter().map(|s| s.count).max().unwrap_or(0);
        let (step, axis_max) = nice_axis(max, geometry.tick_count);
        let scale = |value: u64| plot_height * value as f64 / axis_max as f64;

        let ticks = (0..=axis_max / step)
            .map(|i| {
                let value = i * step;
                Tick {
                    value,
                    y: plot_bottom - scale(value),
                }
            })
            .collect();

        let band = if stats.is_empty() {
            0.0
        } else {
            plot_width / stats.len() as f64
        };
        let bar_width = band * (1.0 - geometry.category_gap);

        let bars = stats
            .iter()
            .enumerate()
            .map(|(index, stat)| {
                let x = plot_left + band * index as f64 + (band - bar_width) / 2.0;
                let h = scale(stat.count);
                let path = if h > 0.0 {
                    Some(rounded_top_rect(
                        x,
                        plot_bottom - h,
                        bar_width,
                        h,
                        geometry.corner_radius,
                    ))
                } else {
                    None
                };

                Bar {
                    label: stat.name.clone(),
                    value: stat.count,
                    color: BAR_COLOR,
                    path,
                    label_x: x + bar_width / 2.0,
                }
            })
            .collect();

        Self {
            title: title.into(),
            width: geometry.width,
            height: geometry.height,
            plot_left,
            plot_right,
            plot_bottom,
            label_y: plot_bottom + 20.0,
            bars,
            ticks,
        }
    }
}

/// Integer tick step and axis maximum covering `max` in about `ticks` intervals
fn nice_axis(max: u64, ticks: u32) -> (u64, u64) {
    let intervals = ticks.saturating_sub(1).max(1) as f64;
    let raw = (max.max(1) as f64) / intervals;
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = ((nice * magnitude).round() as u64).max(1);
    let axis_max = max.max(1).div_ceil(step) * step;
    (step, axis_max)
}

/// Rectangle with rounded top corners
fn rounded_top_rect(x: f64, y: f64, w: f64, h: f64, radius: f64) -> String {
    let r = radius.min(w / 2.0).min(h).max(0.0);
    format!(
        "M {:.2} {:.2} L {:.2} {:.2} Q {:.2} {:.2} {:.2} {:.2} L {:.2} {:.2} Q {:.2} {:.2} {:.2} {:.2} L {:.2} {:.2} Z",
        x,
        y + h,
        x,
        y + r,
        x,
        y,
        x + r,
        y,
        x + w - r,
        y,
        x + w,
        y,
        x + w,
        y + r,
        x + w,
        y + h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices(values: &[u64]) -> Vec<ChartSlice> {
        let total = values.iter().sum();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| ChartSlice::new(format!("s{}", i), *v, total))
            .collect()
    }

    fn staff(counts: &[u64]) -> Vec<StaffStat> {
        counts
            .iter()
            .enumerate()
            .map(|(i, c)| StaffStat {
                name: format!("staff{}", i),
                count: *c,
            })
            .collect()
    }

    #[test]
    fn test_pie_colors_follow_offset() {
        let chart = PieChart::build("t", &slices(&[1, 1]), 2, &PieGeometry::default());
        assert_eq!(chart.slices[0].color, "#f59e0b");
        assert_eq!(chart.slices[1].color, "#10b981");

        let chart = PieChart::build("t", &slices(&[1, 1, 1]), 2, &PieGeometry::default());
        assert_eq!(chart.slices[2].color, "#8b5cf6");
    }

    #[test]
    fn test_zero_slice_has_no_path() {
        let chart = PieChart::build("t", &slices(&[3, 0]), 0, &PieGeometry::default());
        assert!(chart.slices[0].path.is_some());
        assert!(chart.slices[1].path.is_none());
        assert_eq!(chart.slices.len(), 2);
    }

    #[test]
    fn test_empty_pie_draws_nothing() {
        let chart = PieChart::build("t", &slices(&[0, 0]), 0, &PieGeometry::default());
        assert!(chart.slices.iter().all(|s| s.path.is_none()));
    }

    #[test]
    fn test_full_ring_without_padding() {
        let geometry = PieGeometry {
            padding_angle: 0.0,
            ..PieGeometry::default()
        };
        let chart = PieChart::build("t", &slices(&[5]), 0, &geometry);
        let path = chart.slices[0].path.as_ref().unwrap();
        assert_eq!(path.matches('A').count(), 4);
    }

    #[test]
    fn test_sector_starts_at_three_oclock() {
        let d = donut_sector(150.0, 150.0, 60.0, 100.0, 0.0, 90.0);
        assert!(d.starts_with("M 250.00 150.00 A 100 100 0 0 0 150.00 50.00"));
    }

    #[test]
    fn test_nice_axis() {
        assert_eq!(nice_axis(6, 5), (2, 6));
        assert_eq!(nice_axis(0, 5), (1, 1));
        assert_eq!(nice_axis(37, 5), (10, 40));
        assert_eq!(nice_axis(100, 5), (50, 100));
    }

    #[test]
    fn test_bars_keep_order_and_count() {
        let stats = staff(&[4, 6, 0]);
        let chart = BarChart::build("t", &stats, &BarGeometry::default());

        assert_eq!(chart.bars.len(), 3);
        let labels: Vec<_> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["staff0", "staff1", "staff2"]);
        assert!(chart.bars[2].path.is_none());
        assert!(chart.bars[0].label_x < chart.bars[1].label_x);
    }

    #[test]
    fn test_bar_ticks_cover_maximum() {
        let chart = BarChart::build("t", &staff(&[4, 6]), &BarGeometry::default());
        let values: Vec<_> = chart.ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![0, 2, 4, 6]);
        assert_eq!(chart.ticks[0].y, chart.plot_bottom);
        assert_eq!(chart.ticks[3].y, BarGeometry::default().margin_top);
    }

    #[test]
    fn test_empty_bar_chart() {
        let chart = BarChart::build("t", &[], &BarGeometry::default());
        assert!(chart.bars.is_empty());
        assert_eq!(chart.ticks.len(), 2);
    }
}
