//! Coordinate scaling and path construction for sparklines, forecast bands,
//! and candlesticks.
//!
//! All renderers map a series linearly onto a fixed pixel canvas: index → x over
//! `[0, width]`, value → y over `[0, height]` with larger values nearer the top.
//! Paths are raw point-to-point segments, no smoothing or resampling.
use std::fmt;

use tracker_common::model::Bar;

/// Drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Canvas {
    /// Ticker card sparkline.
    pub const SPARKLINE: Canvas = Canvas::new(100.0, 34.0);
    /// Analytics forecast band.
    pub const FORECAST: Canvas = Canvas::new(720.0, 240.0);
    /// Analytics candlestick chart.
    pub const CANDLES: Canvas = Canvas::new(720.0, 360.0);

    /// Canvas of the given size.
    pub const fn new(width: f64, height: f64) -> Self {
        Canvas { width, height }
    }
}

/// A canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal offset from the left edge.
    pub x: f64,
    /// Vertical offset from the top edge.
    pub y: f64,
}

/// Linear value → pixel mapping over one or more series.
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    min: f64,
    range: f64,
    canvas: Canvas,
}

impl Scale {
    /// Fit `values` onto `canvas`. Non-finite values are ignored for the bounds.
    /// Returns `None` when no finite value is present.
    pub fn fit<'a, I>(values: I, canvas: Canvas) -> Option<Scale>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let (min, max) = values
            .into_iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |bounds: Option<(f64, f64)>, v| match bounds {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        // Bounds hug the data with no padding toward 0 or 1; only a flat
        // series is widened to a unit range.
        let range = max - min;
        let range = if range > f64::EPSILON { range } else { 1.0 };
        Some(Scale { min, range, canvas })
    }

    /// x of the `index`-th of `count` evenly spaced points; a lone point sits at 0.
    pub fn x(&self, index: usize, count: usize) -> f64 {
        let last = count.saturating_sub(1).max(1);
        index as f64 / last as f64 * self.canvas.width
    }

    /// y of `value`, clamped into the canvas. Non-finite values sit on the baseline.
    pub fn y(&self, value: f64) -> f64 {
        let height = self.canvas.height;
        if !value.is_finite() {
            return height;
        }
        (height - (value - self.min) / self.range * height).clamp(0.0, height)
    }

    fn point(&self, index: usize, count: usize, value: f64) -> Point {
        Point {
            x: self.x(index, count),
            y: self.y(value),
        }
    }
}

/// An SVG path made of straight segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    points: Vec<Point>,
    closed: bool,
}

impl Path {
    /// Vertices in drawing order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True for polygons terminated with `Z`.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Formats as SVG path data: `M x y L x y … [Z]`, one decimal per coordinate.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let command = if i == 0 { 'M' } else { 'L' };
            write!(f, "{} {:.1} {:.1}", command, p.x, p.y)?;
        }
        if self.closed && !self.points.is_empty() {
            f.write_str(" Z")?;
        }
        Ok(())
    }
}

/// Polyline through `series` scaled by `scale`, one vertex per value.
fn polyline(series: &[f64], scale: &Scale) -> Path {
    let count = series.len();
    Path {
        points: series
            .iter()
            .enumerate()
            .map(|(i, v)| scale.point(i, count, *v))
            .collect(),
        closed: false,
    }
}

/// Sparkline path for a single series; empty input gives an empty path.
pub fn line_path(series: &[f64], canvas: Canvas) -> Path {
    // all values non-finite: every vertex lands on the baseline
    let scale = Scale::fit(series, canvas).unwrap_or(Scale {
        min: 0.0,
        range: 1.0,
        canvas,
    });
    polyline(series, &scale)
}

/// Forecast band geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct BandPaths {
    /// Closed polygon: p90 left to right, then p10 right to left.
    pub band: Path,
    /// Median polyline.
    pub median: Path,
}

/// Build the 10–90 band polygon and the median line.
///
/// Only the first `min(len p10, len p50, len p90)` values are used. Returns `None`
/// when that length is zero or no value is finite.
pub fn forecast_band(p10: &[f64], p50: &[f64], p90: &[f64], canvas: Canvas) -> Option<BandPaths> {
    let n = p10.len().min(p50.len()).min(p90.len());
    if n == 0 {
        return None;
    }
    let (p10, p50, p90) = (&p10[..n], &p50[..n], &p90[..n]);
    let scale = Scale::fit(p10.iter().chain(p50).chain(p90), canvas)?;

    let mut band = polyline(p90, &scale);
    band.points
        .extend(p10.iter().enumerate().rev().map(|(i, v)| scale.point(i, n, *v)));
    band.closed = true;

    Some(BandPaths {
        band,
        median: polyline(p50, &scale),
    })
}

/// One candlestick in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleGlyph {
    /// Horizontal centre.
    pub x: f64,
    /// Half of the body width.
    pub half_width: f64,
    /// y of the high.
    pub wick_top: f64,
    /// y of the low.
    pub wick_bottom: f64,
    /// y of `max(open, close)`.
    pub body_top: f64,
    /// y of `min(open, close)`.
    pub body_bottom: f64,
    /// Close at or above open.
    pub rising: bool,
}

/// Lay out one glyph per bar, each centred in an equal-width slot.
pub fn candles(bars: &[Bar], canvas: Canvas) -> Vec<CandleGlyph> {
    let Some(scale) = Scale::fit(bars.iter().flat_map(|b| [&b.low, &b.high]), canvas) else {
        return Vec::new();
    };
    let slot = canvas.width / bars.len() as f64;
    let half_width = (slot * 0.35).max(0.5).min(slot / 2.0);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| CandleGlyph {
            x: slot * (i as f64 + 0.5),
            half_width,
            wick_top: scale.y(bar.high),
            wick_bottom: scale.y(bar.low),
            body_top: scale.y(bar.open.max(bar.close)),
            body_bottom: scale.y(bar.open.min(bar.close)),
            rising: bar.is_rising(),
        })
        .collect()
}

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Terminal sparkline: one block glyph per value.
pub fn text_sparkline(series: &[f64]) -> String {
    let levels = BLOCKS.len() - 1;
    let Some(scale) = Scale::fit(series, Canvas::new(1.0, levels as f64)) else {
        return String::new();
    };
    series
        .iter()
        .map(|v| {
            let level = levels as f64 - scale.y(*v);
            BLOCKS[(level.round() as usize).min(levels)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within(path: &Path, canvas: Canvas) -> bool {
        path.points()
            .iter()
            .all(|p| (0.0..=canvas.height).contains(&p.y) && (0.0..=canvas.width).contains(&p.x))
    }

    #[test]
    fn one_point_per_value_inside_canvas() {
        let series = [3.0, -2.0, 7.5, 7.5, 0.0, 12.25];
        let path = line_path(&series, Canvas::SPARKLINE);
        assert_eq!(path.len(), series.len());
        assert!(within(&path, Canvas::SPARKLINE));
        assert_eq!(path.points()[0].x, 0.0);
        assert_eq!(path.points()[5].x, 100.0);
        // max at the top, min at the bottom
        assert_eq!(path.points()[5].y, 0.0);
        assert_eq!(path.points()[1].y, 34.0);
    }

    #[test]
    fn degenerate_series_do_not_divide_by_zero() {
        let flat = line_path(&[5.0, 5.0, 5.0], Canvas::SPARKLINE);
        assert!(flat.points().iter().all(|p| p.y == 34.0));

        let single = line_path(&[42.0], Canvas::SPARKLINE);
        assert_eq!(single.points(), &[Point { x: 0.0, y: 34.0 }]);

        let odd = line_path(&[f64::NAN, 1.0, f64::INFINITY, 2.0], Canvas::SPARKLINE);
        assert_eq!(odd.len(), 4);
        assert!(within(&odd, Canvas::SPARKLINE));

        let nothing_finite = line_path(&[f64::NAN, f64::NAN], Canvas::SPARKLINE);
        assert_eq!(nothing_finite.len(), 2);

        assert!(line_path(&[], Canvas::SPARKLINE).is_empty());
    }

    #[test]
    fn path_data_uses_move_then_line() {
        let path = line_path(&[0.0, 1.0], Canvas::new(10.0, 10.0));
        assert_eq!(path.to_string(), "M 0.0 10.0 L 10.0 0.0");
        assert_eq!(Path::default().to_string(), "");
    }

    #[test]
    fn band_encloses_median() {
        let p10 = [100.0, 92.0, 88.0, 85.5, 80.0];
        let p50 = [100.0, 101.0, 101.5, 103.0, 104.0];
        let p90 = [100.0, 110.0, 114.0, 121.0, 130.0];
        let paths = forecast_band(&p10, &p50, &p90, Canvas::FORECAST).unwrap();
        let n = p50.len();

        assert!(paths.band.is_closed());
        assert_eq!(paths.band.len(), 2 * n);
        assert_eq!(paths.median.len(), n);
        assert!(paths.band.to_string().ends_with(" Z"));

        let band = paths.band.points();
        for (i, median) in paths.median.points().iter().enumerate() {
            let top = band[i];
            let bottom = band[2 * n - 1 - i];
            assert_eq!(top.x, median.x);
            assert_eq!(bottom.x, median.x);
            assert!(top.y <= median.y && median.y <= bottom.y);
        }
        assert!(within(&paths.band, Canvas::FORECAST));
    }

    #[test]
    fn band_truncates_to_shortest_series() {
        let paths = forecast_band(&[1.0, 2.0, 3.0], &[2.0, 3.0], &[3.0, 4.0, 5.0], Canvas::FORECAST).unwrap();
        assert_eq!(paths.median.len(), 2);
        assert_eq!(paths.band.len(), 4);
        assert!(forecast_band(&[], &[1.0], &[2.0], Canvas::FORECAST).is_none());
    }

    #[test]
    fn candles_map_wicks_and_bodies() {
        let bars = [
            Bar { timestamp: 0, open: 10.0, high: 12.0, low: 9.0, close: 11.0, volume: 1.0 },
            Bar { timestamp: 1, open: 11.0, high: 11.5, low: 8.0, close: 8.5, volume: 1.0 },
        ];
        let glyphs = candles(&bars, Canvas::new(200.0, 100.0));
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].x, 50.0);
        assert_eq!(glyphs[1].x, 150.0);
        assert_eq!(glyphs[0].wick_top, 0.0);
        assert_eq!(glyphs[1].wick_bottom, 100.0);
        assert!(glyphs[0].rising && !glyphs[1].rising);
        for g in &glyphs {
            assert!(g.wick_top <= g.body_top && g.body_top <= g.body_bottom && g.body_bottom <= g.wick_bottom);
        }
        assert!(candles(&[], Canvas::CANDLES).is_empty());
    }

    #[test]
    fn text_sparkline_spans_block_range() {
        assert_eq!(text_sparkline(&[1.0, 8.0]), "▁█");
        assert_eq!(text_sparkline(&[2.0, 2.0]), "▁▁");
        assert_eq!(text_sparkline(&[]), "");
    }
}
