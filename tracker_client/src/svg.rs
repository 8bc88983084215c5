//! Standalone SVG documents for the chart geometry in `chart`.
use tracker_common::model::{Bar, Forecast};

use crate::chart::{self, Canvas};

const LINE: &str = "#7dd3fc";
const BAND_FILL: &str = "rgba(125, 211, 252, 0.2)";
const BACKGROUND: &str = "#0b0f1a";
const RISING: &str = "#34d058";
const FALLING: &str = "#ea4a5a";

fn open(canvas: Canvas) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height
    )
}

/// Empty element drawn in place of a chart with no data.
pub fn placeholder(canvas: Canvas) -> String {
    let mut doc = open(canvas);
    doc.insert(doc.len() - 1, '/');
    doc
}

/// Single-series trend line.
pub fn sparkline(series: &[f64], canvas: Canvas) -> String {
    let path = chart::line_path(series, canvas);
    if path.is_empty() {
        return placeholder(canvas);
    }
    format!(
        r#"{}<path d="{}" fill="none" stroke="{}" stroke-width="1.5"/></svg>"#,
        open(canvas),
        path,
        LINE
    )
}

/// 10–90 percentile band with the median drawn on top.
pub fn forecast(fc: &Forecast, canvas: Canvas) -> String {
    let Some(paths) = chart::forecast_band(&fc.p10, &fc.p50, &fc.p90, canvas) else {
        return placeholder(canvas);
    };
    format!(
        r#"{}<path d="{}" fill="{}" stroke="none"/><path d="{}" fill="none" stroke="{}" stroke-width="2"/></svg>"#,
        open(canvas),
        paths.band,
        BAND_FILL,
        paths.median,
        LINE
    )
}

/// Candlestick chart on a dark background.
pub fn candles(bars: &[Bar], canvas: Canvas) -> String {
    let glyphs = chart::candles(bars, canvas);
    if glyphs.is_empty() {
        return placeholder(canvas);
    }
    let mut doc = open(canvas);
    doc.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="{}"/>"#,
        canvas.width, canvas.height, BACKGROUND
    ));
    for g in glyphs {
        let color = if g.rising { RISING } else { FALLING };
        doc.push_str(&format!(
            r#"<line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{c}"/><rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{c}"/>"#,
            g.wick_top,
            g.wick_bottom,
            g.x - g.half_width,
            g.body_top,
            g.half_width * 2.0,
            (g.body_bottom - g.body_top).max(1.0),
            x = g.x,
            c = color,
        ));
    }
    doc.push_str("</svg>");
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_render_placeholder() {
        let empty = placeholder(Canvas::SPARKLINE);
        assert!(empty.ends_with("/>"));
        assert!(!empty.contains("<path"));
        assert_eq!(sparkline(&[], Canvas::SPARKLINE), empty);
        assert_eq!(candles(&[], Canvas::SPARKLINE), empty);
    }

    #[test]
    fn forecast_document_has_band_and_median() {
        let fc = Forecast {
            symbol: "MSFT".into(),
            mu: 0.0,
            sigma: 0.0,
            s0: 1.0,
            days: 1,
            p10: vec![1.0, 0.5],
            p50: vec![1.0, 1.0],
            p90: vec![1.0, 1.5],
        };
        let doc = forecast(&fc, Canvas::FORECAST);
        assert_eq!(doc.matches("<path").count(), 2);
        assert!(doc.contains(" Z\""));
        assert!(doc.ends_with("</svg>"));
    }

    #[test]
    fn candle_document_has_one_glyph_per_bar() {
        let bar = |open: f64, close: f64| Bar {
            timestamp: 0,
            open,
            high: open.max(close) + 1.0,
            low: open.min(close) - 1.0,
            close,
            volume: 0.0,
        };
        let doc = candles(&[bar(10.0, 12.0), bar(12.0, 11.0)], Canvas::CANDLES);
        assert_eq!(doc.matches("<line").count(), 2);
        // background plus one body per bar
        assert_eq!(doc.matches("<rect").count(), 3);
        assert!(doc.contains(RISING));
        assert!(doc.contains(FALLING));
        assert!(doc.ends_with("</svg>"));
    }
}
