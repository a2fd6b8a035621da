//! Text rendering of a rate series

use crate::core::rate::format_timestamp;
use crate::core::series::ChartSeries;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One bar per point, scaled between the series minimum and maximum.
pub fn sparkline(series: &ChartSeries) -> String {
    let min = series.values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    series
        .values
        .iter()
        .map(|v| {
            if span <= 0.0 {
                BARS[BARS.len() / 2]
            } else {
                let idx = ((v - min) / span * (BARS.len() - 1) as f64).round() as usize;
                BARS[idx.min(BARS.len() - 1)]
            }
        })
        .collect()
}

/// Sparkline framed by the first and last label and the value range.
pub fn render_chart(series: &ChartSeries) -> String {
    let (Some(first), Some(last)) = (series.labels.first(), series.labels.last()) else {
        return "No history data available.".to_string();
    };
    let min = series.values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    format!(
        "{} {} {}\nlow {:.4}  high {:.4}",
        format_timestamp(first),
        sparkline(series),
        format_timestamp(last),
        min,
        max
    )
}
