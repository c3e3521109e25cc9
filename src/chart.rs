//! Progress chart rendering.
//!
//! Three panels stacked over the same day axis: total pages, total words and
//! changes per day. Every coordinate is an integer, so ticks never land on
//! fractional values.

use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use tracing::info;

use crate::error::Error;
use crate::ledger::Measurement;

/// 10x10 inches at 100 dpi.
const IMAGE_SIZE: (u32, u32) = (1000, 1000);

const LINE_WIDTH: u32 = 2;

/// Bundled so bitmap output does not depend on system fonts.
static FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Render the chart to `path`, overwriting it.
///
/// A `.svg` extension selects the SVG backend, anything else is written as
/// a bitmap whose format follows the extension (normally PNG).
pub fn render(measurements: &[Measurement], path: &Path) -> Result<(), Error> {
    if measurements.is_empty() {
        return Err(Error::EmptyLedger);
    }

    register_font("sans-serif", FontStyle::Normal, FONT)
        .map_err(|_| Error::Chart("Failed to load bundled font".to_string()))?;

    let mut data = measurements.to_vec();
    data.sort_by_key(|m| m.days_from_init);

    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        draw(SVGBackend::new(path, IMAGE_SIZE).into_drawing_area(), &data)?;
    } else {
        draw(BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area(), &data)?;
    }

    info!(path = %path.display(), rows = data.len(), "Rendered chart");
    Ok(())
}

fn draw<DB: DrawingBackend>(root: DrawingArea<DB, Shift>, data: &[Measurement]) -> Result<(), Error> {
    root.fill(&WHITE).map_err(chart_error)?;

    let first = data.first().map_or(0, |m| m.days_from_init);
    let last = data.last().map_or(0, |m| m.days_from_init);
    let days = first..last + 1;

    let panels = root.split_evenly((3, 1));
    line_panel(&panels[0], days.clone(), data, |m| m.pages, "Total pages")?;
    line_panel(&panels[1], days.clone(), data, |m| m.words, "Total words")?;
    bar_panel(&panels[2], days, data)?;

    root.present().map_err(chart_error)?;
    Ok(())
}

fn line_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    days: Range<u32>,
    data: &[Measurement],
    value: impl Fn(&Measurement) -> u64,
    label: &str,
) -> Result<(), Error> {
    let top = y_top(data.iter().map(&value).max().unwrap_or(0));

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(days.into_segmented(), 0u64..top)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .y_desc(label)
        .x_label_formatter(&day_label)
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(LineSeries::new(
            data.iter()
                .map(|m| (SegmentValue::CenterOf(m.days_from_init), value(m))),
            BLUE.stroke_width(LINE_WIDTH),
        ))
        .map_err(chart_error)?;

    Ok(())
}

fn bar_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    days: Range<u32>,
    data: &[Measurement],
) -> Result<(), Error> {
    let top = y_top(data.iter().map(|m| m.diffs).max().unwrap_or(0));

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(days.into_segmented(), 0u64..top)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .y_desc("Changes per day")
        .x_desc("Days since the start")
        .x_label_formatter(&day_label)
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.filled())
                .margin(2)
                .data(data.iter().map(|m| (m.days_from_init, m.diffs))),
        )
        .map_err(chart_error)?;

    Ok(())
}

/// Upper y bound with a little headroom above the largest value.
fn y_top(max: u64) -> u64 {
    max.saturating_add(max / 10).saturating_add(1)
}

fn day_label(value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::Exact(day) | SegmentValue::CenterOf(day) => day.to_string(),
        SegmentValue::Last => String::new(),
    }
}

fn chart_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> Error {
    Error::Chart(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rows() -> Vec<Measurement> {
        vec![
            Measurement {
                days_from_init: 0,
                pages: 5,
                words: 1000,
                diffs: 12,
            },
            Measurement {
                days_from_init: 3,
                pages: 7,
                words: 1800,
                diffs: 40,
            },
            Measurement {
                days_from_init: 1,
                pages: 6,
                words: 1200,
                diffs: 8,
            },
        ]
    }

    #[test]
    fn test_render_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.png");

        render(&rows(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_render_single_row_svg() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.svg");

        render(&rows()[..1], &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_render_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.png");
        std::fs::write(&path, "stale").unwrap();

        render(&rows(), &path).unwrap();
        assert_ne!(std::fs::read(&path).unwrap(), b"stale");
    }

    #[test]
    fn test_render_empty_is_error() {
        let dir = TempDir::new().unwrap();
        let err = render(&[], &dir.path().join("progress.png")).unwrap_err();
        assert!(matches!(err, Error::EmptyLedger));
    }

    #[test]
    fn test_y_top_saturates() {
        assert_eq!(y_top(0), 1);
        assert_eq!(y_top(100), 111);
        assert_eq!(y_top(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label(&SegmentValue::CenterOf(4)), "4");
        assert_eq!(day_label(&SegmentValue::Last), "");
    }
}
