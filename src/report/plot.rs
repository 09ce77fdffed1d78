//! Total vs heat pump consumption chart
//!
//! Renders straight into an RGB raster and encodes it as PNG. The chart has
//! no text: the two series are identified by the colour swatches in the
//! legend strip above the plot area.

use anyhow::Result;
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use itertools::{Itertools, MinMaxResult};
use std::io::Cursor;

use crate::domain::EnergyReading;

pub const TOTAL_COLOR: Rgb<u8> = Rgb([0x1f, 0x77, 0xb4]);
pub const HEATPUMP_COLOR: Rgb<u8> = Rgb([0xff, 0x7f, 0x0e]);
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID_COLOR: Rgb<u8> = Rgb([225, 225, 225]);
const AXIS_COLOR: Rgb<u8> = Rgb([40, 40, 40]);

pub const MIN_WIDTH: u32 = 200;
pub const MIN_HEIGHT: u32 = 150;

const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 50;
const MARGIN_BOTTOM: u32 = 40;
const GRID_X: u32 = 10;
const GRID_Y: u32 = 5;

struct Frame {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    t_min: i64,
    t_span: f64,
    y_min: f64,
    y_span: f64,
}

impl Frame {
    fn project(&self, t: i64, y: f64) -> (f32, f32) {
        let fx = (t - self.t_min) as f64 / self.t_span;
        let fy = (y - self.y_min) / self.y_span;
        (
            self.left + (fx as f32) * self.width,
            self.top + self.height - (fy as f32) * self.height,
        )
    }
}

type Series = Vec<(i64, Option<f64>)>;

/// Render the comparison chart as PNG bytes.
///
/// Sizes below `MIN_WIDTH` x `MIN_HEIGHT` are raised to the minimum.
pub fn render_comparison_png<'a, I>(readings: I, width: u32, height: u32) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a EnergyReading>,
{
    let width = width.max(MIN_WIDTH);
    let height = height.max(MIN_HEIGHT);

    let mut sorted: Vec<&EnergyReading> = readings.into_iter().collect();
    sorted.sort_by_key(|r| r.timestamp);

    let total: Series = sorted
        .iter()
        .map(|r| (r.timestamp.timestamp_millis(), r.total_energy_kwh))
        .collect();
    let heatpump: Series = sorted
        .iter()
        .map(|r| (r.timestamp.timestamp_millis(), r.heatpump_energy_kwh()))
        .collect();

    let frame = frame_for(&total, &heatpump, width, height);
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    draw_grid(&mut img, &frame);
    draw_series(&mut img, &frame, &total, TOTAL_COLOR);
    draw_series(&mut img, &frame, &heatpump, HEATPUMP_COLOR);
    draw_legend(&mut img);

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

fn frame_for(total: &Series, heatpump: &Series, width: u32, height: u32) -> Frame {
    let (t_min, t_max) = match total.iter().map(|(t, _)| *t).minmax() {
        MinMaxResult::NoElements => (0, 1),
        MinMaxResult::OneElement(t) => (t, t),
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
    };

    let values = total.iter().chain(heatpump.iter()).filter_map(|(_, v)| *v);
    let (y_lo, y_hi) = match values.minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => (0.0, 1.0),
        MinMaxResult::OneElement(v) => (v.min(0.0), v.max(0.0)),
        MinMaxResult::MinMax(lo, hi) => (lo.min(0.0), hi.max(0.0)),
    };
    let y_span = if y_hi - y_lo > f64::EPSILON {
        (y_hi - y_lo) * 1.05
    } else {
        1.0
    };

    Frame {
        left: MARGIN_LEFT as f32,
        top: MARGIN_TOP as f32,
        width: (width - MARGIN_LEFT - MARGIN_RIGHT) as f32,
        height: (height - MARGIN_TOP - MARGIN_BOTTOM) as f32,
        t_min,
        t_span: ((t_max - t_min) as f64).max(1.0),
        y_min: y_lo,
        y_span,
    }
}

fn draw_grid(img: &mut RgbImage, frame: &Frame) {
    let right = frame.left + frame.width;
    let bottom = frame.top + frame.height;

    for i in 0..=GRID_X {
        let x = frame.left + frame.width * i as f32 / GRID_X as f32;
        draw_line_segment_mut(img, (x, frame.top), (x, bottom), GRID_COLOR);
    }
    for i in 0..=GRID_Y {
        let y = frame.top + frame.height * i as f32 / GRID_Y as f32;
        draw_line_segment_mut(img, (frame.left, y), (right, y), GRID_COLOR);
    }

    draw_line_segment_mut(img, (frame.left, frame.top), (frame.left, bottom), AXIS_COLOR);
    draw_line_segment_mut(img, (frame.left, bottom), (right, bottom), AXIS_COLOR);
}

fn draw_series(img: &mut RgbImage, frame: &Frame, series: &Series, color: Rgb<u8>) {
    let mut prev: Option<(f32, f32)> = None;
    for &(t, value) in series {
        let Some(value) = value else {
            prev = None;
            continue;
        };
        let point = frame.project(t, value);
        match prev {
            Some(start) => {
                // 2px stroke
                draw_line_segment_mut(img, start, point, color);
                draw_line_segment_mut(img, (start.0, start.1 + 1.0), (point.0, point.1 + 1.0), color);
            }
            None => {
                let rect = Rect::at(point.0 as i32 - 1, point.1 as i32 - 1).of_size(3, 3);
                draw_filled_rect_mut(img, rect, color);
            }
        }
        prev = Some(point);
    }
}

fn draw_legend(img: &mut RgbImage) {
    let y = (MARGIN_TOP / 2) as i32 - 5;
    for (i, color) in [TOTAL_COLOR, HEATPUMP_COLOR].into_iter().enumerate() {
        let x = MARGIN_LEFT as i32 + i as i32 * 40;
        draw_filled_rect_mut(img, Rect::at(x, y).of_size(24, 10), color);
        draw_hollow_rect_mut(img, Rect::at(x, y).of_size(24, 10), AXIS_COLOR);
    }
}
