//! Preview rendering: outline recognized spans and cap the display height.

use crate::error::UmaError;
use crate::model::Fragment;
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

const BOX_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
const BOX_THICKNESS: u32 = 2;

/// Decode `encoded`, outline every fragment box, and scale down to at most
/// `max_height` pixels tall keeping the aspect ratio. Only box outlines are
/// drawn; fragment text is not rendered onto the preview.
pub fn annotate(
    encoded: &[u8],
    fragments: &[Fragment],
    max_height: u32,
) -> Result<RgbaImage, UmaError> {
    let mut canvas = image::load_from_memory(encoded)?.to_rgba8();

    for fragment in fragments {
        let tl = fragment.bbox.top_left();
        let br = fragment.bbox.bottom_right();
        draw_rect(
            &mut canvas,
            tl.x.max(0.0) as u32,
            tl.y.max(0.0) as u32,
            br.x.max(0.0) as u32,
            br.y.max(0.0) as u32,
        );
    }

    Ok(fit_height(canvas, max_height))
}

/// Scale down so the image is no taller than `max_height`.
pub fn fit_height(img: RgbaImage, max_height: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    if h <= max_height || max_height == 0 {
        return img;
    }
    let ratio = max_height as f64 / h as f64;
    let new_w = ((w as f64 * ratio) as u32).max(1);
    image::imageops::resize(&img, new_w, max_height, FilterType::Triangle)
}

fn draw_rect(img: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let x1 = x1.min(w - 1);
    let y1 = y1.min(h - 1);
    if x0 > x1 || y0 > y1 {
        return;
    }

    for t in 0..BOX_THICKNESS {
        for x in x0..=x1 {
            for y in [y0.saturating_add(t), y1.saturating_sub(t)] {
                if y < h {
                    img.put_pixel(x, y, BOX_COLOR);
                }
            }
        }
        for y in y0..=y1 {
            for x in [x0.saturating_add(t), x1.saturating_sub(t)] {
                if x < w {
                    img.put_pixel(x, y, BOX_COLOR);
                }
            }
        }
    }
}
