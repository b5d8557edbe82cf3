// raster.rs - Draw a simulation frame into an image
//
// Same contract as the canvas sink: position, radius and palette colour per
// visible particle, nothing else.

use image::RgbImage;
use reaction_engine::Encoder;
use reaction_engine::render::RECORD_LEN;
use reaction_engine::scene::{Palette, SpeciesId};

use crate::color::{BACKGROUND, Color, FALLBACK};

pub fn draw_frame(records: &Encoder, palette: &Palette, width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND.to_rgb());
    let colors: Vec<Color> = palette.ids().map(|s| Color::from_css(palette.color(s))).collect();

    for rec in records.records().chunks_exact(RECORD_LEN) {
        let (x, y, r) = (rec[0], rec[1], rec[2]);
        let fill = colors
            .get(SpeciesId(rec[3] as u16).slot())
            .copied()
            .unwrap_or(FALLBACK);
        fill_disc(&mut img, x, y, r, fill);
    }
    img
}

/// Filled disc with a one-pixel anti-aliased rim
fn fill_disc(img: &mut RgbImage, cx: f32, cy: f32, r: f32, fill: Color) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let x0 = ((cx - r - 1.0).floor() as i64).max(0);
    let x1 = ((cx + r + 1.0).ceil() as i64).min(w - 1);
    let y0 = ((cy - r - 1.0).floor() as i64).max(0);
    let y1 = ((cy + r + 1.0).ceil() as i64).min(h - 1);

    for py in y0..=y1 {
        for px in x0..=x1 {
            let dx = px as f32 + 0.5 - cx;
            let dy = py as f32 + 0.5 - cy;
            let coverage = (r + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let pixel = img.get_pixel_mut(px as u32, py as u32);
            let [r0, g0, b0] = pixel.0;
            let under = Color::from_rgb(r0, g0, b0);
            *pixel = under.lerp(fill, coverage).to_rgb();
        }
    }
}
