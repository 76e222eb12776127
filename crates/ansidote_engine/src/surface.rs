//! Drawing primitives on RGB surfaces.
//!
//! All primitives clip against the surface bounds, callers may pass
//! rectangles that are partially (or entirely) outside.

use image::{Rgb, RgbImage, RgbaImage};

use crate::Color;

pub fn new_surface(width: u32, height: u32, background: Color) -> RgbImage {
    RgbImage::from_pixel(width, height, background.into())
}

/// Clips `[x, x + w) x [y, y + h)` against the surface, returns pixel ranges.
fn clip(surface: &RgbImage, x: i64, y: i64, w: i64, h: i64) -> Option<(u32, u32, u32, u32)> {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w).min(surface.width() as i64);
    let y1 = (y + h).min(surface.height() as i64);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}

pub fn fill_rect(surface: &mut RgbImage, x: i32, y: i32, width: u32, height: u32, color: Color) {
    let Some((x0, y0, x1, y1)) = clip(surface, x as i64, y as i64, width as i64, height as i64) else {
        return;
    };
    let pixel: Rgb<u8> = color.into();
    for py in y0..y1 {
        for px in x0..x1 {
            surface.put_pixel(px, py, pixel);
        }
    }
}

/// One pixel wide outline along the inside of the rectangle.
pub fn draw_rect_outline(surface: &mut RgbImage, x: i32, y: i32, width: u32, height: u32, color: Color) {
    if width == 0 || height == 0 {
        return;
    }
    fill_rect(surface, x, y, width, 1, color);
    fill_rect(surface, x, y + height as i32 - 1, width, 1, color);
    fill_rect(surface, x, y, 1, height, color);
    fill_rect(surface, x + width as i32 - 1, y, 1, height, color);
}

/// Alpha blends `image` onto the surface with its top left corner at `(x, y)`.
pub fn blit(surface: &mut RgbImage, image: &RgbaImage, x: i32, y: i32) {
    let Some((x0, y0, x1, y1)) = clip(surface, x as i64, y as i64, image.width() as i64, image.height() as i64) else {
        return;
    };
    for py in y0..y1 {
        for px in x0..x1 {
            let src = image.get_pixel((px as i64 - x as i64) as u32, (py as i64 - y as i64) as u32);
            let alpha = src[3] as u32;
            if alpha == 0 {
                continue;
            }
            let dst = surface.get_pixel_mut(px, py);
            for c in 0..3 {
                dst[c] = ((src[c] as u32 * alpha + dst[c] as u32 * (255 - alpha)) / 255) as u8;
            }
        }
    }
}
