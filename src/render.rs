//! Shared pixel-level drawing helpers used by every card generator:
//! hex colors, rounded rectangles, centered alpha compositing, tinting,
//! resizing, and font-based text.

use image::{imageops::FilterType, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("overlay exceeds background bounds")]
    OverlayOutOfBounds,
}

pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>, RenderError> {
    let t = s.trim();
    let t = t.strip_prefix('#').unwrap_or(t);
    if t.len() != 6 {
        return Err(RenderError::InvalidColor(s.to_string()));
    }
    let b = hex::decode(t).map_err(|_| RenderError::InvalidColor(s.to_string()))?;
    Ok(Rgba([b[0], b[1], b[2], 255]))
}

pub fn format_hex_color(c: Rgba<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", c.0[0], c.0[1], c.0[2])
}

/// Signed distance from a point to the boundary of a rounded rectangle
/// spanning `[0, w] x [0, h]` with corner radius `r`. Negative inside.
fn rounded_rect_dist(x: f32, y: f32, w: f32, h: f32, r: f32) -> f32 {
    let cx = w / 2.0;
    let cy = h / 2.0;
    let qx = (x - cx).abs() - (cx - r);
    let qy = (y - cy).abs() - (cy - r);
    let ox = qx.max(0.0);
    let oy = qy.max(0.0);
    (ox * ox + oy * oy).sqrt() + qx.max(qy).min(0.0) - r
}

/// Draw a rounded rectangle between `top_left` and `bottom_right`
/// (both inclusive, as corner pixels).
///
/// - the interior mask is painted with `fill` (alpha 255) when given;
/// - the area outside the mask is painted with `side` at alpha 0 when given
///   (the RGB channels carry the side color, the pixel stays transparent);
/// - a border band of `thickness` is stroked along the boundary last.
///
/// Caller guarantees `radius <= min(width, height) / 2`.
#[allow(clippy::too_many_arguments)]
pub fn draw_rounded_rect(
    img: &mut RgbaImage,
    top_left: (u32, u32),
    bottom_right: (u32, u32),
    radius: u32,
    border: Rgba<u8>,
    thickness: u32,
    fill: Option<Rgba<u8>>,
    side: Option<Rgba<u8>>,
) {
    let (x0, y0) = top_left;
    let (x1, y1) = bottom_right;
    let w = (x1 - x0 + 1) as f32;
    let h = (y1 - y0 + 1) as f32;
    let r = radius as f32;
    let half_t = thickness as f32 / 2.0;

    for py in 0..img.height() {
        for px in 0..img.width() {
            // pixel center, relative to the rectangle
            let lx = px as f32 - x0 as f32 + 0.5;
            let ly = py as f32 - y0 as f32 + 0.5;
            let d = rounded_rect_dist(lx, ly, w, h, r);

            let p = img.get_pixel_mut(px, py);
            if d <= 0.0 {
                if let Some(f) = fill {
                    *p = Rgba([f.0[0], f.0[1], f.0[2], 255]);
                }
            } else if let Some(s) = side {
                *p = Rgba([s.0[0], s.0[1], s.0[2], 0]);
            }
            if d.abs() <= half_t {
                *p = border;
            }
        }
    }
}

/// Allocate a transparent canvas and draw a rounded rectangle spanning it.
pub fn create_rounded_rectangle(
    width: u32,
    height: u32,
    radius: u32,
    border: Rgba<u8>,
    thickness: u32,
    fill: Option<Rgba<u8>>,
    side: Option<Rgba<u8>>,
) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    draw_rounded_rect(
        &mut img,
        (0, 0),
        (width - 1, height - 1),
        radius,
        border,
        thickness,
        fill,
        side,
    );
    img
}

/// Alpha-composite `overlay` onto `base` so its center lands on `center`.
///
/// Fully transparent overlay pixels keep the background RGB unless `fill`
/// supplies a replacement. The result alpha is the per-pixel max of both
/// buffers. Fails when the overlay footprint does not fit inside `base`.
pub fn overlay_centered(
    base: &mut RgbaImage,
    overlay: &RgbaImage,
    center: (i64, i64),
    fill: Option<Rgba<u8>>,
) -> Result<(), RenderError> {
    let (ow, oh) = overlay.dimensions();
    let x = center.0 - ow as i64 / 2;
    let y = center.1 - oh as i64 / 2;

    if x < 0 || y < 0 || x + ow as i64 > base.width() as i64 || y + oh as i64 > base.height() as i64
    {
        return Err(RenderError::OverlayOutOfBounds);
    }
    let (x, y) = (x as u32, y as u32);

    for oy in 0..oh {
        for ox in 0..ow {
            let p = overlay.get_pixel(ox, oy);
            let dst = base.get_pixel_mut(x + ox, y + oy);
            if p.0[3] == 0 {
                if let Some(f) = fill {
                    dst.0[0] = f.0[0];
                    dst.0[1] = f.0[1];
                    dst.0[2] = f.0[2];
                }
            } else {
                let a = p.0[3] as f32 / 255.0;
                let inv = 1.0 - a;
                dst.0[0] = (p.0[0] as f32 * a + dst.0[0] as f32 * inv) as u8;
                dst.0[1] = (p.0[1] as f32 * a + dst.0[1] as f32 * inv) as u8;
                dst.0[2] = (p.0[2] as f32 * a + dst.0[2] as f32 * inv) as u8;
            }
            dst.0[3] = dst.0[3].max(p.0[3]);
        }
    }
    Ok(())
}

/// Replace the RGB channels with `color`, keeping the source alpha.
/// Used to recolor badge icon templates to the card's accent color.
pub fn tint(img: &RgbaImage, color: Rgba<u8>) -> RgbaImage {
    let mut out = RgbaImage::new(img.width(), img.height());
    for (x, y, p) in img.enumerate_pixels() {
        out.put_pixel(x, y, Rgba([color.0[0], color.0[1], color.0[2], p.0[3]]));
    }
    out
}

pub fn set_alpha(img: &mut RgbaImage, alpha: u8) {
    for p in img.pixels_mut() {
        p.0[3] = alpha;
    }
}

/// Shrink an image to fit inside `max_w x max_h`, preserving aspect ratio.
/// Images already within bounds are returned unchanged.
pub fn resize_to_fit(img: &RgbaImage, max_w: u32, max_h: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w <= max_w && h <= max_h {
        return img.clone();
    }
    let ratio = (max_w as f32 / w as f32).min(max_h as f32 / h as f32);
    let nw = ((w as f32 * ratio) as u32).max(1);
    let nh = ((h as f32 * ratio) as u32).max(1);
    image::imageops::resize(img, nw, nh, FilterType::Lanczos3)
}

/// Vertical advance per text line: the glyph bounding-box height of 'A'.
fn line_height(font: &Font<'_>, scale: Scale) -> f32 {
    let vm = font.v_metrics(scale);
    font.glyph('A')
        .scaled(scale)
        .exact_bounding_box()
        .map(|bb| bb.height())
        .unwrap_or(vm.ascent - vm.descent)
}

/// Draw possibly-multi-line text at `pos` (top-left of the first line).
/// Lines are split on `'\n'`; empty lines advance the cursor without drawing.
/// No wrapping here: long labels go through `util::insert_newline` first.
pub fn draw_multiline_text(
    img: &mut RgbaImage,
    font: &Font<'static>,
    px: f32,
    pos: (i32, i32),
    color: Rgba<u8>,
    text: &str,
) {
    let scale = Scale::uniform(px);
    let lh = line_height(font, scale);
    let mut y = pos.1 as f32;
    for line in text.split('\n') {
        if !line.is_empty() {
            draw_line(img, font, scale, pos.0 as f32, y, color, line);
        }
        y += lh;
    }
}

fn draw_line(
    img: &mut RgbaImage,
    font: &Font<'static>,
    scale: Scale,
    x: f32,
    y: f32,
    color: Rgba<u8>,
    line: &str,
) {
    let vm = font.v_metrics(scale);
    for glyph in font.layout(line, scale, point(x, y + vm.ascent)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if px >= img.width() || py >= img.height() {
                    return;
                }
                let a = (v * 255.0) as u8;
                if a == 0 {
                    return;
                }
                let dst = img.get_pixel_mut(px, py);
                let sa = a as f32 / 255.0;
                let inv = 1.0 - sa;
                dst.0[0] = (color.0[0] as f32 * sa + dst.0[0] as f32 * inv) as u8;
                dst.0[1] = (color.0[1] as f32 * sa + dst.0[1] as f32 * inv) as u8;
                dst.0[2] = (color.0[2] as f32 * sa + dst.0[2] as f32 * inv) as u8;
                dst.0[3] = 255;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_parses_with_and_without_hash() {
        assert_eq!(parse_hex_color("#FF8000").unwrap(), Rgba([255, 128, 0, 255]));
        assert_eq!(parse_hex_color("ff8000").unwrap(), Rgba([255, 128, 0, 255]));
    }

    #[test]
    fn hex_color_rejects_garbage() {
        assert!(parse_hex_color("#FFF").is_err());
        assert!(parse_hex_color("#GGGGGG").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn hex_color_round_trips_strided() {
        // Full sweep of two channels, third strided; the exhaustive sweep
        // lives in `hex_color_round_trips_exhaustive`.
        for r in (0..=255u32).step_by(17) {
            for g in 0..=255u32 {
                for b in 0..=255u32 {
                    let c = Rgba([r as u8, g as u8, b as u8, 255]);
                    let s = format_hex_color(c);
                    assert_eq!(parse_hex_color(&s).unwrap(), c, "{s}");
                }
            }
        }
    }

    #[test]
    #[ignore = "24-bit exhaustive sweep; run with --ignored"]
    fn hex_color_round_trips_exhaustive() {
        for rgb in 0..=0xFF_FF_FFu32 {
            let c = Rgba([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255]);
            assert_eq!(parse_hex_color(&format_hex_color(c)).unwrap(), c);
        }
    }

    #[test]
    fn opaque_overlay_is_a_direct_copy() {
        let mut base = RgbaImage::from_pixel(10, 10, Rgba([1, 2, 3, 255]));
        let overlay = RgbaImage::from_pixel(4, 4, Rgba([200, 100, 50, 255]));
        overlay_centered(&mut base, &overlay, (5, 5), None).unwrap();
        for oy in 0..4 {
            for ox in 0..4 {
                assert_eq!(*base.get_pixel(3 + ox, 3 + oy), Rgba([200, 100, 50, 255]));
            }
        }
        // untouched outside the footprint
        assert_eq!(*base.get_pixel(0, 0), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn overlay_out_of_bounds_is_rejected() {
        let mut base = RgbaImage::new(10, 10);
        let overlay = RgbaImage::new(4, 4);
        // center too close to the left edge: x = 1 - 2 < 0
        assert!(matches!(
            overlay_centered(&mut base, &overlay, (1, 5), None),
            Err(RenderError::OverlayOutOfBounds)
        ));
        // footprint sticking out on the right
        assert!(matches!(
            overlay_centered(&mut base, &overlay, (9, 5), None),
            Err(RenderError::OverlayOutOfBounds)
        ));
        // overlay bigger than the base
        let big = RgbaImage::new(12, 12);
        assert!(overlay_centered(&mut base, &big, (5, 5), None).is_err());
    }

    #[test]
    fn transparent_overlay_pixels_take_the_fallback_rgb() {
        let mut base = RgbaImage::from_pixel(6, 6, Rgba([9, 9, 9, 128]));
        let overlay = RgbaImage::new(2, 2); // all transparent
        overlay_centered(&mut base, &overlay, (3, 3), Some(Rgba([255, 0, 0, 255]))).unwrap();
        let p = base.get_pixel(2, 2);
        assert_eq!((p.0[0], p.0[1], p.0[2]), (255, 0, 0));
        // alpha follows max(bg, overlay), not the fallback
        assert_eq!(p.0[3], 128);
    }

    #[test]
    fn transparent_overlay_pixels_keep_background_without_fallback() {
        let mut base = RgbaImage::from_pixel(6, 6, Rgba([9, 8, 7, 200]));
        let overlay = RgbaImage::new(2, 2);
        overlay_centered(&mut base, &overlay, (3, 3), None).unwrap();
        assert_eq!(*base.get_pixel(2, 2), Rgba([9, 8, 7, 200]));
    }

    #[test]
    fn semi_transparent_overlay_blends() {
        let mut base = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let overlay = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 128]));
        overlay_centered(&mut base, &overlay, (2, 2), None).unwrap();
        let p = base.get_pixel(1, 1);
        assert_eq!(p.0[0], 128);
        assert_eq!(p.0[3], 255);
    }

    #[test]
    fn rounded_rect_fill_covers_center_and_spares_corners() {
        let img = create_rounded_rectangle(
            40,
            40,
            10,
            Rgba([0, 0, 255, 255]),
            2,
            Some(Rgba([255, 255, 255, 255])),
            None,
        );
        assert_eq!(*img.get_pixel(20, 20), Rgba([255, 255, 255, 255]));
        // extreme corner pixel lies outside the rounded mask and was not set
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn rounded_rect_side_color_keeps_zero_alpha() {
        let img = create_rounded_rectangle(
            40,
            40,
            10,
            Rgba([0, 0, 0, 255]),
            2,
            Some(Rgba([255, 255, 255, 255])),
            Some(Rgba([10, 20, 30, 255])),
        );
        let corner = img.get_pixel(0, 0);
        assert_eq!((corner.0[0], corner.0[1], corner.0[2]), (10, 20, 30));
        assert_eq!(corner.0[3], 0);
    }

    #[test]
    fn tint_keeps_alpha() {
        let mut src = RgbaImage::new(2, 2);
        src.put_pixel(0, 0, Rgba([1, 1, 1, 77]));
        let out = tint(&src, Rgba([10, 20, 30, 255]));
        assert_eq!(*out.get_pixel(0, 0), Rgba([10, 20, 30, 77]));
        assert_eq!(*out.get_pixel(1, 1), Rgba([10, 20, 30, 0]));
    }

    #[test]
    fn resize_to_fit_only_shrinks() {
        let small = RgbaImage::new(50, 40);
        assert_eq!(resize_to_fit(&small, 150, 125).dimensions(), (50, 40));

        let wide = RgbaImage::new(300, 125);
        let out = resize_to_fit(&wide, 150, 125);
        assert_eq!(out.dimensions().0, 150);
        assert!(out.dimensions().1 <= 125);
    }
}
