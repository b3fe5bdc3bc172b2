//! Tall briefing panel: an accent-colored page with a translucent white
//! rounded panel centered on it. Other cards get composited onto this by
//! clients assembling a full briefing poster.

use image::{Rgba, RgbaImage};

use super::{CardError, WHITE};
use crate::render;

const PAGE_W: u32 = 578;
const PAGE_H: u32 = 1885;

const PANEL_W: u32 = 552;
const PANEL_H: u32 = 1852;
const PANEL_RADIUS: u32 = 25;
const PANEL_BORDER: u32 = 10;
const PANEL_ALPHA: u8 = 233;

pub fn generate(color: Rgba<u8>) -> Result<RgbaImage, CardError> {
    let mut page = RgbaImage::from_pixel(
        PAGE_W,
        PAGE_H,
        Rgba([color.0[0], color.0[1], color.0[2], 255]),
    );

    let mut panel = render::create_rounded_rectangle(
        PANEL_W,
        PANEL_H,
        PANEL_RADIUS,
        WHITE,
        PANEL_BORDER,
        Some(WHITE),
        Some(color),
    );
    render::set_alpha(&mut panel, PANEL_ALPHA);

    let center = (PAGE_W as i64 / 2, PAGE_H as i64 / 2);
    render::overlay_centered(&mut page, &panel, center, Some(color))?;

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_needs_no_payload_or_assets() {
        let page = generate(Rgba([75, 97, 121, 255])).unwrap();
        assert_eq!(page.dimensions(), (PAGE_W, PAGE_H));
        // page stays opaque, panel interior blends towards white
        let center = page.get_pixel(PAGE_W / 2, PAGE_H / 2);
        assert_eq!(center.0[3], 255);
        assert!(center.0[0] > 75 && center.0[1] > 97 && center.0[2] > 121);
    }
}
