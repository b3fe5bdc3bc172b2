//! "60 seconds of world news" digest card: header badge with a tinted
//! globe icon, then one bulleted line per news item.

use image::{Rgba, RgbaImage};

use crate::{render, util};

use super::{font_cache, templates, CardError, BLACK, NOTO_BOLD, WHITE};

const CANVAS_W: u32 = 480;
const CANVAS_H: u32 = 540;

const BADGE_W: u32 = 150;
const BADGE_H: u32 = 40;
const BADGE_CENTER: (i64, i64) = (250, 40);

const ICON: &str = "60s.png";
const LABEL: &str = "60S看世界";

const LINE_MAX_CHARS: usize = 38;
const LINE_X: i32 = 20;
const LINE_Y0: i32 = 70;
const LINE_STEP: i32 = 30;

pub fn generate(payload: &serde_json::Value, color: Rgba<u8>) -> Result<RgbaImage, CardError> {
    let news = payload
        .get("data")
        .and_then(|v| v.get("news"))
        .and_then(|v| v.as_array())
        .ok_or_else(|| CardError::BadRequest("missing data.news array".into()))?;
    let items = news
        .iter()
        .map(|v| v.as_str().ok_or_else(|| CardError::BadRequest("news items must be strings".into())))
        .collect::<Result<Vec<_>, _>>()?;

    let mut background = super::template_background(CANVAS_W, CANVAS_H, color);

    // the digest icon ships as a transparent shape; recolor it to the accent
    let icon = render::tint(&*templates::load_template_cached(ICON)?, color);
    let badge = super::badge((BADGE_W, BADGE_H), LABEL, (30, 8), &icon, color)?;
    render::overlay_centered(&mut background, &badge, BADGE_CENTER, Some(WHITE))?;

    let bold = font_cache::load_font_cached(NOTO_BOLD)?;
    for (i, item) in items.iter().enumerate() {
        let line = format!("·  {}", util::truncate_with_ellipsis(item, LINE_MAX_CHARS));
        render::draw_multiline_text(
            &mut background,
            &bold,
            12.0,
            (LINE_X, LINE_Y0 + i as i32 * LINE_STEP),
            BLACK,
            &line,
        );
    }

    Ok(background)
}
