//! Festival countdown card: one "距离 … 还剩 … 天" row per festival.

use image::{Rgba, RgbaImage};

use super::{font_cache, templates, CardError, BLACK, FANG_TANG, NOTO_BOLD};
use crate::render;

const CANVAS_W: u32 = 200;
const CANVAS_H: u32 = 400;

const BADGE_W: u32 = 150;
const BADGE_H: u32 = 40;
const BADGE_CENTER: (i64, i64) = (125, 40);

const ICON: &str = "fish.png";
const LABEL: &str = "摸鱼日历";

// row scaffold; the festival name and day count are drawn into the gaps
const ROW_TEXT: &str = "距离                  还剩             天";
const ROW_Y0: i32 = 70;
const ROW_STEP: i32 = 40;

pub fn generate(payload: &serde_json::Value, color: Rgba<u8>) -> Result<RgbaImage, CardError> {
    let entries = payload
        .as_object()
        .ok_or_else(|| CardError::BadRequest("payload must map festival names to days".into()))?;
    let rows = entries
        .iter()
        .map(|(festival, days)| {
            let days = match days {
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::String(s) => s.clone(),
                _ => {
                    return Err(CardError::BadRequest(format!(
                        "days for {festival} must be a number or string"
                    )))
                }
            };
            Ok((festival.as_str(), days))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut background = super::template_background(CANVAS_W, CANVAS_H, color);

    let icon = templates::load_template_cached(ICON)?;
    let badge = super::badge((BADGE_W, BADGE_H), LABEL, (40, 10), &icon, color)?;

    let bold = font_cache::load_font_cached(NOTO_BOLD)?;
    let fang_tang = font_cache::load_font_cached(FANG_TANG)?;

    for (i, (festival, days)) in rows.iter().enumerate() {
        let y = ROW_Y0 + i as i32 * ROW_STEP;
        render::draw_multiline_text(&mut background, &bold, 15.0, (20, y), BLACK, ROW_TEXT);
        render::draw_multiline_text(&mut background, &fang_tang, 25.0, (57, y), color, festival);
        // day counts line up right-aligned over three columns
        let days = format!("{days:>3}");
        render::draw_multiline_text(&mut background, &bold, 17.0, (140, y), color, &days);
    }

    render::overlay_centered(&mut background, &badge, BADGE_CENTER, None)?;

    Ok(background)
}
