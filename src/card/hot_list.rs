//! Hot-search list card: one bulleted line per trending keyword.

use image::{Rgba, RgbaImage};

use crate::{render, util};

use super::{font_cache, templates, CardError, BLACK, NOTO_BOLD, WHITE};

const CANVAS_W: u32 = 250;
const CANVAS_H: u32 = 400;

const BADGE_W: u32 = 125;
const BADGE_H: u32 = 40;
const BADGE_CENTER: (i64, i64) = (150, 40);

const ICON: &str = "bili.png";
const LABEL: &str = "bili 热搜";

const LINE_MAX_CHARS: usize = 38;

pub fn generate(payload: &serde_json::Value, color: Rgba<u8>) -> Result<RgbaImage, CardError> {
    let list = payload
        .get("list")
        .and_then(|v| v.as_array())
        .ok_or_else(|| CardError::BadRequest("missing list array".into()))?;
    let keywords = list
        .iter()
        .map(|entry| {
            entry
                .get("keyword")
                .and_then(|v| v.as_str())
                .ok_or_else(|| CardError::BadRequest("list entries must carry a keyword".into()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut background = super::template_background(CANVAS_W, CANVAS_H, color);

    let icon = templates::load_template_cached(ICON)?;
    let badge = super::badge((BADGE_W, BADGE_H), LABEL, (40, 10), &icon, color)?;
    render::overlay_centered(&mut background, &badge, BADGE_CENTER, Some(WHITE))?;

    let bold = font_cache::load_font_cached(NOTO_BOLD)?;
    for (i, keyword) in keywords.iter().enumerate() {
        let line = format!("·  {}", util::truncate_with_ellipsis(keyword, LINE_MAX_CHARS));
        render::draw_multiline_text(&mut background, &bold, 12.0, (20, 70 + i as i32 * 30), BLACK, &line);
    }

    Ok(background)
}
