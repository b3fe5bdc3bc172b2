//! Quote-of-the-day card: a wrapped quote plus its attribution.

use image::{Rgba, RgbaImage};

use crate::{render, util};

use super::{font_cache, templates, CardError, FANG_TANG, NOTO_REGULAR};

const CANVAS_W: u32 = 480;
const CANVAS_H: u32 = 120;

const BADGE_W: u32 = 150;
const BADGE_H: u32 = 40;
const BADGE_CENTER: (i64, i64) = (240, 30);

const ICON: &str = "one.png";
const LABEL: &str = "每日一言";

const QUOTE_WRAP_CHARS: usize = 25;

pub fn generate(payload: &serde_json::Value, color: Rgba<u8>) -> Result<RgbaImage, CardError> {
    let quote = payload
        .get("hitokoto")
        .and_then(|v| v.as_str())
        .ok_or_else(|| CardError::BadRequest("missing hitokoto".into()))?;
    let author = payload
        .get("from")
        .and_then(|v| v.as_str())
        .ok_or_else(|| CardError::BadRequest("missing from".into()))?;

    let mut background = super::template_background(CANVAS_W, CANVAS_H, color);

    let icon = templates::load_template_cached(ICON)?;
    let badge = super::badge((BADGE_W, BADGE_H), LABEL, (40, 10), &icon, color)?;
    render::overlay_centered(&mut background, &badge, BADGE_CENTER, None)?;

    let fang_tang = font_cache::load_font_cached(FANG_TANG)?;
    let wrapped = util::insert_newline(quote, QUOTE_WRAP_CHARS);
    render::draw_multiline_text(&mut background, &fang_tang, 30.0, (20, 50), color, &wrapped);

    let regular = font_cache::load_font_cached(NOTO_REGULAR)?;
    let attribution = format!("--{author}");
    render::draw_multiline_text(&mut background, &regular, 20.0, (350, 80), color, &attribution);

    Ok(background)
}
