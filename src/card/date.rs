//! Weekday/date mini card, composited into briefing panels by clients.

use image::{Rgba, RgbaImage};

use super::{font_cache, CardError, FANG_TANG};
use crate::render;

const CANVAS_W: u32 = 140;
const CANVAS_H: u32 = 120;

const WEEKDAYS: [&str; 7] = [
    "星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日",
];

pub fn generate(payload: &serde_json::Value, color: Rgba<u8>) -> Result<RgbaImage, CardError> {
    let week = payload
        .get("week")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| CardError::BadRequest("missing week index".into()))?;
    let weekday = WEEKDAYS
        .get(week as usize)
        .ok_or_else(|| CardError::BadRequest(format!("week index out of range: {week}")))?;
    let date = payload
        .get("date")
        .and_then(|v| v.as_str())
        .ok_or_else(|| CardError::BadRequest("missing date".into()))?;

    let fang_tang = font_cache::load_font_cached(FANG_TANG)?;

    let mut card = RgbaImage::new(CANVAS_W, CANVAS_H);
    render::draw_multiline_text(&mut card, &fang_tang, 50.0, (10, 5), color, weekday);
    render::draw_multiline_text(&mut card, &fang_tang, 20.0, (10, 70), color, date);

    Ok(card)
}
