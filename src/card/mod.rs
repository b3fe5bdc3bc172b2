//! Card generators. Each card is a fixed recipe over the shared drawing
//! helpers in [`crate::render`]: rounded-rectangle background, header badge,
//! payload items at hard-coded offsets.

pub mod countdown;
pub mod date;
pub mod digest;
pub mod hot_list;
pub mod panel;
pub mod quote;
pub mod schedule;

mod font_cache;
mod templates;

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::render::{self, RenderError};

pub const NOTO_BOLD: &str = "NotoSansSC-Bold.ttf";
pub const NOTO_REGULAR: &str = "NotoSansSC-Regular.ttf";
pub const FANG_TANG: &str = "SSFangTangTi.ttf";

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

#[derive(Debug, Error)]
pub enum CardError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unknown card: {0}")]
    UnknownCard(String),
    #[error("render: {0}")]
    Render(#[from] RenderError),
    #[error("image: {0}")]
    Image(String),
    #[error("internal: {0}")]
    Internal(String),
}

/// Dispatch a card by name. The aliases are the service names the legacy
/// clients send.
pub fn generate(
    card: &str,
    color: Rgba<u8>,
    payload: &serde_json::Value,
) -> Result<RgbaImage, CardError> {
    match card {
        "digest" | "60s" => digest::generate(payload, color),
        "hot" | "bili" => hot_list::generate(payload, color),
        "countdown" | "fish" => countdown::generate(payload, color),
        "schedule" | "anime" => schedule::generate(payload, color),
        "quote" | "one" => quote::generate(payload, color),
        "date" => date::generate(payload, color),
        "panel" => panel::generate(color),
        other => Err(CardError::UnknownCard(other.to_string())),
    }
}

pub fn card_names() -> &'static [&'static str] {
    &["digest", "hot", "countdown", "schedule", "quote", "date", "panel"]
}

/// Card index served by `GET /cards`.
pub fn catalog() -> serde_json::Value {
    serde_json::json!({
        "digest": {
            "aliases": ["60s"],
            "canvas": [480, 540],
            "payload": {"data": {"news": ["...strings"]}}
        },
        "hot": {
            "aliases": ["bili"],
            "canvas": [250, 400],
            "payload": {"list": [{"keyword": "..."}]}
        },
        "countdown": {
            "aliases": ["fish"],
            "canvas": [200, 400],
            "payload": {"<festival>": "days remaining"}
        },
        "schedule": {
            "aliases": ["anime"],
            "canvas": [480, 540],
            "payload": {"<title>": "<base64 thumbnail>"}
        },
        "quote": {
            "aliases": ["one"],
            "canvas": [480, 120],
            "payload": {"hitokoto": "...", "from": "..."}
        },
        "date": {
            "aliases": [],
            "canvas": [140, 120],
            "payload": {"week": "0-6", "date": "..."}
        },
        "panel": {
            "aliases": [],
            "canvas": [578, 1885],
            "payload": {}
        }
    })
}

/// Bordered rounded-rectangle background every list-style card starts from.
pub(crate) fn template_background(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    render::create_rounded_rectangle(width, height, 15, color, 5, None, None)
}

/// Header badge: label text in the accent color, icon template composited
/// with its center at (20, 20).
pub(crate) fn badge(
    size: (u32, u32),
    label: &str,
    text_pos: (i32, i32),
    icon: &RgbaImage,
    color: Rgba<u8>,
) -> Result<RgbaImage, CardError> {
    let bold = font_cache::load_font_cached(NOTO_BOLD)?;
    let mut img = RgbaImage::new(size.0, size.1);
    render::draw_multiline_text(&mut img, &bold, 15.0, text_pos, color, label);
    render::overlay_centered(&mut img, icon, (20, 20), None)?;
    Ok(img)
}
