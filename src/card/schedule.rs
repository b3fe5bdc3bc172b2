//! Anime schedule card: up to eight thumbnails in two rows of four, each
//! with its wrapped title underneath.

use image::{Rgba, RgbaImage};

use crate::{render, util};

use super::{font_cache, templates, CardError, BLACK, NOTO_BOLD};

const CANVAS_W: u32 = 480;
const CANVAS_H: u32 = 540;

const BADGE_W: u32 = 150;
const BADGE_H: u32 = 40;
const BADGE_CENTER: (i64, i64) = (250, 40);

const ICON: &str = "anime.png";
const LABEL: &str = "今日新番";

const THUMB_MAX_W: u32 = 150;
const THUMB_MAX_H: u32 = 125;
const COLS: usize = 4;
const MAX_ITEMS: usize = 8;

const TITLE_WRAP_CHARS: usize = 7;

pub fn generate(payload: &serde_json::Value, color: Rgba<u8>) -> Result<RgbaImage, CardError> {
    let entries = payload
        .as_object()
        .ok_or_else(|| CardError::BadRequest("payload must map titles to thumbnails".into()))?;
    let items = entries
        .iter()
        .map(|(name, thumb)| {
            let thumb = thumb
                .as_str()
                .ok_or_else(|| CardError::BadRequest(format!("thumbnail for {name} must be a base64 string")))?;
            Ok((name.as_str(), thumb))
        })
        .collect::<Result<Vec<_>, CardError>>()?;

    let mut background = super::template_background(CANVAS_W, CANVAS_H, color);

    let icon = templates::load_template_cached(ICON)?;
    let badge = super::badge((BADGE_W, BADGE_H), LABEL, (40, 10), &icon, color)?;
    render::overlay_centered(&mut background, &badge, BADGE_CENTER, None)?;

    let bold = font_cache::load_font_cached(NOTO_BOLD)?;

    for (i, (name, thumb_b64)) in items.iter().enumerate() {
        if i >= MAX_ITEMS {
            break;
        }
        let col = (i % COLS) as i64;
        let row = i / COLS;

        let thumb = util::image_from_b64(thumb_b64, None)
            .map_err(|e| CardError::BadRequest(format!("invalid thumbnail for {name}: {e}")))?;
        let thumb = render::resize_to_fit(&thumb, THUMB_MAX_W, THUMB_MAX_H);

        let cy = if row == 0 { 150 } else { 350 };
        render::overlay_centered(&mut background, &thumb, (80 + col * 110, cy), None)?;

        let title = util::insert_newline(name, TITLE_WRAP_CHARS);
        let ty = if row == 0 { 220 } else { 420 };
        render::draw_multiline_text(
            &mut background,
            &bold,
            10.0,
            (40 + col as i32 * 115, ty),
            BLACK,
            &title,
        );
    }

    Ok(background)
}
