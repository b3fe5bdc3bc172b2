//! Base64/PNG plumbing and the string utilities shared by the card
//! generators (CJK punctuation remap, ellipsis truncation, fixed-width
//! line breaking).

use base64::Engine;
use image::RgbaImage;

pub fn parse_data_uri(input: &str) -> Option<String> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(rest) = s.strip_prefix("data:") {
        // data:image/png;base64,....
        let (_, b64) = rest.split_once(',')?;
        return Some(b64.trim().to_string());
    }
    // assume plain base64
    Some(s.to_string())
}

pub fn b64_decode(input: &str) -> Option<Vec<u8>> {
    let b64 = parse_data_uri(input)?;
    let engine = base64::engine::general_purpose::STANDARD;
    engine.decode(b64.as_bytes()).ok()
}

pub fn b64_encode(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub fn png_encode_rgba8(img: &RgbaImage) -> Result<Vec<u8>, String> {
    use image::ImageEncoder;
    let mut png = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png);
    encoder
        .write_image(img.as_raw(), img.width(), img.height(), image::ColorType::Rgba8)
        .map_err(|e| e.to_string())?;
    Ok(png)
}

/// Decode a Base64 (or `data:` URI) image into RGBA, optionally resizing
/// to an exact target size with Lanczos3.
pub fn image_from_b64(b64: &str, target_size: Option<(u32, u32)>) -> Result<RgbaImage, String> {
    let bytes = b64_decode(b64).ok_or_else(|| "invalid base64 image".to_string())?;
    let img = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;
    let mut img = img.to_rgba8();
    if let Some((w, h)) = target_size {
        if img.dimensions() != (w, h) {
            img = image::imageops::resize(&img, w, h, image::imageops::FilterType::Lanczos3);
        }
    }
    Ok(img)
}

const PUNCTUATION_MAP: &[(&str, &str)] = &[
    ("，", ","),
    ("。", "."),
    ("！", "!"),
    ("？", "?"),
    ("；", ";"),
    ("：", ":"),
    ("\u{201C}", "\""),
    ("\u{201D}", "\""),
    ("\u{2018}", "'"),
    ("\u{2019}", "'"),
    ("（", "("),
    ("）", ")"),
    ("《", "<"),
    ("》", ">"),
    ("【", "["),
    ("】", "]"),
    ("、", ","),
    ("—", "-"),
    ("…", "..."),
];

/// Remap common CJK punctuation to Latin equivalents.
pub fn normalize_punctuation(s: &str) -> String {
    let mut out = s.to_string();
    for (cjk, latin) in PUNCTUATION_MAP {
        if out.contains(cjk) {
            out = out.replace(cjk, latin);
        }
    }
    out
}

/// Normalize punctuation, then truncate to at most `max_chars` characters,
/// spending the last three on "..." when the input is over the limit.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    let s = normalize_punctuation(s);
    if s.chars().count() <= max_chars {
        return s;
    }
    if max_chars <= 3 {
        return "...".to_string();
    }
    let head: String = s.chars().take(max_chars - 3).collect();
    head + "..."
}

/// Break `text` into `max_chars`-character segments separated by a blank
/// line. Every segment gets a trailing separator; the text renderer
/// advances past blank lines, so the last one is invisible.
pub fn insert_newline(text: &str, max_chars: usize) -> String {
    let max_chars = max_chars.max(1);
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 2 * (chars.len() / max_chars + 1));
    for chunk in chars.chunks(max_chars) {
        out.extend(chunk.iter());
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_is_unwrapped() {
        assert_eq!(
            parse_data_uri("data:image/png;base64,AAAA").as_deref(),
            Some("AAAA")
        );
        assert_eq!(parse_data_uri(" AAAA ").as_deref(), Some("AAAA"));
        assert_eq!(parse_data_uri(""), None);
    }

    #[test]
    fn b64_round_trip() {
        let bytes = b"card bytes";
        assert_eq!(b64_decode(&b64_encode(bytes)).unwrap(), bytes);
    }

    #[test]
    fn png_encode_produces_a_decodable_png() {
        let img = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
        let png = png_encode_rgba8(&img).unwrap();
        let back = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (3, 2));
        assert_eq!(back.get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn image_from_b64_resizes_exactly() {
        let img = RgbaImage::from_pixel(8, 8, image::Rgba([7, 7, 7, 255]));
        let b64 = b64_encode(&png_encode_rgba8(&img).unwrap());
        let out = image_from_b64(&b64, Some((4, 2))).unwrap();
        assert_eq!(out.dimensions(), (4, 2));
    }

    #[test]
    fn image_from_b64_rejects_garbage() {
        assert!(image_from_b64("not base64!!!", None).is_err());
        assert!(image_from_b64(&b64_encode(b"not a png"), None).is_err());
    }

    #[test]
    fn punctuation_is_remapped() {
        assert_eq!(normalize_punctuation("你好，世界。"), "你好,世界.");
        assert_eq!(normalize_punctuation("《书》…"), "<书>...");
    }

    #[test]
    fn truncation_never_exceeds_the_limit() {
        for len in 0..60 {
            let s: String = std::iter::repeat('字').take(len).collect();
            let out = truncate_with_ellipsis(&s, 12);
            assert!(out.chars().count() <= 12, "len {len}: {out:?}");
        }
    }

    #[test]
    fn truncation_appends_ellipsis_exactly_when_over_limit() {
        assert_eq!(truncate_with_ellipsis("short", 12), "short");
        assert_eq!(truncate_with_ellipsis("exactly12chr", 12), "exactly12chr");
        let out = truncate_with_ellipsis("thirteen chars", 12);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 12);
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let s = "一二三四五六七八九十一二三四";
        let out = truncate_with_ellipsis(s, 12);
        assert_eq!(out, "一二三四五六七八九...");
    }

    #[test]
    fn insert_newline_segments_never_exceed_width() {
        for len in 1..40 {
            let s: String = std::iter::repeat('番').take(len).collect();
            let out = insert_newline(&s, 7);
            for seg in out.split('\n') {
                assert!(seg.chars().count() <= 7, "len {len}: {seg:?}");
            }
        }
    }

    #[test]
    fn insert_newline_keeps_all_content_in_order() {
        let out = insert_newline("abcdefghij", 4);
        let joined: String = out.split('\n').collect();
        assert_eq!(joined, "abcdefghij");
    }
}
