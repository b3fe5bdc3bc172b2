//! Badge icon templates, loaded once per process from `assets/image/`.

use image::RgbaImage;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::{collections::HashMap, path::PathBuf, sync::Arc};

use super::CardError;

static TEMPLATE_CACHE: Lazy<Mutex<HashMap<String, Arc<RgbaImage>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn images_dir() -> PathBuf {
    let project_root = std::env::var("PROJECT_ROOT").ok().unwrap_or_else(|| {
        let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
        manifest_dir.to_string_lossy().to_string()
    });
    PathBuf::from(project_root).join("assets").join("image")
}

pub fn load_template_cached(name: &str) -> Result<Arc<RgbaImage>, CardError> {
    if let Some(t) = TEMPLATE_CACHE.lock().get(name) {
        return Ok(Arc::clone(t));
    }

    let path = images_dir().join(name);
    let img = image::open(&path)
        .map_err(|e| CardError::Internal(format!("failed to load template {name}: {e}")))?
        .to_rgba8();

    let img = Arc::new(img);
    TEMPLATE_CACHE.lock().insert(name.to_string(), Arc::clone(&img));
    Ok(img)
}
