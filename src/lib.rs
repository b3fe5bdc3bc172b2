//! cardgen-backend
//!
//! Renders small PNG "card" images (daily news digests, hot-search lists,
//! festival countdowns, anime schedules, quote-of-the-day cards) by layering
//! rounded-rectangle backgrounds, a header badge, and localized text, and
//! serves them over HTTP as Base64-encoded PNGs.
//!
//! The module tree lives in the library so the binary stays a thin bootstrap
//! and the `tests/` directory can drive the router directly.

pub mod api;
pub mod apikey;
pub mod card;
pub mod openapi;
pub mod render;
pub mod util;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub api_keys: Arc<apikey::ApiKeys>,
}
