//! API keys live in a JSON file `{ "key": "client name" }`. The file is
//! hand-edited in deployments, so the in-memory view auto-reloads whenever
//! the file mtime changes. A missing file means an empty key set.

use parking_lot::RwLock;
use std::{collections::HashMap, fs, path::PathBuf, time::SystemTime};

#[derive(Default)]
pub struct ApiKeys {
    path: PathBuf,
    mtime: RwLock<Option<SystemTime>>,
    inner: RwLock<HashMap<String, String>>, // key -> name
}

impl ApiKeys {
    pub fn load(path: Option<&str>) -> std::io::Result<Self> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/api_keys.json"));

        let this = Self {
            path,
            mtime: RwLock::new(None),
            inner: RwLock::new(HashMap::new()),
        };
        // best-effort preload
        this.refresh();
        Ok(this)
    }

    fn refresh(&self) {
        let meta = match fs::metadata(&self.path) {
            Ok(m) => m,
            Err(_) => {
                *self.inner.write() = HashMap::new();
                *self.mtime.write() = None;
                return;
            }
        };

        let mtime = meta.modified().ok();
        let prev = *self.mtime.read();
        if mtime.is_some() && mtime == prev {
            return;
        }

        if let Ok(text) = fs::read_to_string(&self.path) {
            if let Ok(map) = serde_json::from_str::<HashMap<String, String>>(&text) {
                *self.inner.write() = map;
                *self.mtime.write() = mtime;
                return;
            }
        }

        // broken JSON is treated as an empty key set
        *self.inner.write() = HashMap::new();
        *self.mtime.write() = mtime;
    }

    pub fn validate(&self, key: &str) -> bool {
        self.refresh();
        self.inner.read().contains_key(key)
    }

    pub fn name(&self, key: &str) -> Option<String> {
        self.refresh();
        self.inner.read().get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_key_file(contents: &str) -> PathBuf {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static SEQ: AtomicUsize = AtomicUsize::new(0);
        let path = std::env::temp_dir().join(format!(
            "cardgen-apikeys-{}-{}.json",
            std::process::id(),
            SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_means_no_keys() {
        let keys = ApiKeys::load(Some("/nonexistent/api_keys.json")).unwrap();
        assert!(!keys.validate("anything"));
        assert_eq!(keys.name("anything"), None);
    }

    #[test]
    fn keys_resolve_to_client_names() {
        let path = temp_key_file(r#"{"api_abc": "briefing-bot"}"#);
        let keys = ApiKeys::load(path.to_str()).unwrap();
        assert!(keys.validate("api_abc"));
        assert_eq!(keys.name("api_abc").as_deref(), Some("briefing-bot"));
        assert!(!keys.validate("api_other"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn broken_json_is_an_empty_key_set() {
        let path = temp_key_file("{not json");
        let keys = ApiKeys::load(path.to_str()).unwrap();
        assert!(!keys.validate("api_abc"));
        let _ = fs::remove_file(path);
    }
}
