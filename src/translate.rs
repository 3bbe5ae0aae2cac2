// translate.rs: part identifier → Catalan display label.
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct Translator {
    left_marker:  String,
    right_marker: String,
    names:        HashMap<String, String>,
}

impl Translator {
    pub fn load() -> crate::error::Result<Self> { crate::json_loader::load("translations.json") }

    /// `femur_L` → `Fèmur (E)`. Only `_L` / `_R` count as laterality, so
    /// `lower_back` stays a single identifier. Unknown bases pass through.
    pub fn translate(&self, name: &str) -> String {
        let (base, marker) = match (name.strip_suffix("_L"), name.strip_suffix("_R")) {
            (Some(b), _) => (b, self.left_marker.as_str()),
            (_, Some(b)) => (b, self.right_marker.as_str()),
            _            => (name, ""),
        };
        let label = self.names.get(base).map(String::as_str).unwrap_or(base);
        format!("{label}{marker}")
    }
}
