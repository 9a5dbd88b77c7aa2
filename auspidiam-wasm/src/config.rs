use auspidiam_core::Preset;

use crate::utils::get_query_param;

/// Start-up options read from the page URL (`?variant=…&seed=…`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageOptions {
    pub preset: Preset,
    /// Fixed placement seed; random per load when absent.
    pub seed: Option<u64>,
}

impl PageOptions {
    /// Parses the query string. Unusable values keep their default and are
    /// reported back as warnings.
    pub fn from_query(search: &str) -> (Self, Vec<String>) {
        let mut opts = PageOptions::default();
        let mut warnings = Vec::new();
        if let Some(v) = get_query_param(search, "variant") {
            match v.parse() {
                Ok(p) => opts.preset = p,
                Err(e) => warnings.push(format!("{e}; using '{}'", opts.preset)),
            }
        }
        if let Some(v) = get_query_param(search, "seed") {
            match v.trim().parse::<u64>() {
                Ok(seed) => opts.seed = Some(seed),
                Err(_) => warnings.push(format!("ignoring seed '{v}'")),
            }
        }
        (opts, warnings)
    }
}
