//! Skill taxonomy loading
//!
//! The taxonomy is a JSON object mapping a category name to a list of
//! skill terms:
//!
//! ```json
//! { "languages": ["Python", "SQL"], "cloud": ["AWS"] }
//! ```
//!
//! Categories are flattened away; only the lowercase terms survive.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use extract_spi::{ExtractError, Result, Vocabulary};

/// Read and flatten a taxonomy file into a vocabulary
pub fn load_vocabulary(path: impl AsRef<Path>) -> Result<Vocabulary> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))?;
    let vocabulary = parse_taxonomy(&raw, path)?;
    debug!(path = %path.display(), terms = vocabulary.len(), "loaded vocabulary");
    Ok(vocabulary)
}

/// Parse taxonomy JSON; `origin` is only used in error messages
pub fn parse_taxonomy(raw: &str, origin: &Path) -> Result<Vocabulary> {
    let categories: BTreeMap<String, Vec<String>> =
        serde_json::from_str(raw).map_err(|e| ExtractError::InvalidTaxonomy {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(Vocabulary::from_categories(&categories))
}
