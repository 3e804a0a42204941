//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::ContentRegistry;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse RON text containing a DataFile<T> wrapper.
pub fn parse_data_file<T>(file_name: &str, contents: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    Ok(data.items)
}

/// Parse RON text containing a single struct (not wrapped in DataFile).
pub fn parse_single_file<T>(file_name: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Load all content from `base_path` into a ContentRegistry.
///
/// A missing or broken defaults file does not block the boss data; its error
/// is reported and `CombatDefaults::default()` is used in its place.
pub fn load_all_content(
    base_path: &Path,
) -> (ContentRegistry, CombatDefaults, Vec<ContentLoadError>) {
    let mut registry = ContentRegistry::default();
    let mut errors = Vec::new();

    let bosses_path = base_path.join("bosses.ron");
    match read_file(&bosses_path)
        .and_then(|text| parse_data_file::<BossDef>(&bosses_path.display().to_string(), &text))
    {
        Ok(items) => {
            for item in items {
                registry.bosses.insert(item.id.clone(), item);
            }
        }
        Err(e) => errors.push(e),
    }

    let defaults_path = base_path.join("combat_defaults.ron");
    let defaults = match read_file(&defaults_path).and_then(|text| {
        parse_single_file::<CombatDefaults>(&defaults_path.display().to_string(), &text)
    }) {
        Ok(defaults) => defaults,
        Err(e) => {
            errors.push(e);
            CombatDefaults::default()
        }
    };

    (registry, defaults, errors)
}
