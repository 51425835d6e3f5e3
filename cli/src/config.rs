use anyhow::{Context, Result};
use popquest_core::GameConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const BUILTIN_WORDS: &str = include_str!("../words.txt");

/// Contents of the optional TOML configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub game: GameConfig,
    pub words: Vec<String>,
    /// Relative paths are resolved against the configuration file's directory.
    pub words_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;

        config.words_file = config.words_file.map(|words_file| match path.parent() {
            Some(dir) if words_file.is_relative() => dir.join(words_file),
            _ => words_file,
        });
        Ok(config)
    }
}

/// One word per line, blank lines and `#` comments skipped.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

pub fn load_word_list(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading word list {}", path.display()))?;
    Ok(parse_word_list(&text))
}

pub fn builtin_words() -> Vec<String> {
    parse_word_list(BUILTIN_WORDS)
}

/// Picks the word source: an explicit file, then the config's file, then its inline list,
/// then the built-in list.
pub fn resolve_words(explicit: Option<&Path>, file: &FileConfig) -> Result<Vec<String>> {
    if let Some(path) = explicit.or(file.words_file.as_deref()) {
        return load_word_list(path);
    }
    if !file.words.is_empty() {
        return Ok(file.words.clone());
    }
    Ok(builtin_words())
}
