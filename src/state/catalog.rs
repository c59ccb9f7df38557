//! Word inventory: per-category word lists loaded from disk plus the record of
//! words already drawn during the current session.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Write as _,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::text::{squash_whitespace, title_case, width};

/// Extension stripped from word files before normalizing the category name.
const WORD_FILE_EXTENSION: &str = ".txt";

static NO_WORDS: BTreeSet<String> = BTreeSet::new();

/// Failures raised while loading or querying the word catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The word source (directory or one of its files) could not be read.
    #[error("failed to read word source `{}`", path.display())]
    Load {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The word source contains no category files at all.
    #[error("no word categories found in `{}`", path.display())]
    Empty {
        /// Directory that was scanned.
        path: PathBuf,
    },
    /// A category name that is not part of the catalog was requested.
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    /// A word that does not belong to the category was marked as used.
    #[error("word `{word}` is not part of category `{category}`")]
    UnknownWord {
        /// Category the word was recorded against.
        category: String,
        /// Offending word.
        word: String,
    },
}

/// Usage counters for a single category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStats {
    /// Normalized category name.
    pub category: String,
    /// Number of distinct words in the category.
    pub total: usize,
    /// Number of words already drawn this session.
    pub used: usize,
}

impl CategoryStats {
    /// Words still available for future draws.
    pub fn remaining(&self) -> usize {
        self.total - self.used
    }
}

/// Category name to word list mapping with usage bookkeeping.
///
/// Words are kept in ordered sets so iteration (and therefore seeded draws) is
/// deterministic regardless of the order of the source files.
#[derive(Debug, Clone, Default)]
pub struct WordCatalog {
    words: BTreeMap<String, BTreeSet<String>>,
    used: BTreeMap<String, BTreeSet<String>>,
}

impl WordCatalog {
    /// Load every category file found directly inside `dir`.
    ///
    /// Each file name is the raw category key and each non-blank line a word.
    /// The catalog is only returned once every file has been read, so a failure
    /// never leaves a partially populated catalog behind.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let load_error = |path: &Path, source: io::Error| CatalogError::Load {
            path: path.to_path_buf(),
            source,
        };

        let entries = fs::read_dir(dir).map_err(|source| load_error(dir, source))?;
        let mut words: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for entry in entries {
            let entry = entry.map_err(|source| load_error(dir, source))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|source| load_error(&path, source))?;
            if !file_type.is_file() {
                continue;
            }

            let Some(raw_name) = path.file_name().and_then(|name| name.to_str()) else {
                warn!(path = %path.display(), "skipping word file with a non UTF-8 name");
                continue;
            };
            if raw_name.starts_with('.') {
                continue;
            }

            let contents = fs::read_to_string(&path).map_err(|source| load_error(&path, source))?;
            let category = normalize_category(raw_name);
            let parsed = parse_words(&contents);
            debug!(
                category = %category,
                path = %path.display(),
                count = parsed.len(),
                "loaded unique words for category"
            );
            words.entry(category).or_default().extend(parsed);
        }

        if words.is_empty() {
            return Err(CatalogError::Empty {
                path: dir.to_path_buf(),
            });
        }

        let catalog = Self {
            words,
            used: BTreeMap::new(),
        };
        info!(
            path = %dir.display(),
            categories = catalog.words.len(),
            "word categories loaded:\n{}",
            catalog.stats_report()
        );
        Ok(catalog)
    }

    /// Build a catalog from in-memory lists, applying the same normalization as [`Self::load`].
    pub fn from_lists<C, W, I>(lists: I) -> Self
    where
        I: IntoIterator<Item = (C, W)>,
        C: AsRef<str>,
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        let mut words: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (category, list) in lists {
            let entry = words.entry(normalize_category(category.as_ref())).or_default();
            entry.extend(list.into_iter().filter_map(|word| normalize_word(word.as_ref())));
        }
        Self {
            words,
            used: BTreeMap::new(),
        }
    }

    /// Category names in lexicographic order.
    pub fn categories(&self) -> Vec<&str> {
        self.words.keys().map(String::as_str).collect()
    }

    /// Full word set of `category`.
    ///
    /// The lookup accepts either the normalized name (`"Cibo & Bevande"`) or
    /// the raw file key (`"cibo_e_bevande"`).
    pub fn words_in(&self, category: &str) -> Result<&BTreeSet<String>, CatalogError> {
        let key = self.key_for(category)?;
        Ok(&self.words[key])
    }

    /// Words of `category` already drawn this session; empty when none were.
    pub fn used_in(&self, category: &str) -> &BTreeSet<String> {
        self.key_for(category)
            .ok()
            .and_then(|key| self.used.get(key))
            .unwrap_or(&NO_WORDS)
    }

    /// Words of `category` that can still be drawn.
    pub fn available_in(&self, category: &str) -> Result<Vec<&str>, CatalogError> {
        let key = self.key_for(category)?;
        let used = self.used.get(key).unwrap_or(&NO_WORDS);
        Ok(self.words[key]
            .difference(used)
            .map(String::as_str)
            .collect())
    }

    /// Every `(category, word)` pair still available, ordered by category then word.
    pub fn available_pairs(&self) -> Vec<(&str, &str)> {
        self.words
            .iter()
            .flat_map(|(category, words)| {
                let used = self.used.get(category).unwrap_or(&NO_WORDS);
                words
                    .difference(used)
                    .map(move |word| (category.as_str(), word.as_str()))
            })
            .collect()
    }

    /// Number of words still available across all categories.
    pub fn available_count(&self) -> usize {
        self.words
            .iter()
            .map(|(category, words)| {
                words.len() - self.used.get(category).map_or(0, BTreeSet::len)
            })
            .sum()
    }

    /// Record `word` as drawn from `category`.
    pub fn mark_used(&mut self, category: &str, word: &str) -> Result<(), CatalogError> {
        let key = self.key_for(category)?.to_owned();
        if !self.words[&key].contains(word) {
            return Err(CatalogError::UnknownWord {
                category: key,
                word: word.to_owned(),
            });
        }
        self.used.entry(key).or_default().insert(word.to_owned());
        Ok(())
    }

    /// Forget every drawn word; the word lists themselves are untouched.
    pub fn reset_usage(&mut self) {
        self.used.clear();
    }

    /// Usage counters for every category, in category order.
    pub fn stats(&self) -> Vec<CategoryStats> {
        self.words
            .iter()
            .map(|(category, words)| CategoryStats {
                category: category.clone(),
                total: words.len(),
                used: self.used.get(category).map_or(0, BTreeSet::len),
            })
            .collect()
    }

    /// One `name : total (used / remaining)` line per category, column aligned.
    pub fn stats_report(&self) -> String {
        let stats = self.stats();
        let name_width = stats
            .iter()
            .map(|s| width(&s.category))
            .max()
            .unwrap_or(0);
        let count_width = stats
            .iter()
            .map(|s| digits(s.total))
            .max()
            .unwrap_or(0);
        let used_width = self
            .used
            .values()
            .map(|used| digits(used.len()))
            .max()
            .unwrap_or(0);

        let mut report = String::new();
        for (index, s) in stats.iter().enumerate() {
            if index > 0 {
                report.push('\n');
            }
            let _ = write!(
                report,
                "{:<name_width$} : {:>count_width$} ({:>used_width$} / {:>count_width$})",
                s.category,
                s.total,
                s.used,
                s.remaining(),
            );
        }
        report
    }

    fn key_for(&self, category: &str) -> Result<&str, CatalogError> {
        if let Some((key, _)) = self.words.get_key_value(category) {
            return Ok(key.as_str());
        }
        let normalized = normalize_category(category);
        self.words
            .get_key_value(&normalized)
            .map(|(key, _)| key.as_str())
            .ok_or_else(|| CatalogError::UnknownCategory(category.to_owned()))
    }
}

/// Turn a raw file key such as `cibo_e_bevande.txt` into `Cibo & Bevande`.
pub fn normalize_category(raw: &str) -> String {
    let raw = raw.strip_suffix(WORD_FILE_EXTENSION).unwrap_or(raw);
    let spaced = raw.replace("_e_", "_&_").replace('_', " ");
    title_case(&squash_whitespace(&spaced))
}

fn normalize_word(line: &str) -> Option<String> {
    let word = squash_whitespace(line);
    (!word.is_empty()).then(|| title_case(&word))
}

fn parse_words(contents: &str) -> BTreeSet<String> {
    contents.lines().filter_map(normalize_word).collect()
}

fn digits(value: usize) -> usize {
    value.to_string().len()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn word_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    #[test]
    fn category_names_are_normalized() {
        assert_eq!(normalize_category("cose"), "Cose");
        assert_eq!(normalize_category("cibo_e_bevande"), "Cibo & Bevande");
        assert_eq!(normalize_category("film_famosi.txt"), "Film Famosi");
    }

    #[test]
    fn load_deduplicates_and_title_cases_words() {
        let dir = word_dir(&[
            ("cose", "sole\nluna\nsole\n\n  mare  \nLUNA\n"),
            ("animali_e_piante", "gatto\nquercia\n"),
            (".hidden", "ignored\n"),
        ]);
        fs::create_dir(dir.path().join("nested")).unwrap();

        let catalog = WordCatalog::load(dir.path()).unwrap();

        assert_eq!(catalog.categories(), vec!["Animali & Piante", "Cose"]);
        let words: Vec<_> = catalog.words_in("cose").unwrap().iter().cloned().collect();
        assert_eq!(words, vec!["Luna", "Mare", "Sole"]);
    }

    #[test]
    fn loading_twice_yields_identical_word_sets() {
        let first = word_dir(&[("cose", "sole\nluna\nmare\n")]);
        let second = word_dir(&[("cose", "mare\nmare\nluna\nsole\nluna\n")]);

        let a = WordCatalog::load(first.path()).unwrap();
        let b = WordCatalog::load(second.path()).unwrap();

        assert_eq!(a.words_in("Cose").unwrap(), b.words_in("Cose").unwrap());
    }

    #[test]
    fn empty_category_is_kept_with_zero_count() {
        let dir = word_dir(&[("vuota", "\n\n"), ("cose", "sole\n")]);
        let catalog = WordCatalog::load(dir.path()).unwrap();

        assert!(catalog.words_in("vuota").unwrap().is_empty());
        assert_eq!(catalog.stats()[1].total, 0);
    }

    #[test]
    fn missing_directory_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = WordCatalog::load(&missing).unwrap_err();
        assert!(matches!(err, CatalogError::Load { path, .. } if path == missing));
    }

    #[test]
    fn directory_without_files_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = WordCatalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Empty { .. }));
    }

    #[test]
    fn unknown_category_is_reported() {
        let catalog = WordCatalog::from_lists([("cose", ["sole"])]);
        let err = catalog.words_in("animali").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory(name) if name == "animali"));
        assert!(catalog.used_in("animali").is_empty());
    }

    #[test]
    fn marking_words_moves_them_out_of_the_available_set() {
        let mut catalog = WordCatalog::from_lists([("cose", ["sole", "luna", "mare"])]);

        catalog.mark_used("Cose", "Luna").unwrap();

        assert_eq!(catalog.available_in("cose").unwrap(), vec!["Mare", "Sole"]);
        assert_eq!(catalog.used_in("cose").len(), 1);
        assert_eq!(catalog.available_count(), 2);
        assert!(matches!(
            catalog.mark_used("cose", "Stella"),
            Err(CatalogError::UnknownWord { .. })
        ));
    }

    #[test]
    fn reset_usage_keeps_word_lists() {
        let mut catalog = WordCatalog::from_lists([("cose", ["sole", "luna"])]);
        catalog.mark_used("cose", "Sole").unwrap();

        catalog.reset_usage();

        assert!(catalog.used_in("cose").is_empty());
        assert_eq!(catalog.words_in("cose").unwrap().len(), 2);
    }

    #[test]
    fn stats_report_aligns_columns() {
        let mut catalog = WordCatalog::from_lists([
            ("cose", vec!["sole", "luna", "mare", "cielo", "terra", "vento", "fuoco", "neve", "lago", "monte"]),
            ("animali_e_piante", vec!["gatto"]),
        ]);
        catalog.mark_used("cose", "Sole").unwrap();

        let report = catalog.stats_report();

        assert_eq!(
            report,
            "Animali & Piante :  1 (0 /  1)\nCose             : 10 (1 /  9)"
        );
    }
}
