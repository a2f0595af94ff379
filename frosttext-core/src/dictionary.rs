//! Phrase dictionaries
//!
//! A dictionary is an injected capability with an explicit lifecycle:
//! constructed by the caller, read-only afterwards, safe for concurrent
//! lookups. Phrase keys are the Finnish base phrases; each language maps
//! them to its own wording. Translator-maintained phrase banks live in a
//! relational store, so a SQLite-backed loader is provided next to the
//! built-in banks.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::collections::HashMap;
use std::path::Path;

/// Read-only phrase lookup for one language
pub trait Dictionary: Send + Sync {
    /// ISO 639-1 language code, e.g. "fi"
    fn language(&self) -> &str;

    /// Resolve a phrase key; `None` when the key has no translation
    fn lookup(&self, key: &str) -> Option<&str>;
}

/// A dictionary held entirely in memory
#[derive(Debug, Clone)]
pub struct InMemoryDictionary {
    language: String,
    phrases: HashMap<String, String>,
}

impl InMemoryDictionary {
    pub fn new(language: &str) -> Self {
        InMemoryDictionary {
            language: language.to_string(),
            phrases: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: &str, phrase: &str) {
        self.phrases.insert(key.to_string(), phrase.to_string());
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl Dictionary for InMemoryDictionary {
    fn language(&self) -> &str {
        &self.language
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.phrases.get(key).map(|s| s.as_str())
    }
}

/// Every phrase key the built-in stories compose with
pub const PHRASE_KEYS: &[&str] = &[
    "hallanaroilla alueilla",
    "hallanvaara",
    "mahdollisesti",
    "hallaa",
    "paikoin",
    "tai",
    "selkeillä alueilla",
    "monin paikoin",
    "yleisesti",
    "ankaraa hallaa",
    "joka paikoin voi olla ankaraa",
    "joka voi olla ankaraa",
    "alavilla mailla",
    "hallan vaara",
    "rannikolla",
    "sisämaassa",
    "hallan todennäköisyys",
    "ankaran hallan todennäköisyys",
    "on",
];

/// The Finnish phrase bank. Keys are the Finnish phrases themselves, so
/// this is the identity mapping over `PHRASE_KEYS`.
pub fn finnish() -> InMemoryDictionary {
    let mut dict = InMemoryDictionary::new("fi");
    for key in PHRASE_KEYS {
        dict.insert(key, key);
    }
    dict
}

/// The English phrase bank
pub fn english() -> InMemoryDictionary {
    let mut dict = InMemoryDictionary::new("en");
    for (key, phrase) in [
        ("hallanaroilla alueilla", "in frost-prone areas"),
        ("hallanvaara", "a risk of frost"),
        ("mahdollisesti", "possibly"),
        ("hallaa", "frost"),
        ("paikoin", "in places"),
        ("tai", "or"),
        ("selkeillä alueilla", "in clear areas"),
        ("monin paikoin", "in many places"),
        ("yleisesti", "widely"),
        ("ankaraa hallaa", "severe frost"),
        ("joka paikoin voi olla ankaraa", "which may locally be severe"),
        ("joka voi olla ankaraa", "which may be severe"),
        ("alavilla mailla", "in low-lying areas"),
        ("hallan vaara", "a risk of frost"),
        ("rannikolla", "on the coast"),
        ("sisämaassa", "inland"),
        ("hallan todennäköisyys", "the probability of frost"),
        ("ankaran hallan todennäköisyys", "the probability of severe frost"),
        ("on", "is"),
    ] {
        dict.insert(key, phrase);
    }
    dict
}

/// Resolve a built-in phrase bank by language code
pub fn builtin(language: &str) -> Option<InMemoryDictionary> {
    match language {
        "fi" => Some(finnish()),
        "en" => Some(english()),
        _ => None,
    }
}

/// Create the phrase-bank schema on an open connection
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS phrases (
            lang TEXT NOT NULL,
            key TEXT NOT NULL,
            phrase TEXT NOT NULL,
            PRIMARY KEY (lang, key)
        )",
        [],
    )
    .context("failed to create phrase-bank schema")?;
    Ok(())
}

/// Load one language's phrases from a SQLite phrase bank into memory.
///
/// The whole language is read eagerly at construction; the connection is
/// not kept, so the resulting dictionary is as shareable as the built-in
/// ones.
pub fn load_sqlite(path: &Path, language: &str) -> Result<InMemoryDictionary> {
    let conn = Connection::open(path)
        .with_context(|| format!("failed to open phrase bank: {}", path.display()))?;
    load_sqlite_conn(&conn, language)
}

fn load_sqlite_conn(conn: &Connection, language: &str) -> Result<InMemoryDictionary> {
    let mut stmt = conn
        .prepare("SELECT key, phrase FROM phrases WHERE lang = ?1 ORDER BY key")
        .context("phrase bank is missing the phrases table")?;
    let rows = stmt
        .query_map([language], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .context("failed to query phrase bank")?;

    let mut dict = InMemoryDictionary::new(language);
    for row in rows {
        let (key, phrase) = row.context("failed to read phrase-bank row")?;
        dict.insert(&key, &phrase);
    }
    if dict.is_empty() {
        anyhow::bail!("phrase bank has no entries for language '{}'", language);
    }
    Ok(dict)
}
