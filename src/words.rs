use crate::error::{Result, ScrambleError};
use std::fs;
use std::path::Path;

pub const COMPANY_NAMES: &[&str] = &[
    "CHRISTEX FOUNDATION",
    "SAFULPAY",
    "THE COMMUNITY",
    "KNESST",
    "MICROSOFT",
    "NVIDIA",
    "PERPLEXITY",
    "GUARANTY TRUST BANK",
    "INTERNET SOCIETY",
    "OSWALD'S TECH",
    "MOBILE MONEY",
    "NATCA",
    "SEND ME",
    "CHAT GPT",
    "ARTIFICIAL INTELLIGENCE",
    "GEMINI",
    "SOFTWARE ENGINEERING",
    "INNOVATION",
    "SEAMLESSLY",
    "MONIME",
];

pub const ANIMAL_NAMES: &[&str] = &[
    "ELEPHANT",
    "GIRAFFE",
    "KANGAROO",
    "PENGUIN",
    "DOLPHIN",
    "CHEETAH",
    "OCTOPUS",
    "FLAMINGO",
    "HEDGEHOG",
    "ARMADILLO",
    "CHAMELEON",
    "PORCUPINE",
    "SEA TURTLE",
    "POLAR BEAR",
    "HUMMINGBIRD",
];

pub const TECH_TERMS: &[&str] = &[
    "COMPILER",
    "KEYBOARD",
    "TERMINAL",
    "DATABASE",
    "ALGORITHM",
    "BANDWIDTH",
    "FIRMWARE",
    "PROTOCOL",
    "ENCRYPTION",
    "OPEN SOURCE",
    "CLOUD STORAGE",
    "MACHINE LEARNING",
];

/// Characters the guess input accepts. Every word in a list is made of these.
pub fn is_guess_char(ch: char) -> bool
{
    ch.is_ascii_alphanumeric() || matches!(ch, ' ' | '\'' | '-' | '&' | '.')
}

/// Ordered, non-empty list of target words, uppercased on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordList
{
    words: Vec<String>,
}

impl WordList
{
    /// Blank entries are dropped and the rest trimmed and uppercased.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_numbered(
            words
                .into_iter()
                .enumerate()
                .map(|(idx, word)| (idx + 1, word)),
        )
    }

    /// One word per line. Lines starting with `#` are comments.
    pub fn parse(contents: &str) -> Result<Self>
    {
        Self::from_numbered(
            contents
                .lines()
                .enumerate()
                .map(|(idx, line)| (idx + 1, line))
                .filter(|(_, line)| !line.trim_start().starts_with('#')),
        )
    }

    fn from_numbered<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, S)>,
        S: AsRef<str>,
    {
        let mut words = Vec::new();
        for (line, entry) in entries {
            let word = entry.as_ref().trim().to_uppercase();
            if word.is_empty() {
                continue;
            }
            if let Some(ch) = word.chars().find(|ch| !is_guess_char(*ch)) {
                return Err(ScrambleError::UntypableWord { word, line, ch });
            }
            words.push(word);
        }
        if words.is_empty() {
            return Err(ScrambleError::EmptyWordList);
        }
        Ok(Self { words })
    }

    pub fn from_file(path: &Path) -> Result<Self>
    {
        let contents = fs::read_to_string(path).map_err(|source| ScrambleError::WordFile {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::parse(&contents)?;
        tracing::info!(path = %path.display(), words = list.len(), "loaded word file");
        Ok(list)
    }

    pub fn len(&self) -> usize
    {
        self.words.len()
    }

    pub fn get(&self, index: usize) -> Option<&str>
    {
        self.words.get(index).map(String::as_str)
    }

    pub fn first(&self) -> &str
    {
        &self.words[0]
    }

    pub fn last_index(&self) -> usize
    {
        self.words.len() - 1
    }
}
