//! Error types for kb-scramble.
//!
//! A wrong guess is a normal game state, not an error. These variants cover
//! everything that stops the program from running a session at all.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrambleError
{
    /// Word list has no usable entries after trimming blanks and comments
    #[error("Word list is empty")]
    EmptyWordList,

    /// A word holds a character the guess input cannot produce
    #[error("Word '{word}' on line {line} contains '{ch}', which cannot be typed as a guess")]
    UntypableWord
    {
        word: String,
        line: usize,
        ch: char,
    },

    #[error("Unknown word pack '{0}'. Run `kb-scramble list` to see the packs.")]
    UnknownPack(String),

    #[error("Failed to read word file {}: {source}", path.display())]
    WordFile
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid selection '{0}'")]
    InvalidSelection(String),

    /// Raw mode, alternate screen, event polling or drawing failed
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Failed to set up logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, ScrambleError>;
