//! # Error Types
//!
//! Scanning song text never fails: a token that is not a chord is simply not
//! reported. The errors here cover direct misuse of the tone constructor and
//! malformed configuration (song frontmatter or rendering options YAML).
//!
//! ## Usage
//! ```rust
//! use chordsheet::{ParseError, Song};
//!
//! match Song::parse("---\nkey: [unclosed\n---\nAm G") {
//!     Ok(song) => println!("{} chords", song.chords().len()),
//!     Err(ParseError::MetadataError(message)) => eprintln!("bad frontmatter: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A character outside `A`–`G` was passed to the tone constructor.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ParseError;
    /// let err = ParseError::UnknownTone { letter: 'X' };
    /// assert_eq!(err.to_string(), "Unknown tone letter 'X'");
    /// ```
    #[error("Unknown tone letter '{letter}'")]
    UnknownTone { letter: char },

    /// Invalid YAML in song frontmatter or a rendering options file.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ParseError;
    /// let err = ParseError::MetadataError("Invalid key: Xm".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: Invalid key: Xm");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),
}
