use std::{
    fmt::Display,
    path::Path,
};

use crate::Error;

/// Text read from a file or stdin.
#[derive(Debug)]
pub struct Input {
    /// Where the text came from, as recorded in the archive.
    pub source: String,
    pub text: String,
}

impl Input {
    pub fn read(path: Option<impl AsRef<Path>>) -> Result<Self, Error> {
        match path {
            Some(path) => {
                let path = path.as_ref();
                tracing::debug!(path = %path.display(), "Reading input from file");
                let text = std::fs::read(path)?;
                Ok(Self::new(path.display(), &text))
            }
            None => {
                tracing::debug!("Reading input from stdin");
                let mut text = vec![];
                std::io::copy(&mut std::io::stdin().lock(), &mut text)?;
                Ok(Self::new("stdin", &text))
            }
        }
    }

    /// Captures often contain garbage from the modem, so invalid UTF-8 is
    /// replaced instead of rejected.
    fn new(source: impl Display, text: &[u8]) -> Self {
        Self {
            source: source.to_string(),
            text: String::from_utf8_lossy(text).into_owned(),
        }
    }

    /// Non-empty lines without surrounding whitespace.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}
