//! Token cursor used by the frame decoders

use crate::{
    Error,
    symbol::{
        decode_symbol,
        try_decode_symbol,
    },
};

/// How the decoders treat damaged frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Strictness {
    /// Missing tokens and characters outside the symbol alphabet read as 0.
    ///
    /// This reproduces the tables that were archived by the ground station
    /// tooling.
    #[default]
    Lenient,
    /// Missing tokens and bad symbols are reported as errors.
    Strict,
}

/// A whitespace delimited token of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub index: usize,
}

impl<'a> Token<'a> {
    /// Placeholder for a token that isn't there.
    #[inline]
    pub fn missing(index: usize) -> Self {
        Self { text: "", index }
    }

    #[inline]
    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }

    /// Up to 2 bytes starting at `offset`.
    #[inline]
    pub fn pair(&self, offset: usize) -> &'a [u8] {
        let bytes = self.text.as_bytes().get(offset..).unwrap_or_default();
        &bytes[..bytes.len().min(2)]
    }

    /// Reads the symbol at `offset`.
    pub fn symbol(&self, offset: usize, strictness: Strictness) -> Result<u16, Error> {
        let pair = self.pair(offset);
        match strictness {
            Strictness::Lenient => Ok(decode_symbol(pair)),
            Strictness::Strict => {
                try_decode_symbol(pair).map_err(|source| {
                    Error::MalformedSymbol {
                        token: self.index,
                        offset,
                        source,
                    }
                })
            }
        }
    }

    /// Reads the 20-bit value made of the two symbols at the start of the
    /// token.
    pub fn wide(&self, strictness: Strictness) -> Result<u32, Error> {
        let high = u32::from(self.symbol(0, strictness)?);
        let low = u32::from(self.symbol(2, strictness)?);
        Ok((high << 10) + low)
    }
}

/// Cursor over the tokens of a frame.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    rest: &'a str,
    index: usize,
    strictness: Strictness,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str, strictness: Strictness) -> Self {
        Self {
            rest: text,
            index: 0,
            strictness,
        }
    }

    #[inline]
    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Index of the next token.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> Option<Token<'a>> {
        self.clone().next()
    }

    /// Consumes the next token.
    ///
    /// In lenient mode a missing token is returned as an empty token, which
    /// makes all of its symbols read as 0.
    pub fn require(&mut self) -> Result<Token<'a>, Error> {
        let index = self.index;
        match (self.next(), self.strictness) {
            (Some(token), _) => Ok(token),
            (None, Strictness::Lenient) => {
                self.index += 1;
                Ok(Token::missing(index))
            }
            (None, Strictness::Strict) => Err(Error::MalformedFrame { token: index }),
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let trimmed = self.rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
        if trimmed.is_empty() {
            self.rest = trimmed;
            return None;
        }

        let end = trimmed
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(trimmed.len());
        let (text, rest) = trimmed.split_at(end);
        self.rest = rest;

        let token = Token {
            text,
            index: self.index,
        };
        self.index += 1;
        Some(token)
    }
}
