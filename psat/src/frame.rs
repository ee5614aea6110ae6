//! Frame shapes
//!
//! A PSK frame is sent either as a half frame (current record only, 21
//! characters) or as a full frame (current and history record, 48 characters):
//!
//! ```text
//! C apng eFaaijtkpokoaB aaaa A aokF eEadjluappjxay
//! ^ ^    ^              ^    ^ ^    ^
//! 0 2    7              22   27 29  34
//! ```
//!
//! An SSTV frame is 30 characters long:
//!
//! ```text
//! S ashd aDbiaaaa qralaitkboFxaa
//! ```

use derive_more::Display;

/// Length of the window examined after each frame marker.
pub const WINDOW_LENGTH: usize = 48;

pub const FULL_LENGTH: usize = 48;
pub const HALF_LENGTH: usize = 21;
pub const SSTV_LENGTH: usize = 30;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameShape {
    #[display("half")]
    Half,
    #[display("full")]
    Full,
    #[display("sstv")]
    Sstv,
}

impl FrameShape {
    /// Number of characters a frame of this shape occupies.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Half => HALF_LENGTH,
            Self::Full => FULL_LENGTH,
            Self::Sstv => SSTV_LENGTH,
        }
    }

    /// Checks `window` against this shape's layout.
    pub fn matches(&self, window: &[u8]) -> bool {
        match self {
            Self::Half => is_half(window),
            Self::Full => is_half(window) && is_full_tail(window),
            Self::Sstv => is_sstv(window),
        }
    }
}

/// Checks that the first `n` bytes exist and are letters, digits or spaces.
pub fn is_plain_ascii(s: &[u8], n: usize) -> bool {
    s.get(..n).is_some_and(|prefix| {
        prefix
            .iter()
            .all(|byte| byte.is_ascii_alphanumeric() || *byte == b' ')
    })
}

#[inline]
fn byte_is(window: &[u8], index: usize, expected: u8) -> bool {
    window.get(index) == Some(&expected)
}

#[inline]
fn is_psk_mode(window: &[u8], index: usize) -> bool {
    window
        .get(index)
        .is_some_and(|byte| matches!(byte, b'A'..=b'D'))
}

fn is_half(window: &[u8]) -> bool {
    is_psk_mode(window, 0)
        && byte_is(window, 1, b' ')
        && byte_is(window, 6, b' ')
        && is_plain_ascii(window, HALF_LENGTH)
}

fn is_full_tail(window: &[u8]) -> bool {
    byte_is(window, 21, b' ')
        && byte_is(window, 26, b' ')
        && is_psk_mode(window, 27)
        && byte_is(window, 28, b' ')
        && byte_is(window, 33, b' ')
        && is_plain_ascii(window, FULL_LENGTH)
}

fn is_sstv(window: &[u8]) -> bool {
    byte_is(window, 0, b'S')
        && byte_is(window, 1, b' ')
        && byte_is(window, 6, b' ')
        && byte_is(window, 15, b' ')
        && is_plain_ascii(window, SSTV_LENGTH)
}

/// Determines the shape of a candidate window.
///
/// Full frames take precedence over half frames, which take precedence over
/// SSTV frames.
pub fn classify_shape(window: &[u8]) -> Option<FrameShape> {
    [FrameShape::Full, FrameShape::Half, FrameShape::Sstv]
        .into_iter()
        .find(|shape| shape.matches(window))
}

/// A frame ready to be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValidatedFrame<'a> {
    text: &'a str,
    shape: Option<FrameShape>,
}

impl<'a> ValidatedFrame<'a> {
    #[inline]
    pub(crate) fn new(text: &'a str, shape: FrameShape) -> Self {
        Self {
            text,
            shape: Some(shape),
        }
    }

    /// Wraps a frame body that was submitted on its own and is decoded without
    /// checking its layout.
    #[inline]
    pub fn trusted(text: &'a str) -> Self {
        Self { text, shape: None }
    }

    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Shape the frame was classified as. `None` for trusted submissions.
    #[inline]
    pub fn shape(&self) -> Option<FrameShape> {
        self.shape
    }

    /// The mode letter the frame starts with.
    #[inline]
    pub fn mode_letter(&self) -> Option<char> {
        self.text.chars().next()
    }
}

impl AsRef<str> for ValidatedFrame<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

/// Classifies a window and trims it to the length of its shape.
///
/// Returns `None` if the window has no valid shape.
pub fn classify(window: &str) -> Option<ValidatedFrame<'_>> {
    let shape = classify_shape(window.as_bytes())?;
    // the trimmed prefix is plain ASCII, so this always is a char boundary
    let text = window.get(..shape.len())?;
    Some(ValidatedFrame::new(text, shape))
}
