//! Single frames submitted by hand
//!
//! A submission is one line as printed by the ground station software, e.g.
//! `PSAT-2 C apng eFaaijtkpokoaB aaaa A aokF eEadjluappjxay`. Unlike scanned
//! frames, its layout isn't checked before decoding.

use crate::{
    Error,
    frame::ValidatedFrame,
};

/// Header every submission must contain.
pub const HEADER: &str = "T-2 ";

/// Maximum number of bytes of the frame body that are decoded.
pub const MAX_BODY_LENGTH: usize = 255;

/// Extracts the frame body from a submission.
///
/// The body is everything after the first space of the submission.
pub fn frame_body(submission: &str) -> Result<ValidatedFrame<'_>, Error> {
    if !submission.contains(HEADER) {
        return Err(Error::MissingHeaderMarker);
    }

    let body = submission
        .split_once(' ')
        .map_or("", |(_callsign, body)| body);
    let body = truncate(body, MAX_BODY_LENGTH);
    tracing::trace!(body, "submitted frame");

    Ok(ValidatedFrame::trusted(body))
}

fn truncate(s: &str, max_length: usize) -> &str {
    if s.len() <= max_length {
        return s;
    }
    let mut end = max_length;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
