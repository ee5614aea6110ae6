//! Finds frames in captured text
//!
//! Every frame is sent after the satellite's callsign, e.g.
//! `PSAT-2 C apng eFaaijtkpokoaB`. The scanner looks for the `T-2` of the
//! callsign and classifies the window that starts right after the separating
//! space.

use std::iter::FusedIterator;

use crate::frame::{
    ValidatedFrame,
    WINDOW_LENGTH,
    classify_shape,
};

/// Marker that precedes every frame.
pub const MARKER: &str = "T-2";

/// Offset from the start of a marker to the start of its frame.
pub const FRAME_OFFSET: usize = 4;

/// Lazily scans text for frames.
///
/// Frames are returned in the order their markers appear in the text. After a
/// marker is found, the search for the next one continues 3 characters later,
/// so markers closer together than that are skipped.
pub fn scan(text: &str) -> Scan<'_> {
    Scan {
        cursor: Cursor {
            text,
            position: 0,
        },
    }
}

#[derive(Clone, Copy, Debug)]
struct Cursor<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    #[inline(always)]
    fn advance(&mut self, amount: usize) {
        self.position += amount;
    }

    #[inline(always)]
    fn remaining(&self) -> &'a str {
        self.text.get(self.position..).unwrap_or_default()
    }

    /// Moves the cursor to the next marker and returns its position.
    fn find_marker(&mut self) -> Option<usize> {
        let offset = self.remaining().find(MARKER)?;
        self.advance(offset);
        Some(self.position)
    }
}

#[derive(Clone, Debug)]
pub struct Scan<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Scan<'a> {
    /// Byte offset at which the search for the next marker starts.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.position
    }

    fn frame_at(&self, marker: usize) -> Option<ValidatedFrame<'a>> {
        let text = self.cursor.text;
        let start = marker + FRAME_OFFSET;
        let window = text
            .as_bytes()
            .get(start..)
            .map(|rest| &rest[..rest.len().min(WINDOW_LENGTH)])
            .unwrap_or_default();

        let shape = classify_shape(window)?;
        // the classified prefix is plain ASCII
        let frame = text.get(start..start + shape.len())?;
        Some(ValidatedFrame::new(frame, shape))
    }
}

impl<'a> Iterator for Scan<'a> {
    type Item = ValidatedFrame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(marker) = self.cursor.find_marker() {
            self.cursor.advance(MARKER.len());

            if let Some(frame) = self.frame_at(marker) {
                tracing::trace!(marker, shape = ?frame.shape(), "found frame");
                return Some(frame);
            }
            else {
                tracing::trace!(marker, "rejected window");
            }
        }

        self.cursor.position = self.cursor.text.len();
        None
    }
}

impl FusedIterator for Scan<'_> {}

#[cfg(test)]
mod tests {
    use super::scan;
    use crate::frame::FrameShape;

    const CAPTURE: &str = "\
18:02:11 PSAT-2 C apng eFaaijtkpokoaB aaaa A aokF eEadjluappjxay
18:02:31 PSAT-2 A apnh eFaaijtkpokoaB aaaa
18:02:40 PSAT-2 S ashd aDbiaaaa qralaitkboFxaa
18:02:51 PSAT-2 Bx#%&/ noise
18:03:11 PSAT-2 D apni eFaaijtkpokoaB aa";

    #[test]
    fn it_finds_frames_in_order() {
        let frames = scan(CAPTURE)
            .map(|frame| (frame.shape().unwrap(), frame.as_str()))
            .collect::<Vec<_>>();

        assert_eq!(
            frames,
            [
                (
                    FrameShape::Full,
                    "C apng eFaaijtkpokoaB aaaa A aokF eEadjluappjxay"
                ),
                (FrameShape::Half, "A apnh eFaaijtkpokoaB"),
                (FrameShape::Sstv, "S ashd aDbiaaaa qralaitkboFxaa"),
                (FrameShape::Half, "D apni eFaaijtkpokoaB"),
            ]
        );
    }

    #[test]
    fn scanning_is_deterministic() {
        let first = scan(CAPTURE).collect::<Vec<_>>();
        let second = scan(CAPTURE).collect::<Vec<_>>();
        assert_eq!(first, second);
    }

    #[test]
    fn search_resumes_right_after_the_marker() {
        // the first window starts with the second marker and is rejected, the
        // second marker is still found because the search resumes at offset 3
        let text = "T-2 T-2 A apng eFaaijtkpokoaB";
        let frames = scan(text).collect::<Vec<_>>();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_str(), "A apng eFaaijtkpokoaB");

        let mut scan = scan("T-2xT-2");
        assert_eq!(scan.next(), None);
        assert_eq!(scan.position(), 7);
    }

    #[test]
    fn frames_inside_a_previous_window_are_found() {
        let text = "PSAT-2 A apng PSAT-2 B apnh eFaaijtkpokoaB";
        let frames = scan(text).map(|frame| frame.as_str()).collect::<Vec<_>>();
        assert_eq!(frames, ["B apnh eFaaijtkpokoaB"]);
    }

    #[test]
    fn marker_at_the_end_yields_nothing() {
        assert_eq!(scan("PSAT-2").count(), 0);
        assert_eq!(scan("PSAT-2 ").count(), 0);
        assert_eq!(scan("PSAT-2 A apng").count(), 0);
        assert_eq!(scan("").count(), 0);
    }

    #[test]
    fn multibyte_text_does_not_panic() {
        let text = "PSAT-2\u{e9}A apng eFaaijtkpokoaB PSAT-2 \u{1f4e1}\u{1f4e1} PSAT-2 A apng eFaaijtkpokoa\u{e9}";
        assert_eq!(scan(text).count(), 0);
    }
}
