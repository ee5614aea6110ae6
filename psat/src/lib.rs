//! Decoder for the telemetry of the PSAT-2 satellite.
//!
//! The satellite sends its telemetry as short text frames which are received
//! by ground stations with a PSK31 or SSTV decoder. This crate finds these
//! frames in captured text, decodes them and formats them for humans and
//! spreadsheets.
//!
//! ```
//! let capture = "18:02:40 PSAT-2 S ashd aDbiaaaa qralaitkboFxaa\n";
//!
//! for frame in psat::scan(capture) {
//!     let record = psat::decode(&frame, "OK1ABC").unwrap();
//!     let report = psat::format(&record);
//!     assert!(report.human.contains("Tick = 18659 sec = 5:10:59"));
//! }
//! ```

pub mod frame;
pub mod psk;
pub mod report;
pub mod scan;
pub mod sstv;
pub mod submission;
pub mod symbol;
pub mod tokens;
pub mod util;

use derive_more::Display;

pub use crate::{
    frame::{
        FrameShape,
        ValidatedFrame,
        classify,
    },
    psk::{
        PskFrame,
        PskRecord,
        decode_psk,
    },
    report::{
        Report,
        format,
    },
    scan::{
        Scan,
        scan,
    },
    sstv::{
        SstvFrame,
        decode_sstv,
    },
    symbol::{
        MalformedSymbol,
        decode_symbol,
    },
    tokens::Strictness,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unknown TLM type: {mode:?}")]
    UnknownFrameType { mode: Option<char> },
    #[error("No PSAT-2 header")]
    MissingHeaderMarker,
    #[error("Malformed symbol at offset {offset} of token {token}")]
    MalformedSymbol {
        token: usize,
        offset: usize,
        source: MalformedSymbol,
    },
    #[error("Frame ends before token {token}")]
    MalformedFrame { token: usize },
}

/// The two kinds of frames.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Family {
    #[display("psk")]
    Psk,
    #[display("sstv")]
    Sstv,
}

impl Family {
    /// Determines the family from a frame's mode letter.
    pub fn from_mode(mode: char) -> Option<Self> {
        match mode {
            'A'..='D' => Some(Self::Psk),
            sstv::SSTV_MODE => Some(Self::Sstv),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "family", rename_all = "kebab-case"))]
pub enum TelemetryFrame {
    Psk(PskFrame),
    Sstv(SstvFrame),
}

impl TelemetryFrame {
    pub fn family(&self) -> Family {
        match self {
            Self::Psk(_) => Family::Psk,
            Self::Sstv(_) => Family::Sstv,
        }
    }
}

/// A decoded frame together with the annotation it was submitted with.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedRecord {
    pub annotation: String,
    pub frame: TelemetryFrame,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Decoder {
    strictness: Strictness,
}

impl Decoder {
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }

    #[inline]
    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Decodes a frame, choosing the decoder by the frame's mode letter.
    pub fn decode_frame(&self, frame: &ValidatedFrame) -> Result<TelemetryFrame, Error> {
        let mode = frame.mode_letter();
        match mode.and_then(Family::from_mode) {
            Some(Family::Psk) => {
                decode_psk(frame.as_str(), self.strictness).map(TelemetryFrame::Psk)
            }
            Some(Family::Sstv) => {
                decode_sstv(frame.as_str(), self.strictness).map(TelemetryFrame::Sstv)
            }
            None => Err(Error::UnknownFrameType { mode }),
        }
    }

    pub fn decode(&self, frame: &ValidatedFrame, annotation: &str) -> Result<DecodedRecord, Error> {
        Ok(DecodedRecord {
            annotation: annotation.to_owned(),
            frame: self.decode_frame(frame)?,
        })
    }

    /// Decodes a single submitted frame, e.g. `PSAT-2 S ashd aDbiaaaa
    /// qralaitkboFxaa`.
    pub fn decode_submission(&self, text: &str, annotation: &str) -> Result<DecodedRecord, Error> {
        let frame = submission::frame_body(text)?;
        self.decode(&frame, annotation)
    }

    /// Scans `text` and decodes every frame found.
    ///
    /// The n-th frame is annotated with `[n] annotation`.
    pub fn decode_stream<'a>(&self, text: &'a str, annotation: &'a str) -> DecodeStream<'a> {
        DecodeStream {
            scan: scan(text),
            decoder: *self,
            annotation,
            count: 0,
        }
    }
}

/// Decodes a frame with the default (lenient) decoder.
pub fn decode(frame: &ValidatedFrame, annotation: &str) -> Result<DecodedRecord, Error> {
    Decoder::default().decode(frame, annotation)
}

/// Decodes a frame without annotation with the default (lenient) decoder.
pub fn decode_frame(frame: &ValidatedFrame) -> Result<TelemetryFrame, Error> {
    Decoder::default().decode_frame(frame)
}

/// Scans text and decodes every frame found, with the default (lenient)
/// decoder.
pub fn decode_stream<'a>(text: &'a str, annotation: &'a str) -> DecodeStream<'a> {
    Decoder::default().decode_stream(text, annotation)
}

/// Iterator returned by [`Decoder::decode_stream`].
#[derive(Clone, Debug)]
pub struct DecodeStream<'a> {
    scan: Scan<'a>,
    decoder: Decoder,
    annotation: &'a str,
    count: usize,
}

impl<'a> Iterator for DecodeStream<'a> {
    type Item = (ValidatedFrame<'a>, Result<DecodedRecord, Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.scan.next()?;
        self.count += 1;
        let annotation = format!("[{}] {}", self.count, self.annotation);
        let result = self.decoder.decode(&frame, &annotation);
        if let Err(error) = &result {
            tracing::warn!(frame = frame.as_str(), %error, "failed to decode frame");
        }
        Some((frame, result))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Decoder,
        Error,
        Family,
        FrameShape,
        Strictness,
        TelemetryFrame,
        ValidatedFrame,
        decode,
        decode_stream,
        scan,
    };

    #[test]
    fn it_dispatches_on_the_mode_letter() {
        let psk = decode(&ValidatedFrame::trusted("B aaaa aaaaaaaaaaaaaa aa"), "").unwrap();
        assert_eq!(psk.frame.family(), Family::Psk);

        let sstv = decode(&ValidatedFrame::trusted("S aaab aaaaaaaa aaaaaaaaaaaaaa"), "").unwrap();
        let TelemetryFrame::Sstv(frame) = sstv.frame
        else {
            panic!("expected sstv frame: {:?}", sstv.frame);
        };
        assert_eq!(frame.tick, 1);
    }

    #[test]
    fn unknown_frame_types_are_errors() {
        assert_eq!(
            decode(&ValidatedFrame::trusted("Z aaaa aaaaaaaaaaaaaa aa"), ""),
            Err(Error::UnknownFrameType { mode: Some('Z') })
        );
        assert_eq!(
            decode(&ValidatedFrame::trusted(""), ""),
            Err(Error::UnknownFrameType { mode: None })
        );
    }

    #[test]
    fn strict_decoder_accepts_scanned_half_frames() {
        let frame = scan("PSAT-2 A apng eFaaijtkpokoaB\n").next().unwrap();
        assert_eq!(frame.shape(), Some(FrameShape::Half));

        let TelemetryFrame::Psk(psk) = Decoder::new(Strictness::Strict)
            .decode_frame(&frame)
            .unwrap()
        else {
            panic!("expected psk frame");
        };
        assert_eq!(psk.current.clock, 15782);
        assert_eq!(psk.status.raw, 0);
    }

    #[test]
    fn stream_frames_are_numbered() {
        let capture = "PSAT-2 A apng eFaaijtkpokoaB\nnoise PSAT-2\nPSAT-2 S ashd aDbiaaaa qralaitkboFxaa";
        let annotations = decode_stream(capture, "OK1ABC")
            .map(|(_, result)| result.unwrap().annotation)
            .collect::<Vec<_>>();
        assert_eq!(annotations, ["[1] OK1ABC", "[2] OK1ABC"]);
    }

    #[test]
    fn strict_decoder_reports_damage() {
        let frame = ValidatedFrame::trusted("A apng");
        assert_eq!(
            Decoder::new(Strictness::Strict).decode_frame(&frame),
            Err(Error::MalformedFrame { token: 2 })
        );
        assert!(Decoder::default().decode_frame(&frame).is_ok());
    }
}
