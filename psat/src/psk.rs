//! PSK telemetry
//!
//! ```text
//! C apng eFaaijtkpokoaB aaaa A aokF eEadjluappjxay
//! | |    |              |    | |    |
//! | |    |              |    | |    history values
//! | |    |              |    | history clock
//! | |    |              |    history mode
//! | |    |              status
//! | |    values
//! | clock
//! mode
//! ```

use derive_more::Display;

use crate::{
    Error,
    symbol::signed_temperature,
    tokens::{
        Strictness,
        Token,
        Tokens,
    },
    util::{
        Elapsed,
        round_decimals,
    },
};

/// Seconds per clock tick.
pub const SECONDS_PER_TICK: u64 = 20;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PskMode {
    A,
    B,
    C,
    D,
}

impl PskMode {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    #[inline]
    pub fn as_char(&self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

/// One telemetry sample. A frame carries the current sample and optionally an
/// older one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PskRecord {
    pub mode: PskMode,
    /// Ticks of 20 seconds, persistent across reboots.
    pub clock: u32,
    pub reboot_count: u16,
    /// Percentage of successfully decoded PSK uplink.
    pub psk_success: u16,
    pub agc: u16,
    pub battery_raw: u16,
    pub rail_raw: u16,
    /// mA
    pub charge_current: u16,
    /// °C
    pub rx_temperature: i16,
}

impl PskRecord {
    pub fn elapsed(&self) -> Elapsed {
        Elapsed::from_seconds(u64::from(self.clock) * SECONDS_PER_TICK)
    }

    /// Battery voltage in V.
    pub fn battery_voltage(&self) -> f64 {
        round_decimals(
            f64::from(self.battery_raw) * 3300.0 * 147.0 / 47.0 / 1024.0 / 1000.0,
            3,
        )
    }

    /// 5 V rail voltage in V.
    pub fn rail_voltage(&self) -> f64 {
        round_decimals(
            f64::from(self.rail_raw) * 2500.0 * 409.0 / 100.0 / 1024.0 / 1000.0,
            3,
        )
    }

    fn read(mode: PskMode, tokens: &mut Tokens) -> Result<Self, Error> {
        let strictness = tokens.strictness();
        let clock = tokens.require()?.wide(strictness)?;

        let values = tokens.require()?;
        let value = |index: usize| values.symbol(2 * index, strictness);

        Ok(Self {
            mode,
            clock,
            reboot_count: value(0)?,
            psk_success: value(1)?,
            agc: value(2)?,
            battery_raw: value(3)?,
            rail_raw: value(4)?,
            charge_current: value(5)?,
            rx_temperature: signed_temperature(value(6)?),
        })
    }
}

/// Status counters of the current record.
///
/// The same 5 bit groups are reported under two names each. Half frames carry
/// no status, which reads as 0.
// todo: confirm with the protocol authors which of the labels are the right
// ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PskStatus {
    pub raw: u16,
}

impl PskStatus {
    #[inline]
    fn high(&self) -> u16 {
        (self.raw >> 5) & 0x1f
    }

    #[inline]
    fn low(&self) -> u16 {
        self.raw & 0x1f
    }

    #[inline]
    pub fn period_nr(&self) -> u16 {
        self.high()
    }

    #[inline]
    pub fn periods_sstv_rx(&self) -> u16 {
        self.low()
    }

    #[inline]
    pub fn periods_rx(&self) -> u16 {
        self.high()
    }

    #[inline]
    pub fn periods_tx(&self) -> u16 {
        self.low()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PskFrame {
    pub current: PskRecord,
    pub status: PskStatus,
    pub history: Option<PskRecord>,
}

fn mode_of(token: &Token) -> Option<PskMode> {
    token.first_char().and_then(PskMode::from_char)
}

/// Decodes a PSK frame.
///
/// The frame must start with a mode letter `A`-`D`.
pub fn decode_psk(text: &str, strictness: Strictness) -> Result<PskFrame, Error> {
    let mut tokens = Tokens::new(text, strictness);

    let mode_token = tokens.require()?;
    let mode = mode_of(&mode_token).ok_or_else(|| {
        Error::UnknownFrameType {
            mode: mode_token.first_char(),
        }
    })?;

    let current = PskRecord::read(mode, &mut tokens)?;

    // half frames end after the current record and have no status
    let status = match tokens.next() {
        Some(token) => {
            PskStatus {
                raw: token.symbol(0, strictness)?,
            }
        }
        None => PskStatus::default(),
    };

    let history = match tokens.peek().as_ref().and_then(mode_of) {
        Some(mode) => {
            tokens.next();
            Some(PskRecord::read(mode, &mut tokens)?)
        }
        None => None,
    };

    tracing::debug!(?current, ?status, ?history, "decoded psk frame");

    Ok(PskFrame {
        current,
        status,
        history,
    })
}
