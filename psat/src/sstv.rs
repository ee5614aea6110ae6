//! SSTV telemetry
//!
//! Sent by the camera payload alongside its SSTV images:
//!
//! ```text
//! S ashd aDbiaaaa qralaitkboFxaa
//! | |    |        |
//! | |    |        event counters
//! | |    sensors and plan
//! | tick
//! mode
//! ```

use crate::{
    Error,
    symbol::signed_temperature,
    tokens::{
        Strictness,
        Tokens,
    },
    util::Elapsed,
};

/// Mode letter of SSTV frames.
pub const SSTV_MODE: char = 'S';

/// Lifetime event counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SstvCounters {
    pub boot: u16,
    /// Hard faults, flash, camera, JPEG and PSK timeout errors.
    pub error: u16,
    /// Starts of an SSTV, PSK or CW transmission.
    pub audio_start: u16,
    /// Frames transferred from the camera.
    pub cam_snapshot: u16,
    /// Accepted commands from APRS or CW.
    pub cmd_handled: u16,
    /// Rejected data from APRS.
    pub cmd_ignored: u16,
    /// Restricted commands sent without authorization.
    pub auth_error: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SstvFrame {
    /// Seconds since the last boot.
    pub tick: u32,
    /// °C
    pub temperature: i16,
    pub light_raw: u16,
    /// Seconds left until the authorization expires, 0 if not authorized.
    pub plan_auth: u16,
    /// Number of planned events.
    pub plan_count: u16,
    pub counters: SstvCounters,
}

impl SstvFrame {
    pub fn elapsed(&self) -> Elapsed {
        Elapsed::from_seconds(u64::from(self.tick))
    }

    /// Illuminance in lux.
    ///
    /// The raw value holds a 2 digit mantissa and a decimal exponent:
    /// `exponent * 100 + mantissa`.
    pub fn light(&self) -> u64 {
        let mantissa = u64::from(self.light_raw % 100);
        let exponent = u32::from(self.light_raw / 100);
        mantissa * 10u64.pow(exponent)
    }
}

/// Decodes an SSTV frame.
pub fn decode_sstv(text: &str, strictness: Strictness) -> Result<SstvFrame, Error> {
    let mut tokens = Tokens::new(text, strictness);

    let mode = tokens.require()?.first_char();
    if mode != Some(SSTV_MODE) {
        return Err(Error::UnknownFrameType { mode });
    }

    let tick = tokens.require()?.wide(strictness)?;

    let sensors = tokens.require()?;
    let sensor = |index: usize| sensors.symbol(2 * index, strictness);
    let temperature = signed_temperature(sensor(0)?);
    let light_raw = sensor(1)?;
    let plan_auth = sensor(2)?;
    let plan_count = sensor(3)?;

    let events = tokens.require()?;
    let event = |index: usize| events.symbol(2 * index, strictness);
    let counters = SstvCounters {
        boot: event(0)?,
        error: event(1)?,
        audio_start: event(2)?,
        cam_snapshot: event(3)?,
        cmd_handled: event(4)?,
        cmd_ignored: event(5)?,
        auth_error: event(6)?,
    };

    let frame = SstvFrame {
        tick,
        temperature,
        light_raw,
        plan_auth,
        plan_count,
        counters,
    };
    tracing::debug!(?frame, "decoded sstv frame");

    Ok(frame)
}
