use std::fmt::Display;

/// Rounds `x` to `decimals` decimal places.
#[inline]
pub fn round_decimals(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}

/// Elapsed device time in seconds.
///
/// Displays as `H:MM:SS`. The hours are not padded and don't wrap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Elapsed {
    pub seconds: u64,
}

impl Elapsed {
    #[inline]
    pub const fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    #[inline]
    pub fn hours(&self) -> u64 {
        self.seconds / 3600
    }

    #[inline]
    pub fn minutes(&self) -> u64 {
        (self.seconds % 3600) / 60
    }

    #[inline]
    pub fn seconds_of_minute(&self) -> u64 {
        self.seconds % 60
    }
}

impl Display for Elapsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds_of_minute()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Elapsed,
        round_decimals,
    };

    #[test]
    fn elapsed_formats_as_hours_minutes_seconds() {
        assert_eq!(Elapsed::from_seconds(0).to_string(), "0:00:00");
        assert_eq!(Elapsed::from_seconds(1).to_string(), "0:00:01");
        assert_eq!(Elapsed::from_seconds(18659).to_string(), "5:10:59");
        assert_eq!(Elapsed::from_seconds(315640).to_string(), "87:40:40");
    }

    #[test]
    fn it_rounds_to_three_decimals() {
        assert_eq!(round_decimals(6.228_97, 3), 6.229);
        assert_eq!(round_decimals(4.9327, 3), 4.933);
        assert_eq!(round_decimals(0.0, 3), 0.0);
    }
}
