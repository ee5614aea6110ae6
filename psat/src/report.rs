//! Formatting of decoded frames
//!
//! There are two renderings of every record: a report for humans with one
//! labelled line per field, and spreadsheet rows with tab separated columns:
//!
//! ```text
//! annotation, (empty), clock, H:MM:SS, mode, fields...
//! ```
//!
//! A PSK frame with a history record produces a second row for it.

use std::fmt::{
    Display,
    Formatter,
    Result,
};

use crate::{
    DecodedRecord,
    Family,
    TelemetryFrame,
    psk::{
        PskFrame,
        PskRecord,
    },
    sstv::{
        SSTV_MODE,
        SstvFrame,
    },
};

/// Both renderings of a record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub human: String,
    /// One line per row, each terminated with `\n`.
    pub row: String,
}

pub fn format(record: &DecodedRecord) -> Report {
    Report {
        human: HumanReport(&record.frame).to_string(),
        row: SpreadsheetRows {
            annotation: &record.annotation,
            frame: &record.frame,
        }
        .to_string(),
    }
}

/// Human readable report of a frame.
#[derive(Clone, Copy, Debug)]
pub struct HumanReport<'a>(pub &'a TelemetryFrame);

impl Display for HumanReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.0 {
            TelemetryFrame::Psk(frame) => write_psk_report(f, frame),
            TelemetryFrame::Sstv(frame) => write_sstv_report(f, frame),
        }
    }
}

fn write_psk_record(f: &mut Formatter<'_>, record: &PskRecord) -> Result {
    writeln!(f, "Mode: {}", record.mode)?;
    writeln!(f)?;
    writeln!(
        f,
        "ClockTimer = {} ticks = {}",
        record.clock,
        record.elapsed()
    )?;
    writeln!(f)?;
    writeln!(f, "RebootCnt  = {} times", record.reboot_count)?;
    writeln!(f, "val_PSK    = {} %", record.psk_success)?;
    writeln!(f, "val_AGC    = {}", record.agc)?;
    writeln!(
        f,
        "val_Vbat   = {} = {} V",
        record.battery_raw,
        record.battery_voltage()
    )?;
    writeln!(
        f,
        "val_5V     = {} = {} V",
        record.rail_raw,
        record.rail_voltage()
    )?;
    writeln!(f, "val_Ic     = {} mA", record.charge_current)?;
    writeln!(f, "val_T_RX   = {} deg C", record.rx_temperature)?;
    writeln!(f)
}

fn write_psk_report(f: &mut Formatter<'_>, frame: &PskFrame) -> Result {
    writeln!(f, "---- Current frame ----")?;
    writeln!(f)?;
    write_psk_record(f, &frame.current)?;

    writeln!(f, "status.PeriodNr       = {}", frame.status.period_nr())?;
    writeln!(f, "status.PeriodsSSTV_RX = {}", frame.status.periods_sstv_rx())?;
    writeln!(f, "status.PeriodsRX      = {}", frame.status.periods_rx())?;
    writeln!(f, "status.PeriodsTX      = {}", frame.status.periods_tx())?;
    writeln!(f)?;
    writeln!(f)?;

    if let Some(history) = &frame.history {
        writeln!(f, "---- History frame ----")?;
        writeln!(f)?;
        write_psk_record(f, history)?;
    }

    Ok(())
}

fn write_sstv_report(f: &mut Formatter<'_>, frame: &SstvFrame) -> Result {
    let counters = &frame.counters;

    writeln!(f, "---- Current frame ----")?;
    writeln!(f)?;
    writeln!(f, "Mode: {SSTV_MODE}")?;
    writeln!(f)?;
    writeln!(f, "Tick = {} sec = {}", frame.tick, frame.elapsed())?;
    writeln!(f)?;
    writeln!(f, "ADC_Temperature = {} deg C", frame.temperature)?;
    writeln!(f, "ADC_Light       = {} lux", frame.light())?;
    writeln!(f, "Plan_Auth       = {}", frame.plan_auth)?;
    writeln!(f, "Plan_*_Count    = {}", frame.plan_count)?;
    writeln!(f)?;
    writeln!(f, "cnt_Boot        = {} times", counters.boot)?;
    writeln!(f, "cnt_*_Error     = {} times", counters.error)?;
    writeln!(f, "cnt_AudioStart  = {} times", counters.audio_start)?;
    writeln!(f, "cnt_CamSnapshot = {} times", counters.cam_snapshot)?;
    writeln!(f, "cnt_CmdHandled  = {} times", counters.cmd_handled)?;
    writeln!(f, "cnt_CmdIgnored  = {} times", counters.cmd_ignored)?;
    writeln!(f, "cnt_AuthError   = {} times", counters.auth_error)
}

/// Spreadsheet rows of a frame.
#[derive(Clone, Copy, Debug)]
pub struct SpreadsheetRows<'a> {
    pub annotation: &'a str,
    pub frame: &'a TelemetryFrame,
}

impl SpreadsheetRows<'_> {
    fn write_psk_row(&self, f: &mut Formatter<'_>, record: &PskRecord) -> Result {
        writeln!(
            f,
            "{}\t\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.annotation,
            record.clock,
            record.elapsed(),
            record.mode,
            record.reboot_count,
            record.psk_success,
            record.agc,
            record.battery_voltage(),
            record.rail_voltage(),
            record.charge_current,
            record.rx_temperature,
        )
    }

    fn write_sstv_row(&self, f: &mut Formatter<'_>, frame: &SstvFrame) -> Result {
        let counters = &frame.counters;
        writeln!(
            f,
            "{}\t\t{}\t{}\t{SSTV_MODE}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.annotation,
            frame.tick,
            frame.elapsed(),
            frame.temperature,
            frame.light(),
            frame.plan_auth,
            frame.plan_count,
            counters.boot,
            counters.error,
            counters.audio_start,
            counters.cam_snapshot,
            counters.cmd_handled,
            counters.cmd_ignored,
            counters.auth_error,
        )
    }
}

impl Display for SpreadsheetRows<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.frame {
            TelemetryFrame::Psk(frame) => {
                self.write_psk_row(f, &frame.current)?;
                if let Some(history) = &frame.history {
                    self.write_psk_row(f, history)?;
                }
                Ok(())
            }
            TelemetryFrame::Sstv(frame) => self.write_sstv_row(f, frame),
        }
    }
}

/// Footnotes explaining the less obvious fields of a family's report.
pub fn legend(family: Family) -> &'static str {
    match family {
        Family::Psk => {
            "\
ClockTimer - frame counter, incremented every 20 sec, persistent on reboot
"
        }
        Family::Sstv => {
            "\
Tick - number of seconds elapsed since reboot, not persistent on reboot
Plan_Auth - seconds for which the authorization stays valid (zero if not authorized)
Plan_*_Count - number of planned events (sum of sstv_live, sstv_save, psk and cw)
cnt_Boot - count of BOOT
cnt_*_Error - sum of HARDFAULT, FLASH_INIT_ERROR, FLASH_TIMEOUT, CAM_I2C_ERROR, CAM_DCMI_ERROR, CAM_SIZE_ERROR, JPEG_ERROR and PSK_TIMEOUT
cnt_AudioStart - count of AUDIO_START (start of SSTV/PSK/CW transmission)
cnt_CamSnapshot - count of CAM_SNAPSHOT (frame transferred via DCMI)
cnt_CmdHandled - sum of CMD_HANDLED and PSK_UPLINK (accepted command from APRS or CW)
cnt_CmdIgnored - count of CMD_IGNORED (rejected data from APRS)
cnt_AuthError - count of AUTH_ERROR (restricted command without authorization)
"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Report,
        format,
        legend,
    };
    use crate::{
        Decoder,
        Family,
    };

    fn report(submission: &str, annotation: &str) -> Report {
        let record = Decoder::default()
            .decode_submission(submission, annotation)
            .unwrap();
        format(&record)
    }

    #[test]
    fn psk_report_with_history() {
        let report = report(
            "PSAT-2 C apng eFaaijtkpokoaB aaaa A aokF eEadjluappjxay",
            "OK1ABC",
        );

        let expected_human = "\
---- Current frame ----

Mode: C

ClockTimer = 15782 ticks = 87:40:40

RebootCnt  = 159 times
val_PSK    = 0 %
val_AGC    = 265
val_Vbat   = 618 = 6.229 V
val_5V     = 494 = 4.933 V
val_Ic     = 334 mA
val_T_RX   = 27 deg C

status.PeriodNr       = 0
status.PeriodsSSTV_RX = 0
status.PeriodsRX      = 0
status.PeriodsTX      = 0


---- History frame ----

Mode: A

ClockTimer = 14687 ticks = 81:35:40

RebootCnt  = 158 times
val_PSK    = 3 %
val_AGC    = 299
val_Vbat   = 640 = 6.451 V
val_5V     = 495 = 4.943 V
val_Ic     = 311 mA
val_T_RX   = 24 deg C

";
        assert_eq!(report.human, expected_human);

        assert_eq!(
            report.row,
            "OK1ABC\t\t15782\t87:40:40\tC\t159\t0\t265\t6.229\t4.933\t334\t27\n\
             OK1ABC\t\t14687\t81:35:40\tA\t158\t3\t299\t6.451\t4.943\t311\t24\n"
        );
    }

    #[test]
    fn psk_report_without_history() {
        let report = report("PSAT-2 A aaaaaa aaaaaaaaaaaaaa AA aa", "");
        assert!(report.human.contains("ClockTimer = 0 ticks = 0:00:00\n"));
        assert!(report.human.contains("val_Vbat   = 0 = 0 V\n"));
        assert!(!report.human.contains("History frame"));
        assert!(report.human.ends_with("status.PeriodsTX      = 26\n\n\n"));
        assert_eq!(report.row, "\t\t0\t0:00:00\tA\t0\t0\t0\t0\t0\t0\t0\n");
    }

    #[test]
    fn sstv_report() {
        let report = report("PSAT-2 S ashd aDbiaaaa qralaitkboFxaa", "[1] OK1ABC");

        let expected_human = "\
---- Current frame ----

Mode: S

Tick = 18659 sec = 5:10:59

ADC_Temperature = 29 deg C
ADC_Light       = 40 lux
Plan_Auth       = 0
Plan_*_Count    = 0

cnt_Boot        = 529 times
cnt_*_Error     = 11 times
cnt_AudioStart  = 8 times
cnt_CamSnapshot = 618 times
cnt_CmdHandled  = 46 times
cnt_CmdIgnored  = 1015 times
cnt_AuthError   = 0 times
";
        assert_eq!(report.human, expected_human);
        assert_eq!(
            report.row,
            "[1] OK1ABC\t\t18659\t5:10:59\tS\t29\t40\t0\t0\t529\t11\t8\t618\t46\t1015\t0\n"
        );
    }

    #[test]
    fn negative_temperatures_are_formatted() {
        let report = report("PSAT-2 S aaab syaaaaaa aaaaaaaaaaaaaa", "");
        assert!(report.human.contains("ADC_Temperature = -424 deg C\n"));
    }

    #[test]
    fn legends_mention_the_counters() {
        assert!(legend(Family::Psk).starts_with("ClockTimer"));
        assert!(legend(Family::Sstv).contains("cnt_AuthError"));
    }
}
