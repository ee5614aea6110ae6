use std::{
    path::PathBuf,
    str::FromStr,
};

use clap::{
    Parser,
    Subcommand,
};
use color_eyre::eyre::bail;

use crate::Error;

#[derive(Debug, Parser)]
#[clap(version, about = "Decodes telemetry of the PSAT-2 satellite")]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,

    /// Report damaged frames instead of reading missing values as 0.
    #[clap(long, global = true)]
    pub strict: bool,

    /// Annotation added to every decoded frame, e.g. your callsign.
    #[clap(short, long, global = true)]
    pub comment: Option<String>,

    /// Append decoded frames to the archive files in this directory.
    #[clap(long, global = true)]
    pub archive: Option<PathBuf>,

    /// Use this config file instead of the one in the user's config directory.
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// How decoded frames are printed.
    #[clap(short, long, global = true, default_value = "report")]
    pub output: OutputFormat,

    /// Explain the fields after the output.
    #[clap(long, global = true)]
    pub legend: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the frames found in a capture, one per line.
    Scan {
        /// Capture to read. Reads stdin if omitted.
        input: Option<PathBuf>,
    },

    /// Decode submitted frames, one per line, e.g. `PSAT-2 S ashd aDbiaaaa
    /// qralaitkboFxaa`.
    Decode {
        /// File with one submission per line. Reads stdin if omitted.
        input: Option<PathBuf>,
    },

    /// Decode every frame found in a capture.
    Stream {
        /// Capture to read. Reads stdin if omitted.
        input: Option<PathBuf>,
    },
}

impl Command {
    pub fn input(&self) -> Option<&PathBuf> {
        match self {
            Self::Scan { input } | Self::Decode { input } | Self::Stream { input } => {
                input.as_ref()
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable report followed by the spreadsheet rows.
    #[default]
    Report,
    /// Spreadsheet rows only.
    Table,
    /// One JSON object per frame.
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "report" => Ok(Self::Report),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => bail!("Unknown output format: {s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{
        Args,
        Command,
        OutputFormat,
    };

    #[test]
    fn global_flags_follow_the_subcommand() {
        let args = Args::try_parse_from([
            "psat-cli",
            "stream",
            "capture.txt",
            "--strict",
            "-c",
            "OK1ABC",
            "--output",
            "table",
        ])
        .unwrap();

        assert!(args.strict);
        assert_eq!(args.comment.as_deref(), Some("OK1ABC"));
        assert_eq!(args.output, OutputFormat::Table);
        assert!(matches!(args.command, Command::Stream { .. }));
        assert_eq!(
            args.command.input().unwrap().to_str(),
            Some("capture.txt")
        );
    }

    #[test]
    fn input_defaults_to_stdin() {
        let args = Args::try_parse_from(["psat-cli", "decode"]).unwrap();
        assert_eq!(args.command.input(), None);
        assert_eq!(args.output, OutputFormat::Report);
    }

    #[test]
    fn unknown_output_formats_are_rejected() {
        assert!(Args::try_parse_from(["psat-cli", "scan", "--output", "csv"]).is_err());
    }
}
