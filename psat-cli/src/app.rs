use std::{
    collections::HashSet,
    io::Write,
};

use color_eyre::eyre::bail;
use psat::{
    DecodedRecord,
    Decoder,
    Family,
    Strictness,
    report::{
        self,
        Report,
    },
    scan,
};

use crate::{
    Error,
    archive::Archive,
    args::{
        Args,
        Command,
        OutputFormat,
    },
    files::Config,
    reader::Input,
};

/// Settings after merging the command line with the config file.
#[derive(Debug)]
pub struct App {
    decoder: Decoder,
    comment: String,
    output: OutputFormat,
    legend: bool,
    archive: Option<Archive>,
    families: HashSet<Family>,
}

impl App {
    pub fn new(args: &Args, config: Config) -> Result<Self, Error> {
        let strictness = if args.strict {
            Strictness::Strict
        }
        else {
            config.strictness
        };

        let archive = args
            .archive
            .as_ref()
            .or(config.archive_dir.as_ref())
            .map(Archive::open)
            .transpose()?;

        Ok(Self {
            decoder: Decoder::new(strictness),
            comment: args.comment.clone().unwrap_or(config.comment),
            output: args.output,
            legend: args.legend,
            archive,
            families: HashSet::new(),
        })
    }

    pub fn run(&mut self, command: &Command, input: &Input, out: &mut impl Write) -> Result<(), Error> {
        let result = match command {
            Command::Scan { .. } => {
                scan(&input.text)
                    .try_for_each(|frame| writeln!(out, "{}", frame.as_str()))
                    .map_err(Error::from)
            }
            Command::Decode { .. } => self.decode_submissions(input, out),
            Command::Stream { .. } => self.decode_stream(input, out),
        };

        // legends are printed even if some submissions failed
        if self.legend {
            self.write_legends(out)?;
        }

        result
    }

    fn decode_submissions(&mut self, input: &Input, out: &mut impl Write) -> Result<(), Error> {
        let mut total = 0;
        let mut failed = 0;

        for line in input.lines() {
            total += 1;
            match self.decoder.decode_submission(line, &self.comment) {
                Ok(record) => self.emit(&input.source, line, &record, out)?,
                Err(error) => {
                    tracing::warn!(line, %error, "failed to decode submission");
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            bail!("{failed} of {total} submissions could not be decoded");
        }
        Ok(())
    }

    fn decode_stream(&mut self, input: &Input, out: &mut impl Write) -> Result<(), Error> {
        let mut decoded = 0;
        let comment = self.comment.clone();

        for (frame, result) in self.decoder.decode_stream(&input.text, &comment) {
            // the library already logs failures
            let Ok(record) = result
            else {
                continue;
            };
            let raw = format!("PSAT-2 {}", frame.as_str());
            self.emit(&input.source, &raw, &record, out)?;
            decoded += 1;
        }

        tracing::info!(decoded, "decoded stream");
        Ok(())
    }

    fn emit(
        &mut self,
        source: &str,
        raw: &str,
        record: &DecodedRecord,
        out: &mut impl Write,
    ) -> Result<(), Error> {
        let report = report::format(record);

        match self.output {
            OutputFormat::Report => write_report(out, &report)?,
            OutputFormat::Table => write!(out, "{}", report.row)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
        }

        if let Some(archive) = &self.archive {
            archive.append(source, raw, record, &report)?;
        }

        self.families.insert(record.frame.family());
        Ok(())
    }

    fn write_legends(&self, out: &mut impl Write) -> Result<(), Error> {
        for family in [Family::Psk, Family::Sstv] {
            if self.families.contains(&family) {
                writeln!(out, "---- Legend ({family}) ----")?;
                writeln!(out)?;
                write!(out, "{}", report::legend(family))?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

fn write_report(out: &mut impl Write, report: &Report) -> Result<(), Error> {
    write!(out, "{}", report.human)?;
    writeln!(out)?;
    writeln!(out, "---- Spreadsheet format ----")?;
    writeln!(out)?;
    write!(out, "{}", report.row)?;
    writeln!(out)?;
    Ok(())
}
