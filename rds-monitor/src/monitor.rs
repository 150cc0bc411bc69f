//! Group stream monitor
//!
//! Feeds groups into a decoder and prints the station state whenever it
//! changes. Groups come either from text lines (one group of four hex words
//! per line) or directly from a simulated station.

use std::io::{BufRead, Write};

use anyhow::Result;
use rds_protocol::{display, DecoderStats, Group, GroupDecoder, StationState};
use tracing::{debug, warn};

use crate::settings::OutputMode;

/// Decoder plus output formatting
pub struct Monitor {
    decoder: GroupDecoder,
    output: OutputMode,
    annotate: bool,
    last_printed: Option<StationState>,
    skipped_lines: u64,
}

impl Monitor {
    pub fn new(output: OutputMode, annotate: bool) -> Self {
        Self {
            decoder: GroupDecoder::new(),
            output,
            annotate,
            last_printed: None,
            skipped_lines: 0,
        }
    }

    pub fn stats(&self) -> DecoderStats {
        self.decoder.stats()
    }

    /// Lines that were neither blank nor a valid group
    pub fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }

    /// Read groups from text until end of input
    pub fn run_lines(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        for (index, line) in input.lines().enumerate() {
            self.handle_line(index + 1, &line?, out)?;
        }
        Ok(())
    }

    /// Decode one input line; malformed lines are logged and skipped
    pub fn handle_line(
        &mut self,
        line_number: usize,
        line: &str,
        out: &mut impl Write,
    ) -> Result<()> {
        let content = line.split('#').next().unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(());
        }

        match content.parse::<Group>() {
            Ok(group) => self.handle_group(&group, out),
            Err(e) => {
                warn!("Skipping line {}: {}", line_number, e);
                self.skipped_lines += 1;
                Ok(())
            }
        }
    }

    /// Apply one group and print whatever changed
    pub fn handle_group(&mut self, group: &Group, out: &mut impl Write) -> Result<()> {
        if self.annotate {
            writeln!(out, "{}", display::annotate_group(group).summary)?;
        }

        self.decoder.apply(group);

        if self.last_printed.as_ref() != Some(self.decoder.state()) {
            debug!("Station state changed after group {}", group);
            self.print_state(out)?;
            self.last_printed = Some(self.decoder.state().clone());
        }
        Ok(())
    }

    fn print_state(&self, out: &mut impl Write) -> Result<()> {
        let state = self.decoder.state();
        match self.output {
            OutputMode::Text => writeln!(out, "{}", state)?,
            OutputMode::Json => writeln!(out, "{}", serde_json::to_string(state)?)?,
        }
        Ok(())
    }

    /// Full multi-line report of the final state
    pub fn report(&self) -> String {
        display::render_station(self.decoder.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(monitor: &mut Monitor, input: &str) -> String {
        let mut out = Vec::new();
        monitor.run_lines(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_output_on_change() {
        let mut monitor = Monitor::new(OutputMode::Text, false);
        let out = run(
            &mut monitor,
            "6201 0408 E0CD 4B58\n6201 0408 E0CD 4B58\n6201 0409 E0CD 5254\n",
        );
        // The repeated group changes nothing and prints nothing
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "PI=6201 PTY=0 (None) PS=\"KX......\" RT=\"\" TP");
        assert_eq!(lines[1], "PI=6201 PTY=0 (None) PS=\"KXRT....\" RT=\"\" TP");
        assert_eq!(monitor.stats().groups, 3);
    }

    #[test]
    fn test_radio_text_progress_visible() {
        let mut monitor = Monitor::new(OutputMode::Text, false);
        let out = run(&mut monitor, "6201 2000 4142 4344\n6201 2001 4546 4748\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_ne!(lines[0], lines[1]);
        assert!(lines[0].contains("RT=\"ABCD\""));
        assert!(lines[1].contains("RT=\"ABCDEFGH\""));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let mut monitor = Monitor::new(OutputMode::Text, false);
        let out = run(
            &mut monitor,
            "# capture start\n\n6201 0408\nzzzz 0408 E0CD 4B58\n6201 0408 E0CD 4B58 # ok\n",
        );
        assert_eq!(monitor.skipped_lines(), 2);
        assert_eq!(monitor.stats().groups, 1);
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_json_output() {
        let mut monitor = Monitor::new(OutputMode::Json, false);
        let out = run(&mut monitor, "6201 04A0 E0CD 4B58\n");
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["station_identifier"], 0x6201);
        assert_eq!(value["program_type_code"], 5);
        assert_eq!(value["is_music"], true);
    }

    #[test]
    fn test_annotate_lines() {
        let mut monitor = Monitor::new(OutputMode::Text, true);
        let out = run(&mut monitor, "6201 0043 E0CD 5758\n");
        assert!(out.starts_with("0A PI=6201 PTY=2 PS[6..8]=\"WX\"\n"));
    }

    #[test]
    fn test_report() {
        let mut monitor = Monitor::new(OutputMode::Text, false);
        run(&mut monitor, "6201 04A0 E0CD 4B58\n");
        assert!(monitor.report().contains("5 Rock"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_line_is_decoded_or_skipped(line in "[ -~]{0,40}") {
                let mut monitor = Monitor::new(OutputMode::Text, true);
                let mut out = Vec::new();
                prop_assert!(monitor.handle_line(1, &line, &mut out).is_ok());

                let handled = monitor.stats().groups + monitor.skipped_lines();
                prop_assert!(handled <= 1);
            }

            #[test]
            fn formatted_groups_are_never_skipped(blocks in any::<[u16; 4]>()) {
                let mut monitor = Monitor::new(OutputMode::Json, false);
                let mut out = Vec::new();
                let line = Group::from(blocks).to_string();
                monitor.handle_line(1, &line, &mut out).unwrap();

                prop_assert_eq!(monitor.skipped_lines(), 0);
                prop_assert_eq!(monitor.stats().groups, 1);
                prop_assert!(!out.is_empty());
            }
        }
    }
}
