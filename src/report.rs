use std::io::Write;

use chrono::{SecondsFormat, Utc};
use owo_colors::{OwoColorize, Stream, Style};
use serde::Serialize;

use crate::errors::LoxbenchError;
use crate::types::{BenchmarkResult, ColorMode, OutputFormat};

/// Render a rounded time the way it is shown in the report: shortest
/// round-trip form with at least one fractional digit (`1.0`, `0.1235`).
pub fn format_time(time: f64) -> String {
    format!("{:?}", time)
}

/// Plain `<name>: <time>` line, without trailing newline.
pub fn format_line(result: &BenchmarkResult) -> String {
    format!("{}: {}", result.name, format_time(result.time))
}

fn style_name() -> Style {
    Style::new().bold()
}

/// JSON Lines record.
#[derive(Serialize)]
struct JsonRecord<'a> {
    name: &'a str,
    time: f64,
    samples: &'a [f64],
    recorded_at: String,
}

/// Streams one line per benchmark result, flushing after each.
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
    color: ColorMode,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat, color: ColorMode) -> Self {
        Self { out, format, color }
    }

    pub fn report(&mut self, result: &BenchmarkResult) -> Result<(), LoxbenchError> {
        let line = match self.format {
            OutputFormat::Text => self.text_line(result),
            OutputFormat::Json => {
                let record = JsonRecord {
                    name: &result.name,
                    time: result.time,
                    samples: &result.samples,
                    recorded_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                };
                serde_json::to_string(&record)
                    .map_err(|e| LoxbenchError::Output { source: e.into() })?
            }
        };

        writeln!(self.out, "{}", line).map_err(|source| LoxbenchError::Output { source })?;
        self.out
            .flush()
            .map_err(|source| LoxbenchError::Output { source })
    }

    fn text_line(&self, result: &BenchmarkResult) -> String {
        let name = match self.color {
            ColorMode::Never => return format_line(result),
            ColorMode::Always => result.name.style(style_name()).to_string(),
            ColorMode::Auto => result
                .name
                .if_supports_color(Stream::Stdout, |s| s.style(style_name()))
                .to_string(),
        };
        format!("{}: {}", name, format_time(result.time))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, time: f64) -> BenchmarkResult {
        BenchmarkResult {
            name: name.to_string(),
            time,
            samples: vec![time, time + 1.0],
        }
    }

    fn render(format: OutputFormat, color: ColorMode, results: &[BenchmarkResult]) -> String {
        let mut reporter = Reporter::new(Vec::new(), format, color);
        for r in results {
            reporter.report(r).unwrap();
        }
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn time_keeps_one_fractional_digit() {
        assert_eq!(format_time(1.0), "1.0");
        assert_eq!(format_time(0.0), "0.0");
        assert_eq!(format_time(0.1235), "0.1235");
        assert_eq!(format_time(12.5), "12.5");
        assert_eq!(format_time(0.0001), "0.0001");
    }

    #[test]
    fn plain_line() {
        assert_eq!(format_line(&result("fib.lox", 1.2346)), "fib.lox: 1.2346");
    }

    #[test]
    fn text_lines_in_report_order() {
        let out = render(
            OutputFormat::Text,
            ColorMode::Never,
            &[result("a.lox", 2.0), result("b.lox", 0.5)],
        );
        assert_eq!(out, "a.lox: 2.0\nb.lox: 0.5\n");
    }

    #[test]
    fn always_color_styles_name_only() {
        let out = render(OutputFormat::Text, ColorMode::Always, &[result("a.lox", 2.0)]);
        assert!(out.contains("\u{1b}["));
        assert!(out.ends_with(": 2.0\n"));
        assert!(out.contains("a.lox"));
    }

    #[test]
    fn json_lines() {
        let out = render(
            OutputFormat::Json,
            ColorMode::Always,
            &[result("a.lox", 2.0), result("b.lox", 0.5)],
        );
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["name"], "a.lox");
        assert_eq!(first["time"], 2.0);
        assert_eq!(first["samples"].as_array().unwrap().len(), 2);
        assert!(first["recorded_at"].as_str().unwrap().ends_with('Z'));

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["name"], "b.lox");
        assert!(!lines[0].contains('\u{1b}'));
    }
}
