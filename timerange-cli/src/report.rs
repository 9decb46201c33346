use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use thiserror::Error;
use timerange::{TimeRange, TimeRangeError};
use timerange_core::ConfigError;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Range(#[from] TimeRangeError),
    #[error("configuration failed: {0}")]
    Config(#[from] ConfigError),
    #[error("could not render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Serializable view of a range for `--json` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeReport {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub center: DateTime<Utc>,
    pub seconds: f64,
}

impl From<&TimeRange> for RangeReport {
    fn from(range: &TimeRange) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
            center: range.center(),
            seconds: range.seconds(),
        }
    }
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn print_summary(range: &TimeRange) {
    println!("{}", "✔ Time range".green().bold());
    for line in range.to_string().lines() {
        println!("  {line}");
    }
}

pub fn print_ranges(title: &str, ranges: &[TimeRange]) {
    println!(
        "{} {}",
        format!("✔ {title}:").green().bold(),
        ranges.len().to_string().bold()
    );
    for (index, range) in ranges.iter().enumerate() {
        println!(
            "  {:>4}  {} → {}",
            index,
            range.start().format(TIME_FORMAT),
            range.end().format(TIME_FORMAT)
        );
    }
}

pub fn print_membership(range: &TimeRange, time: &str, contained: bool) {
    let verdict = if contained {
        "✔ inside".green().bold()
    } else {
        "✘ outside".red().bold()
    };
    println!(
        "{} {} [{} → {}]",
        verdict,
        time.bold(),
        range.start().format(TIME_FORMAT),
        range.end().format(TIME_FORMAT)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_mirrors_range() {
        let range = TimeRange::new("2012/1/1", "2012/1/2").unwrap();
        let report = RangeReport::from(&range);
        assert_eq!(report.start, range.start());
        assert_eq!(report.end, range.end());
        assert_eq!(report.center, range.center());
        assert_eq!(report.seconds, 86_400.0);
    }

    #[test]
    fn renders_reports_as_json() {
        let range = TimeRange::new("2012/1/1", "2012/1/2").unwrap();
        let reports: Vec<RangeReport> = range.split(2).unwrap().iter().map(Into::into).collect();
        let json = render_json(&reports).expect("serialize");
        let decoded: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(decoded.as_array().map(Vec::len), Some(2));
        assert_eq!(decoded[1]["start"], "2012-01-01T12:00:00Z");
        assert_eq!(decoded[0]["seconds"], 43_200.0);
    }

    #[test]
    fn range_errors_keep_their_message() {
        let err = CliError::from(TimeRangeError::InvalidSplit(0));
        assert_eq!(err.to_string(), "cannot split a time range into 0 parts");
    }
}
