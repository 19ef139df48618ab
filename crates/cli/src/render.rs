//! Human-readable report layout.

use std::fmt::{self, Write};

use prodsent_stats::{Record, StatsReport};

use crate::util::pad_right;

const RULE_WIDTH: usize = 60;
const SECTION_WIDTH: usize = 40;
const WORD_COLUMN: usize = 20;

pub(crate) fn render_human(report: &StatsReport) -> Result<String, fmt::Error> {
    let rule = "=".repeat(RULE_WIDTH);
    let section = "-".repeat(SECTION_WIDTH);
    let mut out = String::new();

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "SENTIMENT ANALYSIS RESULTS")?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;

    writeln!(out, "Most Positive Product:")?;
    writeln!(out, "{section}")?;
    write_product(&mut out, report.most_positive.as_ref(), "No positive products found")?;

    writeln!(out)?;
    writeln!(out, "{section}")?;
    writeln!(out, "Most Negative Product:")?;
    writeln!(out, "{section}")?;
    write_product(&mut out, report.most_negative.as_ref(), "No negative products found")?;

    writeln!(out)?;
    writeln!(out, "{section}")?;
    writeln!(out, "Top {} Most Used Words:", report.meta.word_limit)?;
    writeln!(out, "{section}")?;
    for (i, wc) in report.top_words.iter().enumerate() {
        writeln!(
            out,
            "{:2}. {} - {} occurrences",
            i + 1,
            pad_right(&wc.word, WORD_COLUMN),
            wc.count
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    Ok(out)
}

fn write_product(out: &mut String, record: Option<&Record>, missing: &str) -> fmt::Result {
    match record {
        Some(r) => {
            writeln!(out, "{}", r.identity())?;
            writeln!(out, "{}", r.raw_text())?;
            // Debug keeps the fractional part: 1.0, never 1
            writeln!(out, "{:?}", r.confidence())
        }
        None => writeln!(out, "{missing}"),
    }
}

/// One-line summary for stderr.
pub(crate) fn summary_line(report: &StatsReport) -> String {
    let s = &report.summary;
    let mut line = format!(
        "{} products: {} positive, {} negative, {} unknown",
        s.labels.total, s.labels.positive, s.labels.negative, s.labels.unknown
    );
    if s.classification_failures > 0 {
        line.push_str(&format!(", {} classification failures", s.classification_failures));
    }
    if s.skipped_rows > 0 {
        line.push_str(&format!(", {} rows skipped", s.skipped_rows));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodsent_stats::{Label, RunContext, Statistics, StatsConfig};

    fn report(records: &[Record], limit: usize) -> StatsReport {
        let mut config = StatsConfig::default();
        config.words.limit = limit;
        Statistics::new(records).report(&config, &RunContext::default())
    }

    #[test]
    fn full_layout() {
        let records = vec![
            Record::new("A", "great product", Label::Positive, 0.95, "great product"),
            Record::new("B", "bad product", Label::Negative, 0.88, "bad product"),
        ];
        let text = render_human(&report(&records, 2)).unwrap();
        let expected = "
============================================================
SENTIMENT ANALYSIS RESULTS
============================================================

Most Positive Product:
----------------------------------------
A
great product
0.95

----------------------------------------
Most Negative Product:
----------------------------------------
B
bad product
0.88

----------------------------------------
Top 2 Most Used Words:
----------------------------------------
 1. product              - 2 occurrences
 2. great                - 1 occurrences

============================================================
";
        assert_eq!(text, expected);
    }

    #[test]
    fn missing_polarities_are_reported() {
        let records = vec![Record::new("U", "plain", Label::Unknown, 0.0, "plain")];
        let text = render_human(&report(&records, 10)).unwrap();
        assert!(text.contains("No positive products found"));
        assert!(text.contains("No negative products found"));
        assert!(text.contains("Top 10 Most Used Words:"));
    }

    #[test]
    fn zero_limit_prints_header_only() {
        let records = vec![Record::new("U", "plain", Label::Unknown, 0.0, "plain")];
        let text = render_human(&report(&records, 0)).unwrap();
        assert!(text.contains("Top 0 Most Used Words:"));
        assert!(!text.contains("occurrences"));
    }

    #[test]
    fn whole_confidence_keeps_decimal_point() {
        let records = vec![
            Record::new("A", "extremely amazing", Label::Positive, 1.0, "extremely amazing"),
            Record::new("B", "awful", Label::Negative, 0.5, "awful"),
        ];
        let text = render_human(&report(&records, 0)).unwrap();
        assert!(text.contains("A\nextremely amazing\n1.0\n"));
        assert!(text.contains("B\nawful\n0.5\n"));
    }

    #[test]
    fn summary_mentions_failures_only_when_present() {
        let records = vec![Record::new("U", "plain", Label::Unknown, 0.0, "plain")];
        let clean = report(&records, 1);
        assert_eq!(summary_line(&clean), "1 products: 0 positive, 0 negative, 1 unknown");

        let mut noisy = clean.clone();
        noisy.summary.classification_failures = 1;
        noisy.summary.skipped_rows = 2;
        assert!(summary_line(&noisy).ends_with("1 classification failures, 2 rows skipped"));
    }
}
