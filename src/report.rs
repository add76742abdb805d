/*!
 * Reporting functionality for treeclip
 *
 * Produces the end-of-run summary: the classic one-line totals, coloured by
 * size tier, and a small table rendered with the tabled crate.
 */

use colored::{Color, ColoredString, Colorize};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::{ScanStatistics, SizeTier};

/// Format of the report output
pub enum ReportFormat {
    /// Totals line only
    Line,
    /// Totals line followed by a summary table
    ConsoleTable,
}

/// Report generator for scan results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// The `Total lines .. Total Characters ..` line, coloured by tier
    pub fn totals_line(&self, stats: &ScanStatistics) -> ColoredString {
        let text = format!(
            "Total lines {} Total Characters {}",
            stats.total_lines, stats.total_chars
        );
        text.color(tier_color(stats.tier()))
    }

    /// Generate a report string based on scan statistics
    pub fn generate_report(&self, stats: &ScanStatistics) -> String {
        match self.format {
            ReportFormat::Line => self.totals_line(stats).to_string(),
            ReportFormat::ConsoleTable => format!(
                "{}\n{}",
                self.totals_line(stats),
                self.create_summary_table(stats)
            ),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, stats: &ScanStatistics) {
        println!("{}", self.generate_report(stats));
    }

    fn create_summary_table(&self, stats: &ScanStatistics) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "Files",
                value: stats.files_processed.to_string(),
            },
            SummaryRow {
                key: "Lines",
                value: format_number(stats.total_lines),
            },
            SummaryRow {
                key: "Characters",
                value: format_number(stats.total_chars),
            },
            SummaryRow {
                key: "LLM Tokens",
                value: format!("{} (estimated)", format_number(stats.total_chars / 4)),
            },
            SummaryRow {
                key: "Size",
                value: stats.tier().label().to_string(),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}

/// Advisory colour for a size tier
pub fn tier_color(tier: SizeTier) -> Color {
    match tier {
        SizeTier::Small => Color::Green,
        SizeTier::Medium => Color::Yellow,
        SizeTier::Large => Color::Red,
    }
}

/// Format a number with human-readable units
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}
