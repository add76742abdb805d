/*!
 * Core types shared between the scanner, assembler and report
 */

/// Character count up to which the output pastes into any chat model
pub const SMALL_LIMIT: usize = 20_000;

/// Character count up to which the output pastes into long-context models
pub const MEDIUM_LIMIT: usize = 50_000;

/// Counters over the file contents that made it into the output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Number of files included
    pub files_processed: usize,
    /// Number of newline bytes across all contents
    pub total_lines: usize,
    /// Total byte length of all contents
    pub total_chars: usize,
}

impl ScanStatistics {
    /// Account for one file's contents
    pub fn record(&mut self, content: &[u8]) {
        self.files_processed += 1;
        self.total_lines += content.iter().filter(|&&b| b == b'\n').count();
        self.total_chars += content.len();
    }

    /// Size classification of the collected contents
    pub fn tier(&self) -> SizeTier {
        SizeTier::classify(self.total_chars)
    }
}

/// Advisory size classification of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// Fits any chat model
    Small,
    /// Fits models with larger context windows
    Medium,
    /// Unlikely to fit in one paste
    Large,
}

impl SizeTier {
    pub fn classify(chars: usize) -> Self {
        match chars {
            c if c <= SMALL_LIMIT => Self::Small,
            c if c <= MEDIUM_LIMIT => Self::Medium,
            _ => Self::Large,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}
