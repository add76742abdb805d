/*!
 * Splitting of oversized output into paste-sized sections
 */

/// Section size used by chat mode, in bytes
pub const DEFAULT_SECTION_SIZE: usize = 20_000;

/// Text placed in front of the first section in chat mode
pub const CHAT_PREAMBLE: &str = "I have a lot of files to show you, I'm going to send you each section separately.
Tell me when you're ready for the first file.
Then continue to ask for the next file until we have completed all copying.

";

/// Split `text` into sections of at most `max_len` bytes, breaking only between lines
///
/// Text that already fits is returned as a single section. Joining the result
/// with `"\n"` gives back `text`. A line longer than `max_len` becomes a section
/// of its own. Empty input yields one empty section.
pub fn split(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut sections = Vec::new();
    let mut current = String::new();
    // Tracks "holds at least one line", since a line may itself be empty.
    let mut started = false;

    for line in text.split('\n') {
        if started && current.len() + line.len() + 1 > max_len {
            sections.push(std::mem::take(&mut current));
            started = false;
        }
        if started {
            current.push('\n');
        }
        current.push_str(line);
        started = true;
    }
    sections.push(current);

    sections
}

/// Ordered sections with pull-based access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    parts: Vec<String>,
}

impl Sections {
    /// Split `text` into sections of at most `max_len` bytes
    pub fn new(text: &str, max_len: usize) -> Self {
        Self {
            parts: split(text, max_len),
        }
    }

    /// Prefix the first section with `preamble`
    pub fn with_preamble(mut self, preamble: &str) -> Self {
        if let Some(first) = self.parts.first_mut() {
            first.insert_str(0, preamble);
        }
        self
    }

    /// Number of sections; never zero
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Always false, even empty text produces one section
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Section `index` (zero based)
    pub fn get(&self, index: usize) -> Option<&str> {
        self.parts.get(index).map(String::as_str)
    }

    /// Sections in delivery order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(String::as_str)
    }
}
