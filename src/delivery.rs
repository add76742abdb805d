/*!
 * Handing the assembled text to the clipboard
 *
 * Normal mode copies everything at once. Chat mode copies one section at a
 * time and waits for a line of input before each following section.
 */

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::clipboard::Clipboard;
use crate::error::Result;
use crate::sections::{Sections, CHAT_PREAMBLE};

/// Outcome of a sectioned delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryOutcome {
    /// Sections that reached the clipboard
    pub delivered: usize,
    /// Sections produced by the splitter
    pub total: usize,
}

impl DeliveryOutcome {
    pub fn is_complete(&self) -> bool {
        self.delivered == self.total
    }
}

/// Writes assembled text to a clipboard
pub struct Delivery<'a, C: Clipboard + ?Sized> {
    clipboard: &'a C,
}

impl<'a, C: Clipboard + ?Sized> Delivery<'a, C> {
    pub fn new(clipboard: &'a C) -> Self {
        Self { clipboard }
    }

    /// Copy `text` in one write
    pub fn copy_all(&self, text: &str) -> Result<()> {
        debug!("Copying {} bytes to clipboard", text.len());
        self.clipboard.write(text)?;
        Ok(())
    }

    /// Split `text` for chat mode and walk the user through copying each part
    ///
    /// Prompts go to `out`; each press of Enter on `input` copies the next
    /// section. End of input stops early.
    pub fn copy_sections<R: BufRead, W: Write>(
        &self,
        text: &str,
        section_size: usize,
        input: &mut R,
        out: &mut W,
    ) -> Result<DeliveryOutcome> {
        let sections = Sections::new(text, section_size).with_preamble(CHAT_PREAMBLE);
        let total = sections.len();

        writeln!(
            out,
            "Entering ChatGPT mode: splitting output into {} sections (~{} chars each)",
            total, section_size
        )?;

        let mut delivered = 0;
        for (index, section) in sections.iter().enumerate() {
            if index == 0 {
                self.clipboard.write(section)?;
                writeln!(
                    out,
                    "Copied section 1 of {} to clipboard. Paste into ChatGPT, then press [Enter] for next section.",
                    total
                )?;
            } else {
                write!(
                    out,
                    "[Section {}/{}] Press [Enter] to copy next section to clipboard...",
                    index + 1,
                    total
                )?;
                out.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    writeln!(out)?;
                    warn!("Input closed after {} of {} sections", delivered, total);
                    break;
                }

                self.clipboard.write(section)?;
                writeln!(out, "Section {} copied to clipboard!", index + 1)?;
            }
            delivered += 1;
        }

        Ok(DeliveryOutcome { delivered, total })
    }
}
