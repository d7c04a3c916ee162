//! Interactive anchor selection on the terminal.

use crate::core::collaborators::{AnchorCandidate, AnchorChoice, AnchorRequest, ChoiceProvider};
use crate::errors::AppResult;
use crate::utils::time::format_duration;
use ansi_term::Colour;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

pub struct ConsoleChoiceProvider<R: BufRead, W: Write> {
    input: R,
    out: W,
}

impl ConsoleChoiceProvider<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleChoiceProvider<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn print_candidates(&mut self, candidates: &[AnchorCandidate<'_>]) -> io::Result<()> {
        let width = candidates.len().to_string().len();
        for (i, c) in candidates.iter().enumerate() {
            let until = c
                .gap_end
                .map(|t| format!(" (until {})", t.format("%H:%M")))
                .unwrap_or_default();
            let line = format!("[{:>width$}] {}{}", i + 1, c.entry, until, width = width);
            let colour = if c.inside_window {
                Colour::White
            } else {
                Colour::Fixed(8)
            };
            writeln!(self.out, "{}", colour.paint(line))?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> ChoiceProvider for ConsoleChoiceProvider<R, W> {
    fn choose_anchor(
        &mut self,
        request: &AnchorRequest,
        candidates: &[AnchorCandidate<'_>],
    ) -> AppResult<AnchorChoice> {
        writeln!(
            self.out,
            "{}",
            Colour::Yellow.paint(format!(
                "Missing mandatory break time on {}; got {}, expected at least {}.",
                request.date,
                format_duration(request.total_pause),
                format_duration(request.required)
            ))
        )?;
        writeln!(
            self.out,
            "Please choose where to append {}; time will be appended AFTER the selected entry.",
            format_duration(request.remaining)
        )?;
        self.print_candidates(candidates)?;

        loop {
            write!(self.out, "Entry [1-{}, empty or q to skip]: ", candidates.len())?;
            self.out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(AnchorChoice::Cancelled);
            }

            let answer = line.trim();
            if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
                return Ok(AnchorChoice::Cancelled);
            }

            match answer.parse::<usize>() {
                Ok(n) if (1..=candidates.len()).contains(&n) => {
                    return Ok(AnchorChoice::Selected(n - 1));
                }
                _ => writeln!(self.out, "Invalid choice '{}'.", answer)?,
            }
        }
    }
}
