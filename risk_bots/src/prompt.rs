use std::{
    collections::VecDeque,
    io::{self, BufRead, Stdout, Write},
};

use tracing::{debug, warn};

/// Asks a person for a number.
pub trait Prompt {
    /// Returns an integer in `[0, max]`, asking again until one is given.
    fn retrieve_number(&mut self, query: &str, max: u32) -> u32;

    /// Shows a line that needs no answer.
    fn report(&mut self, message: &str);
}

pub struct TerminalPrompt<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self, query: &str) -> io::Result<Option<String>> {
        write!(self.output, "{query}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    /// Panics once the input is closed or unreadable.
    fn retrieve_number(&mut self, query: &str, max: u32) -> u32 {
        loop {
            let line = match self.read_answer(query) {
                Ok(Some(line)) => line,
                Ok(None) => panic!("Input closed while waiting for an answer."),
                Err(err) => panic!("Failed to read an answer: {err}"),
            };

            match line.trim().parse::<u32>() {
                Ok(value) if value <= max => return value,
                _ => self.report("Oops, looks like that wasn't a valid number."),
            }
        }
    }

    fn report(&mut self, message: &str) {
        if let Err(err) = writeln!(self.output, "{message}") {
            warn!(%err, "failed to write to the terminal");
        }
    }
}

/// Answers from a fixed list, skipping any that would be out of range.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<u32>,
    asked: Vec<String>,
    reports: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = u32>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
            reports: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// Every query shown so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn reports(&self) -> &[String] {
        &self.reports
    }
}

impl Prompt for ScriptedPrompt {
    fn retrieve_number(&mut self, query: &str, max: u32) -> u32 {
        self.asked.push(query.to_owned());
        loop {
            let answer = self
                .answers
                .pop_front()
                .unwrap_or_else(|| panic!("Scripted prompt ran out of answers at: {query}"));

            if answer <= max {
                return answer;
            }

            debug!(answer, max, "skipping scripted answer out of range");
        }
    }

    fn report(&mut self, message: &str) {
        self.reports.push(message.to_owned());
    }
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn retrieve_number(&mut self, query: &str, max: u32) -> u32 {
        (**self).retrieve_number(query, max)
    }

    fn report(&mut self, message: &str) {
        (**self).report(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_prompt_retries_until_valid() {
        let input = "-1\n10\nxyz\n5\n4\n".as_bytes();
        let mut prompt = TerminalPrompt::new(input, Vec::new());

        assert_eq!(prompt.retrieve_number("How many armies? (Up to 4) ", 4), 4);

        let output = String::from_utf8(prompt.into_output()).unwrap();
        assert_eq!(output.matches("How many armies?").count(), 5);
        assert_eq!(output.matches("Oops").count(), 4);
    }

    #[test]
    #[should_panic(expected = "Input closed")]
    fn terminal_prompt_panics_on_closed_input() {
        let mut prompt = TerminalPrompt::new("7\n".as_bytes(), Vec::new());
        prompt.retrieve_number("How many dice? ", 3);
    }

    #[test]
    fn scripted_prompt_skips_out_of_range() {
        let mut prompt = ScriptedPrompt::new([7, 2, 0]);
        assert_eq!(prompt.retrieve_number("pick", 3), 2);
        assert_eq!(prompt.remaining(), 1);
        assert_eq!(prompt.asked(), ["pick"]);
    }
}
