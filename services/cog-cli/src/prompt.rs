//! Interactive band selection.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use hdf5_reader::BandPrompt;

/// Prints the available bands and reads one line as the answer.
pub struct LinePrompt<R, W> {
    io: RefCell<(R, W)>,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: RefCell::new((input, output)),
        }
    }
}

/// Prompt on the terminal.
pub fn stdin_prompt() -> LinePrompt<io::StdinLock<'static>, io::Stdout> {
    LinePrompt::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> BandPrompt for LinePrompt<R, W> {
    fn choose_band(&self, available: &[String]) -> io::Result<String> {
        let mut io = self.io.borrow_mut();
        let (input, output) = &mut *io;

        writeln!(output, "Available bands: {}", available.join(", "))?;
        write!(output, "Enter the band name: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no band name entered",
            ));
        }
        Ok(line.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_answer_and_lists_bands() {
        let prompt = LinePrompt::new(io::Cursor::new("  B04\n"), Vec::new());
        let answer = prompt
            .choose_band(&["B04".to_string(), "B08".to_string()])
            .unwrap();
        assert_eq!(answer, "B04");

        let (_, output) = prompt.io.into_inner();
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with("Available bands: B04, B08\n"));
        assert!(shown.ends_with("Enter the band name: "));
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let prompt = LinePrompt::new(io::Cursor::new(""), Vec::new());
        let err = prompt.choose_band(&["B04".to_string()]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
