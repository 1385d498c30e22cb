use std::io::{BufRead, Write};

use crate::error::{validate_size, BenchError, Result};

pub const SIZE_PROMPT: &str = "Enter N (array size): ";

/// Asks for the array length on `output` and reads one line from `input`.
///
/// End of input, non-integers and values `<= 0` are all rejected.
pub fn read_size<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<usize> {
    write!(output, "{SIZE_PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let text = line.trim();

    let requested: i64 = text
        .parse()
        .map_err(|_| BenchError::UnparsableSize(text.to_string()))?;
    validate_size(requested)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(input: &str) -> (Result<usize>, String) {
        let mut out = Vec::new();
        let res = read_size(input.as_bytes(), &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_reads_positive_size() {
        let (res, shown) = ask("  1000\n");
        assert_eq!(res.unwrap(), 1000);
        assert_eq!(shown, SIZE_PROMPT);
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert!(matches!(ask("0\n").0, Err(BenchError::InvalidSize { requested: 0 })));
        assert!(matches!(ask("-3\n").0, Err(BenchError::InvalidSize { requested: -3 })));
    }

    #[test]
    fn test_rejects_garbage_and_eof() {
        assert!(matches!(ask("ten\n").0, Err(BenchError::UnparsableSize(s)) if s == "ten"));
        assert!(matches!(ask("").0, Err(BenchError::UnparsableSize(_))));
    }
}
