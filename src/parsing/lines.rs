//! Line splitting shared by the log and tree readers.
//!
//! Lines end at `\n`, `\r\n` or a lone `\r`, so files written on any platform
//! (including classic Mac line endings) number their lines the same way.
//! Lines are yielded as raw bytes; decoding is left to the caller.

use std::collections::VecDeque;
use std::io::BufRead;

/// Iterator over the raw lines of a buffered reader, terminators removed
pub struct UniversalLines<R> {
    reader: R,
    pending: VecDeque<Vec<u8>>,
    done: bool,
}

impl<R: BufRead> UniversalLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for UniversalLines<R> {
    type Item = std::io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(line) = self.pending.pop_front() {
            return Some(Ok(line));
        }
        if self.done {
            return None;
        }

        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
                self.pending
                    .extend(buf.split(|&b| b == b'\r').map(<[u8]>::to_vec));
                self.pending.pop_front().map(Ok)
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(input: &[u8]) -> Vec<String> {
        UniversalLines::new(input)
            .map(|line| String::from_utf8(line.unwrap()).unwrap())
            .collect()
    }

    #[test]
    fn test_unix_and_windows_endings() {
        assert_eq!(split(b"a\nb\r\nc"), vec!["a", "b", "c"]);
        assert_eq!(split(b"a\n\nb\n"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_lone_carriage_return() {
        assert_eq!(split(b"a\rb\rc\r"), vec!["a", "b", "c"]);
        assert_eq!(split(b"a\r\r\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split(b"").is_empty());
    }

    #[test]
    fn test_non_utf8_bytes_pass_through() {
        let lines: Vec<Vec<u8>> = UniversalLines::new(&b"caf\xe9\nok\n"[..])
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines, vec![b"caf\xe9".to_vec(), b"ok".to_vec()]);
    }
}
