//! Input helpers shared by interactive commands.

use std::io::BufRead;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// Returns the trimmed line, or `None` on EOF or read error.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// # use organpair_cli::io_utils::read_stdin_line;
///
/// let mut input = Cursor::new(b"  7 \n");
/// assert_eq!(read_stdin_line(&mut input).as_deref(), Some("7"));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}
