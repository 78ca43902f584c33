//! Input parsing for the interactive `play` command.
//!
//! Players address tiles by their position on the printed board (1-based).
//! An empty line advances the clock without picking anything.

/// Result of parsing one line typed during `play`.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// Zero-based board position of the tile to pick
    Pick(usize),
    /// Empty line: let the clock run
    Wait,
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse one line of player input.
///
/// # Example
///
/// ```rust
/// # use organpair_cli::validation::{parse_pick, ParseResult};
/// assert_eq!(parse_pick("3", 12), ParseResult::Pick(2));
/// assert_eq!(parse_pick("", 12), ParseResult::Wait);
/// assert_eq!(parse_pick("Q", 12), ParseResult::Quit);
/// assert!(matches!(parse_pick("13", 12), ParseResult::Invalid(_)));
/// ```
pub fn parse_pick(input: &str, board_len: usize) -> ParseResult {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "" => ParseResult::Wait,
        "q" | "quit" => ParseResult::Quit,
        s => match s.parse::<usize>() {
            Ok(n) if n >= 1 && n <= board_len => ParseResult::Pick(n - 1),
            Ok(n) => ParseResult::Invalid(format!(
                "Tile {} is off the board (1-{})",
                n, board_len
            )),
            Err(_) => ParseResult::Invalid(format!(
                "Unrecognized input '{}'. Enter a tile number, an empty line, or q",
                s
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(parse_pick("  1\t", 4), ParseResult::Pick(0));
        assert_eq!(parse_pick("   ", 4), ParseResult::Wait);
    }

    #[test]
    fn quit_is_case_insensitive() {
        assert_eq!(parse_pick("QUIT", 4), ParseResult::Quit);
    }

    #[test]
    fn zero_and_garbage_are_rejected() {
        match parse_pick("0", 4) {
            ParseResult::Invalid(msg) => assert!(msg.contains("off the board")),
            other => panic!("expected Invalid, got {:?}", other),
        }
        match parse_pick("liver", 4) {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert!(matches!(parse_pick("-1", 4), ParseResult::Invalid(_)));
    }
}
