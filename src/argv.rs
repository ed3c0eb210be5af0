//! Argument vector construction for executed commands
//!
//! Splits on unquoted whitespace. Single quotes preserve everything
//! literally, double quotes preserve whitespace but honour backslash
//! escapes, and an unquoted backslash escapes the next character.

use crate::error::{BenchError, Result};

/// Tokenize a command line into arguments
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            '\\' => {
                in_token = true;
                match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => current.push('\\'),
                }
            }
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => current.push(ch),
                        None => return Err(unterminated(line, '\'')),
                    }
                }
            }
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => return Err(unterminated(line, '"')),
                        },
                        Some(ch) => current.push(ch),
                        None => return Err(unterminated(line, '"')),
                    }
                }
            }
            other => {
                in_token = true;
                current.push(other);
            }
        }
    }

    if in_token {
        args.push(current);
    }
    Ok(args)
}

/// Build the argument vector for a command, wrapping it in the shell if one is set
///
/// The shell string is tokenized and the raw command text is appended as the
/// final argument; without a shell the command itself is tokenized.
pub fn build_argv(command: &str, shell: Option<&str>) -> Result<Vec<String>> {
    match shell {
        Some(shell) => {
            let mut argv = tokenize(shell)?;
            if argv.is_empty() {
                return Err(BenchError::Usage("shell string is empty".to_string()));
            }
            argv.push(command.to_string());
            Ok(argv)
        }
        None => tokenize(command),
    }
}

fn unterminated(line: &str, quote: char) -> BenchError {
    BenchError::Usage(format!("unterminated {} quote in '{}'", quote, line))
}
