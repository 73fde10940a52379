use crate::error::{NclipError, Result};

const QUOTES: [char; 2] = ['"', '\''];

/// Splits a command line into arguments.
///
/// Tokens are separated by single whitespace characters, so runs of
/// whitespace yield empty tokens. A token opening with `"` or `'` swallows
/// following tokens until one ends with the same quote; the swallowed
/// separators are restored as single spaces and the quotes are dropped.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut parts = line.split(char::is_whitespace);
    let mut args = Vec::new();

    while let Some(part) = parts.next() {
        let Some(quote) = part.chars().next().filter(|ch| QUOTES.contains(ch)) else {
            args.push(part.to_string());
            continue;
        };

        let mut grouped = String::new();
        let mut current = &part[quote.len_utf8()..];
        loop {
            if let Some(body) = current.strip_suffix(quote) {
                grouped.push_str(body.trim_end());
                break;
            }
            grouped.push_str(current);
            grouped.push(' ');
            current = parts.next().ok_or(NclipError::UnclosedQuote)?;
        }

        args.push(grouped);
    }

    Ok(args)
}
