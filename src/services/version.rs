//! Dotted/suffixed version comparison.
//!
//! Registry minimums and module manifests carry versions like `1.10`,
//! `2.0.0-beta1` or `8.x-1.2`. Segments are compared numerically where both
//! sides are numeric; textual segments rank below releases in the order
//! `other < dev < alpha < beta < rc < NUMBER < pl`, so `1.0-alpha1 < 1.0`
//! and `1.0 < 1.0-pl1`.

use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(u64),
    Text(String),
}

fn tokenize(version: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_is_digit = false;

    let flush = |buf: &mut String, is_digit: bool, out: &mut Vec<Token>| {
        if buf.is_empty() {
            return;
        }
        if is_digit {
            // Oversized numeric runs fall back to text comparison.
            match buf.parse::<u64>() {
                Ok(n) => out.push(Token::Number(n)),
                Err(_) => out.push(Token::Text(buf.clone())),
            }
        } else {
            out.push(Token::Text(buf.to_ascii_lowercase()));
        }
        buf.clear();
    };

    for c in version.chars() {
        if matches!(c, '.' | '-' | '_' | '+') {
            flush(&mut current, current_is_digit, &mut tokens);
            continue;
        }
        let is_digit = c.is_ascii_digit();
        if !current.is_empty() && is_digit != current_is_digit {
            flush(&mut current, current_is_digit, &mut tokens);
        }
        current_is_digit = is_digit;
        current.push(c);
    }
    flush(&mut current, current_is_digit, &mut tokens);
    tokens
}

/// Rank of a token relative to a plain numeric release segment.
fn rank(token: &Token) -> u8 {
    match token {
        Token::Number(_) => 5,
        Token::Text(t) => match t.as_str() {
            "dev" => 1,
            "alpha" | "a" => 2,
            "beta" | "b" => 3,
            "rc" => 4,
            "pl" | "p" => 6,
            _ => 0,
        },
    }
}

fn cmp_tokens(a: &Token, b: &Token) -> Ordering {
    match (a, b) {
        (Token::Number(x), Token::Number(y)) => x.cmp(y),
        _ => match rank(a).cmp(&rank(b)) {
            Ordering::Equal => match (a, b) {
                (Token::Text(x), Token::Text(y)) => x.cmp(y),
                _ => Ordering::Equal,
            },
            other => other,
        },
    }
}

/// Compares two version strings. An exhausted side is treated as a plain
/// release boundary, so a remaining pre-release suffix sorts the longer
/// version below and a remaining numeric or `pl` segment sorts it above.
pub fn version_cmp(a: &str, b: &str) -> Ordering {
    let ta = tokenize(a);
    let tb = tokenize(b);
    let len = ta.len().max(tb.len());

    for i in 0..len {
        match (ta.get(i), tb.get(i)) {
            (Some(x), Some(y)) => {
                let ord = cmp_tokens(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), None) => {
                return if rank(x) >= 5 {
                    Ordering::Greater
                } else {
                    Ordering::Less
                };
            }
            (None, Some(y)) => {
                return if rank(y) >= 5 {
                    Ordering::Less
                } else {
                    Ordering::Greater
                };
            }
            (None, None) => unreachable!(),
        }
    }
    Ordering::Equal
}
