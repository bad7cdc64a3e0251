//! Filename helpers shared by the scanner.
//!
//! Asset files are identified purely by name: the extension decides which
//! asset type may claim a file, and the digits embedded in the name decide
//! where it sorts.
//!
//! ## Natural Ordering
//!
//! Photographers and designers number their files without zero padding, so
//! plain byte order would give `1.png, 10.png, 2.png`. [`natural_cmp`] splits
//! each name into alternating digit and non-digit runs and compares digit runs
//! by numeric value instead:
//!
//! - `1.png` < `2.png` < `10.png`
//! - `shot-9.jpg` < `shot-10.jpg`
//! - `v2-final.pdf` < `v10-draft.pdf`

use std::cmp::Ordering;
use std::path::Path;

/// Lowercased extension of a filename, without the leading dot.
///
/// Dotfiles such as `.png` have no extension, matching `Path::extension`.
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Lowercased stem of a filename (name without its final extension).
pub fn stem_of(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Hidden entries (`.DS_Store`, `.git`, `._1.png`) never enter the manifest.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// One run of a tokenized filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn tokenize(name: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_digits = None;

    for (i, c) in name.char_indices() {
        let digit = c.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != digit => {
                tokens.push(make_token(&name[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_digits = Some(digit);
    }
    if let Some(digit) = in_digits {
        tokens.push(make_token(&name[start..], digit));
    }
    tokens
}

fn make_token(run: &str, digits: bool) -> Token<'_> {
    if digits {
        Token::Digits(run)
    } else {
        Token::Text(run)
    }
}

/// Compare two digit runs by numeric value without parsing.
///
/// Runs of any length are supported: leading zeros are dropped, then the
/// longer run is larger, then equal-length runs compare digit by digit.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_token(a: &Token<'_>, b: &Token<'_>) -> Ordering {
    match (a, b) {
        (Token::Digits(x), Token::Digits(y)) => cmp_digits(x, y),
        (Token::Digits(x), Token::Text(y))
        | (Token::Text(x), Token::Digits(y))
        | (Token::Text(x), Token::Text(y)) => x.cmp(y),
    }
}

/// Natural ordering of two filenames.
///
/// Tokens are compared pairwise; when one name is a token prefix of the other
/// the shorter sorts first. Names that are still equal (e.g. `01.png` and
/// `1.png`) fall back to plain string order so the result is a total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ta = tokenize(a);
    let tb = tokenize(b);

    for (x, y) in ta.iter().zip(tb.iter()) {
        let ord = cmp_token(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ta.len().cmp(&tb.len()).then_with(|| a.cmp(b))
}

/// Sort filenames in place using [`natural_cmp`].
pub fn natural_sort(names: &mut [String]) {
    names.sort_by(|a, b| natural_cmp(a, b));
}
