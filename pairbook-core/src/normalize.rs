//! Title/artist normalization for comparison-stable identity
//!
//! Catalogs format the same song many ways: `"Every Breath I Take"`,
//! `"Every Breath I Take - Remastered"`, `"Every Breath I Take (2018
//! Remaster)"`, `"Every Breath I Take [Radio Edit]"`. Deduplication keys are
//! derived from normalized metadata so these all collapse to one identity.
//!
//! The title pipeline runs in a fixed order; each step feeds the next:
//! 1. Lowercase
//! 2. Dashes (hyphen, en-dash, em-dash) become spaces
//! 3. Parenthesized `(...)` and bracketed `[...]` substrings are removed
//! 4. Trailing annotation tokens (`remastered`, `radio edit`, ...) are
//!    stripped, optionally with a trailing number such as a year
//! 5. Everything other than lowercase letters, digits, and spaces is removed
//! 6. Whitespace runs collapse to one space; ends trimmed
//!
//! Artists only get the light treatment (lowercase, collapse, trim): artist
//! names rarely carry edition annotations, and punctuation there is
//! meaningful (`AC/DC` vs `ACDC` is the same artist, but `N.W.A` written
//! without dots is a different string from a different catalog and both are
//! handled by the whitespace rules alone upstream).

/// Annotation vocabulary stripped from the end of titles.
///
/// Ordered longest-first so multi-word tokens (`radio edit`) are consumed
/// before shorter overlapping ones (`edit`).
const TRAILING_ANNOTATIONS: &[&str] = &[
    "extended version",
    "deluxe edition",
    "single version",
    "album version",
    "radio version",
    "instrumental",
    "radio edit",
    "remastered",
    "acapella",
    "explicit",
    "extended",
    "remaster",
    "version",
    "deluxe",
    "stereo",
    "clean",
    "remix",
    "edit",
    "live",
    "mono",
];

/// Normalize a song title into its comparison-stable form.
///
/// Empty or whitespace-only input normalizes to the empty string; this
/// function never fails.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let dashless = replace_dashes(&lowered);
    let unbracketed = strip_bracketed(&dashless);
    let unannotated = strip_trailing_annotations(&unbracketed);
    let clean: String = unannotated
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ' || c.is_whitespace())
        .collect();
    collapse_whitespace(&clean)
}

/// Normalize an artist name: lowercase, collapse whitespace, trim.
pub fn normalize_artist(artist: &str) -> String {
    collapse_whitespace(&artist.to_lowercase())
}

fn replace_dashes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '-' | '\u{2013}' | '\u{2014}' => ' ',
            other => other,
        })
        .collect()
}

/// Remove `(...)` and `[...]` substrings, non-greedy: each opener pairs with
/// the nearest closer of the same kind. Unmatched openers are left in place
/// (step 5 discards them anyway).
fn strip_bracketed(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let closer = match c {
            '(' => Some(')'),
            '[' => Some(']'),
            _ => None,
        };
        if let Some(closer) = closer {
            if let Some(end) = chars[i + 1..].iter().position(|&x| x == closer) {
                i += end + 2; // skip past the closer
                continue;
            }
        }
        out.push(c);
        i += 1;
    }
    out
}

/// Strip trailing annotation tokens, repeatedly, until none match.
///
/// A token matches only at the end of the string, at a word boundary, and may
/// be followed by one whitespace-separated number (a year, typically). The
/// same token earlier in the title is untouched.
fn strip_trailing_annotations(s: &str) -> String {
    let mut current = s.trim_end().to_string();
    while let Some(stripped) = strip_one_annotation(&current) {
        current = stripped;
    }
    current
}

fn strip_one_annotation(s: &str) -> Option<String> {
    let head = strip_trailing_number(s);
    for token in TRAILING_ANNOTATIONS {
        if let Some(prefix) = head.strip_suffix(token) {
            // Word boundary: token must not be glued to a preceding
            // alphanumeric character ("credit" keeps its "edit").
            let boundary = prefix
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
            if boundary {
                return Some(prefix.trim_end().to_string());
            }
        }
    }
    None
}

/// Drop a trailing whitespace-separated digit run ("remastered 2003"). A bare
/// number with no annotation before it is preserved by the caller, which only
/// uses the shortened form when a token actually matches.
fn strip_trailing_number(s: &str) -> &str {
    let trimmed = s.trim_end();
    let head = trimmed.trim_end_matches(|c: char| c.is_ascii_digit());
    if head.len() < trimmed.len() && head.ends_with(|c: char| c.is_whitespace()) {
        head.trim_end()
    } else {
        trimmed
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
