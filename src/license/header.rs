//! Pure header transform for source files
//!
//! A file carries a recognized license header when it starts with
//! [`EXISTING_LICENSE_PREFIX`]. The header runs up to and including the first
//! line that is exactly [`LICENSE_END_MARKER`]. Nothing in here touches the
//! filesystem.

use std::borrow::Cow;
use tracing::warn;

/// Opening of a block comment followed by the word `Copyright`
pub const EXISTING_LICENSE_PREFIX: &str = "/*\nCopyright";

/// Line that closes a recognized header
pub const LICENSE_END_MARKER: &str = "*/";

/// Outcome of rewriting one file's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: Vec<u8>,
    /// True when an existing header was found and stripped
    pub header_replaced: bool,
}

pub fn has_existing_license(content: &[u8]) -> bool {
    content.starts_with(EXISTING_LICENSE_PREFIX.as_bytes())
}

/// Remove a recognized header from `content`.
///
/// Lines following the closing marker are rejoined with a `\n` in front of
/// each, so the body begins with a blank line and loses its final newline.
/// Content without the prefix is returned untouched.
pub fn strip_license(content: &[u8]) -> Cow<'_, [u8]> {
    if !has_existing_license(content) {
        return Cow::Borrowed(content);
    }

    let mut body = Vec::with_capacity(content.len());
    let mut end_of_license_found = false;

    for line in scan_lines(content) {
        if end_of_license_found {
            body.push(b'\n');
            body.extend_from_slice(line);
        } else if line == LICENSE_END_MARKER.as_bytes() {
            end_of_license_found = true;
        }
    }

    if !end_of_license_found {
        warn!("license header has no closing '{}' line, discarding whole content", LICENSE_END_MARKER);
    }

    Cow::Owned(body)
}

/// Prepend `header` verbatim to the content left after [`strip_license`].
pub fn rewrite(content: &[u8], header: &[u8]) -> Rewrite {
    let header_replaced = has_existing_license(content);
    let body = strip_license(content);

    let mut licensed = Vec::with_capacity(header.len() + body.len());
    licensed.extend_from_slice(header);
    licensed.extend_from_slice(&body);

    Rewrite {
        content: licensed,
        header_replaced,
    }
}

/// Split on `\n`, dropping one trailing `\r` per line. A final newline does
/// not produce an extra empty line.
fn scan_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let trimmed = content.strip_suffix(b"\n").unwrap_or(content);
    let has_lines = !content.is_empty();

    trimmed
        .split(|b| *b == b'\n')
        .take_while(move |_| has_lines)
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "/*\nCopyright 2021 Example, Inc.\nSPDX-License-Identifier: MIT\n*/\n";

    fn lines(content: &str) -> Vec<String> {
        scan_lines(content.as_bytes())
            .map(|l| String::from_utf8_lossy(l).into_owned())
            .collect()
    }

    #[test]
    fn test_scan_lines_trailing_newline() {
        assert_eq!(lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(lines("a\nb"), vec!["a", "b"]);
        assert_eq!(lines("a\n\n"), vec!["a", ""]);
        assert_eq!(lines("\n"), vec![""]);
        assert!(lines("").is_empty());
    }

    #[test]
    fn test_scan_lines_drops_carriage_return() {
        assert_eq!(lines("a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_detection_is_prefix_only() {
        assert!(has_existing_license(HEADER.as_bytes()));
        assert!(!has_existing_license(b"// Copyright 2021\npackage main\n"));
        assert!(!has_existing_license(b"\n/*\nCopyright 2021\n*/\n"));
        assert!(!has_existing_license(b"/* Copyright 2021 */\n"));
        assert!(!has_existing_license(b"/*\r\nCopyright 2021\r\n*/\r\n"));
    }

    #[test]
    fn test_strip_without_header_borrows() {
        let content = b"package main\n";
        let stripped = strip_license(content);
        assert!(matches!(stripped, Cow::Borrowed(_)));
        assert_eq!(&*stripped, content);
    }

    #[test]
    fn test_strip_leaves_leading_blank_line() {
        let content = format!("{}package main\n\nfunc main() {{}}\n", HEADER);
        let stripped = strip_license(content.as_bytes());
        assert_eq!(&*stripped, b"\npackage main\n\nfunc main() {}");
    }

    #[test]
    fn test_strip_stops_at_first_end_marker() {
        let content = "/*\nCopyright A\n*/\n/*\nCopyright B\n*/\npackage x\n";
        let stripped = strip_license(content.as_bytes());
        assert_eq!(&*stripped, b"\n/*\nCopyright B\n*/\npackage x");
    }

    #[test]
    fn test_strip_end_marker_must_be_whole_line() {
        let content = "/*\nCopyright A */\n  */\n*/\nbody\n";
        let stripped = strip_license(content.as_bytes());
        assert_eq!(&*stripped, b"\nbody");
    }

    #[test]
    fn test_strip_unterminated_header_discards_everything() {
        let content = "/*\nCopyright 2021\npackage main\n";
        let stripped = strip_license(content.as_bytes());
        assert!(stripped.is_empty());
    }

    #[test]
    fn test_strip_normalizes_crlf_body() {
        let content = "/*\nCopyright 2021\r\n*/\r\nline one\r\nline two\r\n";
        let stripped = strip_license(content.as_bytes());
        assert_eq!(&*stripped, b"\nline one\nline two");
    }

    #[test]
    fn test_rewrite_headerless_prepends_verbatim() {
        let header = b"// Licensed under MIT\n";
        let result = rewrite(b"package main\n", header);
        assert!(!result.header_replaced);
        assert_eq!(result.content, b"// Licensed under MIT\npackage main\n");
    }

    #[test]
    fn test_rewrite_replaces_existing_header() {
        let original = format!("{}package main\n", "/*\nCopyright 2019 Old Owner\n*/\n");
        let result = rewrite(original.as_bytes(), HEADER.as_bytes());
        assert!(result.header_replaced);
        assert_eq!(result.content, format!("{}\npackage main", HEADER).into_bytes());
    }

    #[test]
    fn test_rewrite_same_header_adds_blank_line() {
        // Re-applying an identical header is not a no-op: the join step adds a
        // blank line after the header and drops the final newline.
        let original = format!("{}package main\n", HEADER);
        let result = rewrite(original.as_bytes(), HEADER.as_bytes());
        assert_eq!(result.content, format!("{}\npackage main", HEADER).into_bytes());
        assert_ne!(result.content, original.into_bytes());
    }

    #[test]
    fn test_rewrite_non_matching_header_stacks() {
        let header = b"// Copyright 2021 Example\n";
        let once = rewrite(b"package main\n", header);
        let twice = rewrite(&once.content, header);
        assert!(!twice.header_replaced);
        assert_eq!(
            twice.content,
            b"// Copyright 2021 Example\n// Copyright 2021 Example\npackage main\n"
        );
    }

    #[test]
    fn test_rewrite_keeps_non_utf8_body() {
        let content = [b'p', b'k', b'g', 0xff, 0xfe, b'\n'];
        let result = rewrite(&content, b"// h\n");
        assert_eq!(&result.content[5..], &content);
    }
}
