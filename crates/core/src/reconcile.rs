//! Locate, replace or insert the metadata block in a script's text.
//!
//! Everything outside the block is carried over byte-for-byte.

use std::ops::Range;

/// A script split around its metadata block.
///
/// When the script has no block, `before` holds the whole text and both
/// `block` and `after` are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSplit<'a> {
    pub before: &'a str,
    pub block: &'a str,
    pub after: &'a str,
}

impl BlockSplit<'_> {
    pub fn has_block(&self) -> bool {
        !self.block.is_empty()
    }
}

enum ScanState {
    SeekingOpen,
    SeekingClose { start: usize },
}

/// Comment body of a line, trimmed: `  # /// script ` -> `/// script`
fn comment_body(line: &str) -> Option<&str> {
    line.trim().strip_prefix('#').map(str::trim)
}

pub fn is_open_marker(line: &str) -> bool {
    comment_body(line) == Some("/// script")
}

pub fn is_close_marker(line: &str) -> bool {
    comment_body(line) == Some("///")
}

/// Byte range of the first open marker line through the first close marker
/// line after it, line ending included. An open marker that is never closed
/// does not form a block.
pub fn find_block(content: &str) -> Option<Range<usize>> {
    let mut state = ScanState::SeekingOpen;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let end = offset + line.len();
        state = match state {
            ScanState::SeekingOpen if is_open_marker(line) => {
                ScanState::SeekingClose { start: offset }
            }
            ScanState::SeekingClose { start } if is_close_marker(line) => {
                return Some(start..end);
            }
            unchanged => unchanged,
        };
        offset = end;
    }

    None
}

pub fn has_existing_metadata(content: &str) -> bool {
    find_block(content).is_some()
}

pub fn extract_existing_metadata(content: &str) -> BlockSplit<'_> {
    match find_block(content) {
        Some(range) => BlockSplit {
            before: &content[..range.start],
            block: &content[range.clone()],
            after: &content[range.end..],
        },
        None => BlockSplit {
            before: content,
            block: "",
            after: "",
        },
    }
}

/// Merge `metadata` (a generated block without trailing newline) into
/// `content`.
///
/// An existing block is replaced in place. Otherwise the block goes right
/// after a leading `#!` line, or at the very top.
pub fn reconcile(content: &str, metadata: &str) -> String {
    let split = extract_existing_metadata(content);
    if split.has_block() {
        return [split.before, metadata, "\n", split.after].concat();
    }

    match content.split_inclusive('\n').next() {
        Some(first) if first.starts_with("#!") => {
            let rest = &content[first.len()..];
            let separator = if first.ends_with('\n') { "" } else { "\n" };
            [first, separator, metadata, "\n", rest].concat()
        }
        _ => [metadata, "\n", content].concat(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: &str = "# /// script\n# requires-python = \">=3.13\"\n# ///";

    #[test]
    fn test_marker_detection() {
        assert!(is_open_marker("# /// script"));
        assert!(is_open_marker("  #   /// script  \n"));
        assert!(!is_open_marker("# /// scripts"));
        assert!(!is_open_marker("/// script"));
        assert!(is_close_marker("# ///\n"));
        assert!(!is_close_marker("# /// script"));
        assert!(!is_close_marker("# ////"));
    }

    #[test]
    fn test_has_existing_metadata() {
        let content = "# /// script\n# requires-python = \">=3.13\"\n# dependencies = [\"requests\"]\n# ///\nimport requests";
        assert!(has_existing_metadata(content));
        assert!(!has_existing_metadata("import requests\n"));
    }

    #[test]
    fn test_close_before_open_is_ignored() {
        assert!(!has_existing_metadata("# ///\nimport os\n# /// script\n"));
    }

    #[test]
    fn test_unclosed_open_marker_is_not_a_block() {
        let content = "# /// script\n# requires-python = \">=3.13\"\nimport os\n";
        let split = extract_existing_metadata(content);

        assert!(!split.has_block());
        assert_eq!(split.before, content);
        assert_eq!(split.after, "");
    }

    #[test]
    fn test_extract_existing_metadata() {
        let content = "#!/usr/bin/env python3\n# /// script\n# requires-python = \">=3.11\"\n# ///\n\nimport requests\n";
        let split = extract_existing_metadata(content);

        assert_eq!(split.before, "#!/usr/bin/env python3\n");
        assert_eq!(
            split.block,
            "# /// script\n# requires-python = \">=3.11\"\n# ///\n"
        );
        assert_eq!(split.after, "\nimport requests\n");
    }

    #[test]
    fn test_extract_uses_first_block_only() {
        let content = "# /// script\n# a\n# ///\nx = 1\n# /// script\n# b\n# ///\n";
        let split = extract_existing_metadata(content);

        assert_eq!(split.block, "# /// script\n# a\n# ///\n");
        assert_eq!(split.after, "x = 1\n# /// script\n# b\n# ///\n");
    }

    #[test]
    fn test_extract_no_existing_metadata() {
        let split = extract_existing_metadata("import os\n");
        assert_eq!(
            split,
            BlockSplit {
                before: "import os\n",
                block: "",
                after: ""
            }
        );
    }

    #[test]
    fn test_reconcile_inserts_at_top() {
        let result = reconcile("import requests\n", BLOCK);
        assert_eq!(result, format!("{}\nimport requests\n", BLOCK));
    }

    #[test]
    fn test_reconcile_inserts_after_shebang() {
        let result = reconcile("#!/usr/bin/env python3\nimport requests\n", BLOCK);

        assert_eq!(
            result,
            format!("#!/usr/bin/env python3\n{}\nimport requests\n", BLOCK)
        );
        assert_eq!(result.lines().next(), Some("#!/usr/bin/env python3"));
        assert_eq!(result.lines().nth(1), Some("# /// script"));
    }

    #[test]
    fn test_reconcile_shebang_without_newline() {
        let result = reconcile("#!/usr/bin/env python3", BLOCK);
        assert_eq!(result, format!("#!/usr/bin/env python3\n{}\n", BLOCK));
    }

    #[test]
    fn test_reconcile_empty_file() {
        assert_eq!(reconcile("", BLOCK), format!("{}\n", BLOCK));
    }

    #[test]
    fn test_reconcile_replaces_existing_block() {
        let content = "#!/usr/bin/env python3\n# /// script\n# requires-python = \">=3.11\"\n# dependencies = [\"flask\"]\n# ///\n\nimport requests\n";
        let result = reconcile(content, BLOCK);

        assert_eq!(
            result,
            format!("#!/usr/bin/env python3\n{}\n\nimport requests\n", BLOCK)
        );
        assert!(!result.contains("flask"));
        assert!(!result.contains("3.11"));
    }

    #[test]
    fn test_reconcile_preserves_surrounding_bytes() {
        let content = "\r\n  # leading comment\r\n# /// script\n# ///\ntrailing   \n\n\n";
        let result = reconcile(content, BLOCK);

        assert!(result.starts_with("\r\n  # leading comment\r\n"));
        assert!(result.ends_with("\ntrailing   \n\n\n"));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        for content in [
            "",
            "import os\n",
            "#!/usr/bin/env python3\nimport requests\n",
            "# /// script\n# ///\nimport os",
        ] {
            let once = reconcile(content, BLOCK);
            let twice = reconcile(&once, BLOCK);
            assert_eq!(once, twice, "not idempotent for {:?}", content);
        }
    }

    #[test]
    fn test_reconcile_unclosed_block_inserts_new_block() {
        let content = "# /// script\nimport os\n";
        let result = reconcile(content, BLOCK);

        assert_eq!(result, format!("{}\n{}", BLOCK, content));
        assert_eq!(reconcile(&result, BLOCK), result);
    }
}
