//! Blank-line normalization for whole documents.
//!
//! Both transforms are pure: they take the full text of a document and
//! return the replacement text. Committing it is the caller's job.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A line start, then two or more lines holding nothing but horizontal
/// whitespace.
static DOUBLED_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[^\S\n]*\n(?:[^\S\n]*\n)+").expect("valid regex"));

/// Blank lines opening the text, or a newline followed by one or more blank
/// lines. Trailing whitespace in front of that newline goes with it.
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A(?:[^\S\n]*\n)+|[^\S\n]*\n(?:[^\S\n]*\n)+").expect("valid regex")
});

/// Replace every run of two or more blank lines with a single empty line.
///
/// Runs of any length collapse fully in one pass, so `"a\n\n\n\n\nb"`
/// becomes `"a\n\nb"`. A lone blank line is kept as is.
pub fn collapse_doubled_blank_lines(text: &str) -> String {
    DOUBLED_BLANK_LINES.replace_all(text, "\n").into_owned()
}

/// Drop every blank line. Applying it twice gives the same result as once.
pub fn remove_blank_lines(text: &str) -> String {
    BLANK_LINES
        .replace_all(text, |caps: &Captures| {
            // Leading blank lines have no line above them to join
            if caps.get(0).map_or(0, |m| m.start()) == 0 {
                ""
            } else {
                "\n"
            }
        })
        .into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeCommand {
    CollapseDoubledBlankLines,
    RemoveBlankLines,
}

impl NormalizeCommand {
    pub const ALL: [NormalizeCommand; 2] = [
        NormalizeCommand::CollapseDoubledBlankLines,
        NormalizeCommand::RemoveBlankLines,
    ];

    pub fn id(self) -> &'static str {
        match self {
            NormalizeCommand::CollapseDoubledBlankLines => {
                "replace-doubled-empty-lines-with-single"
            }
            NormalizeCommand::RemoveBlankLines => "remove-empty-lines",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NormalizeCommand::CollapseDoubledBlankLines => {
                "Replace doubled empty lines with single"
            }
            NormalizeCommand::RemoveBlankLines => "Remove empty lines",
        }
    }

    pub fn apply(self, text: &str) -> String {
        match self {
            NormalizeCommand::CollapseDoubledBlankLines => collapse_doubled_blank_lines(text),
            NormalizeCommand::RemoveBlankLines => remove_blank_lines(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn longest_blank_run(text: &str) -> usize {
        let mut longest = 0;
        let mut current = 0;
        let lines: Vec<&str> = text.split('\n').collect();
        // The final segment has no terminating newline, so it is not a line
        for line in &lines[..lines.len().saturating_sub(1)] {
            if line.trim().is_empty() {
                current += 1;
                longest = longest.max(current);
            } else {
                current = 0;
            }
        }
        longest
    }

    const SAMPLES: &[&str] = &[
        "",
        "a",
        "a\nb",
        "a\n\nb",
        "a\n\n\nb",
        "a\n\n\n\nb",
        "a\n\n\n\n\n\nb\n\n\nc\n",
        "  \n\n  a\n \t \n\nb  \n\n",
        "\n\n\nstart",
        "end\n\n\n",
        "a\r\n\r\n\r\nb",
        "# Title\n\n\n- item\n    \n\t\n- item\n\n\n\n",
    ];

    #[test]
    fn test_collapse_doubled_blank_run() {
        assert_eq!(collapse_doubled_blank_lines("a\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_collapse_long_run_fully_in_one_pass() {
        assert_eq!(collapse_doubled_blank_lines("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_doubled_blank_lines("a\n\n\n\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_collapse_keeps_single_blank_line() {
        assert_eq!(collapse_doubled_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_doubled_blank_lines("a\nb"), "a\nb");
    }

    #[test]
    fn test_collapse_whitespace_only_lines() {
        assert_eq!(collapse_doubled_blank_lines("a\n  \n\t\nb"), "a\n\nb");
        // Indentation on the next content line survives
        assert_eq!(collapse_doubled_blank_lines("a\n\n\n  b"), "a\n\n  b");
    }

    #[test]
    fn test_collapse_never_lengthens_blank_runs() {
        for sample in SAMPLES {
            let out = collapse_doubled_blank_lines(sample);
            assert!(
                longest_blank_run(&out) <= longest_blank_run(sample),
                "blank run grew for {:?} -> {:?}",
                sample,
                out
            );
            assert!(longest_blank_run(&out) <= 1, "{:?} -> {:?}", sample, out);
        }
    }

    #[test]
    fn test_remove_single_separator() {
        assert_eq!(remove_blank_lines("a\n\n\nb"), "a\nb");
        assert_eq!(remove_blank_lines("a\n\nb"), "a\nb");
        assert_eq!(remove_blank_lines("a\nb"), "a\nb");
    }

    #[test]
    fn test_remove_drops_trailing_whitespace_before_blank_lines() {
        assert_eq!(remove_blank_lines("a  \n \n\tb"), "a\n\tb");
        assert_eq!(remove_blank_lines("a\r\n\r\nb"), "a\nb");
    }

    #[test]
    fn test_remove_is_idempotent() {
        for sample in SAMPLES {
            let once = remove_blank_lines(sample);
            assert_eq!(remove_blank_lines(&once), once, "input {:?}", sample);
            assert_eq!(longest_blank_run(&once), 0, "input {:?}", sample);
        }
    }

    #[test]
    fn test_remove_leading_and_trailing_blank_lines() {
        assert_eq!(remove_blank_lines("\n\n\nstart"), "start");
        assert_eq!(remove_blank_lines("\nstart"), "start");
        assert_eq!(remove_blank_lines("end\n\n\n"), "end\n");
        assert_eq!(remove_blank_lines("  a\nb"), "  a\nb");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(collapse_doubled_blank_lines(""), "");
        assert_eq!(remove_blank_lines(""), "");
    }

    #[test]
    fn test_command_ids_are_stable() {
        let ids: Vec<_> = NormalizeCommand::ALL.iter().map(|c| c.id()).collect();
        assert_eq!(ids, ["replace-doubled-empty-lines-with-single", "remove-empty-lines"]);
        assert_eq!(
            NormalizeCommand::RemoveBlankLines.apply("x\n\ny"),
            remove_blank_lines("x\n\ny")
        );
    }
}
