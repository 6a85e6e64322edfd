//! Find & replace engine: one regex substitution over the full file text.

use crate::error::{Result, WrangleError};
use crate::types::FindAndReplace;
use regex::{Regex, RegexBuilder};

/// A find & replace compiled once per batch.
///
/// Flags follow the JS convention: `g` substitutes every match (without it
/// only the first), `i`/`m`/`s` map to the regex engine's equivalents.
/// In the replacement template the two-character sequence `\n` stands for a
/// line break; that translation is an escape convention of the template, not
/// a regex feature.
#[derive(Debug, Clone)]
pub struct CompiledReplace {
    re: Regex,
    global: bool,
    template: String,
}

/// Result of applying a replace to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub text: String,
    /// Whether the pattern matched at all. "No match" is observably distinct
    /// from "matched but substitution changed nothing".
    pub matched: bool,
}

impl CompiledReplace {
    /// Compile pattern and flags, surfacing malformed input as `BadPattern`.
    pub fn compile(edit: &FindAndReplace) -> Result<Self> {
        let mut builder = RegexBuilder::new(&edit.find);
        let mut global = false;
        for flag in edit.flags.chars() {
            match flag {
                'g' => {
                    global = true;
                }
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                // The regex engine is already unicode-aware.
                'u' => {}
                other => {
                    return Err(WrangleError::BadPattern(format!(
                        "unsupported flag '{}'",
                        other
                    )));
                }
            }
        }
        let re = builder
            .build()
            .map_err(|e| WrangleError::BadPattern(e.to_string()))?;
        let template = edit.replace.replace("\\n", "\n");
        Ok(Self {
            re,
            global,
            template,
        })
    }

    /// Test first, substitute only on a match; a non-matching input comes
    /// back byte-identical.
    pub fn apply(&self, text: &str) -> ReplaceOutcome {
        if !self.re.is_match(text) {
            return ReplaceOutcome {
                text: text.to_string(),
                matched: false,
            };
        }
        let replaced = if self.global {
            self.re.replace_all(text, self.template.as_str())
        } else {
            self.re.replace(text, self.template.as_str())
        };
        ReplaceOutcome {
            text: replaced.into_owned(),
            matched: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(find: &str, replace: &str, flags: &str) -> CompiledReplace {
        CompiledReplace::compile(&FindAndReplace {
            find: find.to_string(),
            replace: replace.to_string(),
            flags: flags.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_global_flag_replaces_all() {
        let outcome = compiled("cat", "dog", "g").apply("cat cat");
        assert_eq!(outcome.text, "dog dog");
        assert!(outcome.matched);
    }

    #[test]
    fn test_without_global_flag_replaces_first() {
        let outcome = compiled("cat", "dog", "").apply("cat cat");
        assert_eq!(outcome.text, "dog cat");
    }

    #[test]
    fn test_no_match_returns_input_exactly() {
        let input = "weird   spacing\tand\r\nline endings";
        let outcome = compiled("zebra", "x", "g").apply(input);
        assert_eq!(outcome.text, input);
        assert!(!outcome.matched);
    }

    #[test]
    fn test_case_insensitive_flag() {
        let outcome = compiled("CAT", "dog", "gi").apply("cat Cat");
        assert_eq!(outcome.text, "dog dog");
    }

    #[test]
    fn test_multiline_flag_anchors_lines() {
        let outcome = compiled("^- ", "* ", "gm").apply("- a\n- b\n");
        assert_eq!(outcome.text, "* a\n* b\n");
    }

    #[test]
    fn test_newline_escape_in_template() {
        let outcome = compiled("; ", "\\n", "g").apply("a; b; c");
        assert_eq!(outcome.text, "a\nb\nc");
    }

    #[test]
    fn test_capture_groups_in_template() {
        let outcome = compiled(r"(\w+)@(\w+)", "$2 at $1", "g").apply("user@host");
        assert_eq!(outcome.text, "host at user");
    }

    #[test]
    fn test_bad_pattern_is_reported() {
        let result = CompiledReplace::compile(&FindAndReplace {
            find: "(unclosed".to_string(),
            replace: "".to_string(),
            flags: "g".to_string(),
        });
        assert!(matches!(result, Err(WrangleError::BadPattern(_))));
    }

    #[test]
    fn test_bad_flag_is_reported() {
        let result = CompiledReplace::compile(&FindAndReplace {
            find: "x".to_string(),
            replace: "y".to_string(),
            flags: "gz".to_string(),
        });
        assert!(matches!(result, Err(WrangleError::BadPattern(_))));
    }
}
