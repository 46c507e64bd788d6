//! Normalization of raw model output into persistable bodies.
//!
//! Both entry points are best-effort. They strip one enclosing
//! triple-backtick fence (repeatedly, if the model nested them) and the
//! language tag that follows the opening fence. Text that was never fenced
//! only gets its surrounding whitespace trimmed.

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy)]
enum TagRule {
    /// A line with neither `=` nor `:` is taken for a tag. Permissive: a
    /// code line such as `import os` placed on the fence line is dropped too.
    Heuristic,
    /// Only a single word such as `json`, `md` or `c++` counts as a tag.
    Identifier,
}

/// Sanitize a generated artifact body.
pub fn sanitize(raw: &str) -> String {
    strip_to_fixed_point(raw, TagRule::Heuristic)
}

/// Sanitize a structured or prose document (spec JSON, summary markdown),
/// recognizing only word-like tags after the opening fence.
pub fn sanitize_document(raw: &str) -> String {
    strip_to_fixed_point(raw, TagRule::Identifier)
}

fn strip_to_fixed_point(raw: &str, rule: TagRule) -> String {
    let mut current = raw;
    loop {
        let next = strip_once(current, rule);
        // `next` is always a subslice of `current`.
        if next.len() == current.len() {
            return next.to_string();
        }
        current = next;
    }
}

fn strip_once(text: &str, rule: TagRule) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };
    let rest = drop_tag_line(rest, rule);
    rest.strip_suffix(FENCE).unwrap_or(rest).trim()
}

fn drop_tag_line(rest: &str, rule: TagRule) -> &str {
    match rest.find('\n') {
        Some(i) if is_tag(&rest[..i], rule) => &rest[i + 1..],
        _ => rest,
    }
}

fn is_tag(line: &str, rule: TagRule) -> bool {
    match rule {
        TagRule::Heuristic => !line.contains('=') && !line.contains(':'),
        TagRule::Identifier => line
            .trim()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-+_.#".contains(c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tagged_json_fence() {
        assert_eq!(sanitize("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(sanitize_document("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(sanitize("```\nfn main() {}\n```"), "fn main() {}");
    }

    #[test]
    fn keeps_first_code_line_after_bare_fence() {
        let raw = "```\nimport os\nprint(os.getcwd())\n```";
        assert_eq!(sanitize(raw), "import os\nprint(os.getcwd())");
    }

    #[test]
    fn drops_language_tag() {
        let raw = "  ```python\nx = 1\nprint(x)\n```  ";
        assert_eq!(sanitize(raw), "x = 1\nprint(x)");
    }

    #[test]
    fn heuristic_keeps_first_line_with_operator() {
        // No newline between the fence and code: the line has `=` so it stays.
        assert_eq!(sanitize("```x = 1\ny = 2\n```"), "x = 1\ny = 2");
    }

    #[test]
    fn unfenced_text_only_trimmed() {
        assert_eq!(sanitize("\n  package main\n\nfunc main() {}\n"), "package main\n\nfunc main() {}");
    }

    #[test]
    fn unpaired_closing_fence_is_kept() {
        let readme = "# Tool\n\n```sh\ncargo run\n```";
        assert_eq!(sanitize_document(readme), readme);
    }

    #[test]
    fn document_rule_strips_markdown_tags() {
        assert_eq!(sanitize_document("```markdown\n# Title\nBody\n```"), "# Title\nBody");
        assert_eq!(sanitize_document("```md\n# Title\n```"), "# Title");
        assert_eq!(sanitize_document("```\n# Title\n```"), "# Title");
    }

    #[test]
    fn document_rule_keeps_non_word_first_line() {
        assert_eq!(
            sanitize_document("```{\"name\": \"x\"}\n```"),
            "{\"name\": \"x\"}"
        );
    }

    #[test]
    fn nested_fences_are_fully_stripped() {
        assert_eq!(sanitize("```\n```rust\nfn a() {}\n```\n```"), "fn a() {}");
    }

    #[test]
    fn empty_and_fence_only_inputs() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   \n"), "");
        assert_eq!(sanitize("```"), "");
        assert_eq!(sanitize("``````"), "");
    }

    #[test]
    fn idempotent_over_tricky_inputs() {
        let samples = [
            "",
            "```",
            "````",
            "plain text",
            "a\nb\nc",
            "```json\n{\"a\":1}\n```",
            "```\n```\nfoo\n```\n```",
            "```python\nimport os\n```",
            "```\n\n\n```",
            "``` \n x \n ```",
            "```a=b\nc\n```",
            "x\n```",
            "```x",
            "\u{3000}```\u{3000}\nbody\n```",
        ];
        for s in samples {
            let once = sanitize(s);
            assert_eq!(sanitize(&once), once, "sanitize not idempotent for {s:?}");
            let once = sanitize_document(s);
            assert_eq!(sanitize_document(&once), once, "sanitize_document not idempotent for {s:?}");
        }
    }
}
