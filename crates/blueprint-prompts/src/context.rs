use blueprint_core::GenerationContext;

/// A completed artifact as it is shown to later prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextEntry<'a> {
    pub path: &'a str,
    pub body: &'a str,
}

impl<'a> ContextEntry<'a> {
    /// Borrow every completed artifact of a run, in recording order.
    pub fn from_context(ctx: &'a GenerationContext) -> Vec<ContextEntry<'a>> {
        ctx.completed()
            .iter()
            .map(|a| ContextEntry {
                path: &a.path,
                body: &a.body,
            })
            .collect()
    }

    /// Append this entry as a path header followed by a fenced body.
    pub fn append_to(&self, prompt: &mut String) {
        prompt.push_str(&format!("\n{}:\n```\n{}\n```\n", self.path, self.body));
    }
}

/// Render entries in the order given. Callers pass them already sorted.
pub fn render_entries(entries: &[ContextEntry<'_>]) -> String {
    let mut out = String::new();
    for entry in entries {
        entry.append_to(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::GeneratedArtifact;

    #[test]
    fn renders_in_given_order() {
        let entries = [
            ContextEntry { path: "b.txt", body: "B" },
            ContextEntry { path: "a.txt", body: "A" },
        ];
        let out = render_entries(&entries);
        assert_eq!(out, "\nb.txt:\n```\nB\n```\n\na.txt:\n```\nA\n```\n");
    }

    #[test]
    fn empty_renders_nothing() {
        assert_eq!(render_entries(&[]), "");
    }

    #[test]
    fn from_context_follows_recording_order() {
        let mut ctx = GenerationContext::new();
        for path in ["a.txt", "c.txt", "b.txt"] {
            ctx.record(GeneratedArtifact {
                path: path.into(),
                body: path.to_uppercase(),
                raw_response: String::new(),
            });
        }
        let entries = ContextEntry::from_context(&ctx);
        let paths: Vec<&str> = entries.iter().map(|e| e.path).collect();
        assert_eq!(paths, vec!["a.txt", "c.txt", "b.txt"]);
        assert_eq!(entries[1].body, "C.TXT");
    }
}
