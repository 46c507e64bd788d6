use crate::context::{render_entries, ContextEntry};

/// System instruction for the project summary call.
pub const SYSTEM_INSTRUCTION: &str = "Generate a comprehensive README.md file in markdown format.";

#[derive(Debug, Clone)]
pub struct SummaryPrompt<'a> {
    pub project_name: &'a str,
    pub project_description: &'a str,
    pub framework: &'a str,
    pub components: &'a [String],
    /// Every artifact of the run, in generation order.
    pub artifacts: &'a [ContextEntry<'a>],
}

impl SummaryPrompt<'_> {
    pub fn assemble(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(&format!(
            "Generate a comprehensive README.md for the {} project.\n",
            self.project_name
        ));
        prompt.push_str(&format!("Description: {}\n", self.project_description));
        prompt.push_str(&format!("Framework: {}\n", self.framework));
        prompt.push_str(&format!("Components: {}\n\n", self.components.join(", ")));

        prompt.push_str("Project Structure:");
        prompt.push_str(&render_entries(self.artifacts));

        prompt.push_str(
            "\nInclude:\n\
             1. Project overview\n\
             2. Setup instructions\n\
             3. Usage examples\n\
             4. Component descriptions\n\
             5. Dependencies\n",
        );
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_every_artifact_and_component() {
        let components = vec!["router".to_string(), "store".to_string()];
        let artifacts = [
            ContextEntry { path: "Cargo.toml", body: "[package]" },
            ContextEntry { path: "src/main.rs", body: "fn main() {}" },
        ];
        let out = SummaryPrompt {
            project_name: "todo-api",
            project_description: "A todo API",
            framework: "axum",
            components: &components,
            artifacts: &artifacts,
        }
        .assemble();

        assert!(out.contains("README.md for the todo-api project"));
        assert!(out.contains("Components: router, store"));
        assert!(out.contains("Cargo.toml:\n```\n[package]\n```"));
        assert!(out.contains("src/main.rs:\n```\nfn main() {}\n```"));
        assert!(out.contains("5. Dependencies"));
    }
}
