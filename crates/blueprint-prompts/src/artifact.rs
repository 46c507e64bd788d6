use crate::context::{render_entries, ContextEntry};

/// System instruction for every per-artifact call.
pub const SYSTEM_INSTRUCTION: &str =
    "You are an expert programmer. Generate only the code, no explanations or markdown.";

/// Everything needed to ask for one artifact.
#[derive(Debug, Clone)]
pub struct ArtifactPrompt<'a> {
    pub project_name: &'a str,
    pub project_description: &'a str,
    pub framework: &'a str,
    pub path: &'a str,
    pub purpose: &'a str,
    /// Artifacts generated earlier in this run, in generation order.
    pub previous: &'a [ContextEntry<'a>],
}

impl ArtifactPrompt<'_> {
    pub fn assemble(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(&format!(
            "Generate the complete code for the file {} in the {} project.\n",
            self.path, self.project_name
        ));
        prompt.push_str(&format!("Project Description: {}\n", self.project_description));
        prompt.push_str(&format!("File Purpose: {}\n\n", self.purpose));

        prompt.push_str("Requirements:\n");
        prompt.push_str(&format!("- Use {} framework\n", self.framework));
        prompt.push_str(
            "- Follow best practices\n\
             - Include necessary imports\n\
             - Add helpful comments\n\
             - Make sure the code is complete and functional\n\
             - Ensure compatibility with other project files\n",
        );

        if !self.previous.is_empty() {
            prompt.push_str("\nPreviously generated files:\n");
            prompt.push_str(&render_entries(self.previous));
        }

        prompt.push_str("\nGenerate only the code, no explanations.");
        prompt
    }
}
