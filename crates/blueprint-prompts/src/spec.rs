/// System instruction for turning a free-text request into a project spec.
pub const SYSTEM_INSTRUCTION: &str = "\
You are a software development agent. Analyze the user's request and produce a \
detailed project specification. Work through it step by step:

1. Understand the core requirements
2. Pick the most suitable framework and technologies
3. Break the project down into the components it needs
4. Plan the file structure
5. Write a complete project specification

The specification must include:
- Project name
- Project type (web, mobile, cli, library, ...)
- Recommended framework
- Required components
- Every file needed for production-ready code, each with a description that \
doubles as the instruction for generating it, including what it imports from \
other files
- Project description

Respond only with valid JSON in exactly this structure:
{
  \"name\": \"<project name>\",
  \"type\": \"<project type>\",
  \"framework\": \"<recommended framework>\",
  \"components\": [\"<component 1>\", \"<component 2>\"],
  \"files\": {
    \"<relative file path>\": \"<file description and generation instructions>\"
  },
  \"description\": \"<project description>\"
}";

/// The user turn is the request verbatim.
pub fn user_message(request: &str) -> String {
    request.to_string()
}
