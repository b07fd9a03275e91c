use crate::git::Commit;

const INSTRUCTIONS: &str = "Instructions:
- Group changes into logical categories (e.g., Features, Bug Fixes, Performance, Documentation, etc.)
- Focus on user-facing changes and impact
- Use clear, concise language
- Start each item with an action verb
- Omit internal/technical details that don't affect users
- Format the output in Markdown
- If there are breaking changes, highlight them in a separate section";

const DETAIL_INDENT: &str = "   ";

/// Render commits, in the order given, as the instruction prompt sent to a
/// text generation backend.
pub fn format_prompt(commits: &[Commit]) -> String {
    let mut prompt = format!(
        "Generate professional release notes from the following {} commit(s).\n\n{}\n\nCommits:\n\n",
        commits.len(),
        INSTRUCTIONS
    );

    for (index, commit) in commits.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", index + 1, commit.subject));
        prompt.push_str(&format!("{}Author: {}\n", DETAIL_INDENT, commit.author));
        prompt.push_str(&format!("{}Hash: {}\n", DETAIL_INDENT, commit.short_hash()));

        let separator = format!("\n{}", DETAIL_INDENT);
        let details = commit
            .body
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join(separator.as_str());
        if !details.is_empty() {
            prompt.push_str(&format!("{}Details: {}\n", DETAIL_INDENT, details));
        }

        prompt.push('\n');
    }

    prompt.push_str("\nPlease generate the release notes now:");
    prompt
}
