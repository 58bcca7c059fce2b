//! Prompt assembly for README generation.

use crate::github::RepositoryMetadata;
use std::collections::BTreeMap;

/// Number of characters of each file shown to the model
pub const PREVIEW_CHARS: usize = 200;

/// Appended to a preview that was cut short
pub const ELLIPSIS: &str = "...";

/// Opening line of the README request
pub const README_PROMPT_HEADER: &str =
    "Generate a comprehensive README.md for the following project:";

/// Sections the generated README should contain
pub const README_PROMPT_INSTRUCTIONS: &str = r#"Create a detailed README that includes:
1. Project title and description
2. Key features
3. Installation instructions
4. Usage examples
5. Project structure overview
6. Dependencies and requirements
7. Contributing guidelines (if applicable)
8. License information (if available)

Use clear markdown formatting with appropriate sections. Focus on creating a helpful
and informative README that would help users understand and use the project.
If the project has a specific focus or unique features, highlight those prominently."#;

/// First [`PREVIEW_CHARS`] characters of `content`, with [`ELLIPSIS`] when truncated
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &content[..cut], ELLIPSIS),
        None => content.to_string(),
    }
}

/// Renders the metadata as a fixed, ordered markdown list
pub fn render_metadata(metadata: &RepositoryMetadata) -> String {
    [
        format!("- **name**: {}", metadata.name),
        format!("- **description**: {}", metadata.description.as_deref().unwrap_or_default()),
        format!("- **language**: {}", metadata.language.as_deref().unwrap_or_default()),
        format!("- **license**: {}", metadata.license.as_deref().unwrap_or("None")),
        format!("- **stars**: {}", metadata.stars),
        format!("- **forks**: {}", metadata.forks),
        format!("- **open_issues**: {}", metadata.open_issues),
    ]
    .join("\n")
}

/// Renders one labelled code block per file, in path order
pub fn render_files(files: &BTreeMap<String, String>) -> String {
    files
        .iter()
        .map(|(path, content)| format!("### {}\n```\n{}\n```", path, preview(content)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the full README request prompt
pub fn assemble_prompt(files: &BTreeMap<String, String>, metadata: &RepositoryMetadata) -> String {
    format!(
        "{}\nRepository Metadata:\n{}\n\nProject Files:\n{}\n\n{}",
        README_PROMPT_HEADER,
        render_metadata(metadata),
        render_files(files),
        README_PROMPT_INSTRUCTIONS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterConfig;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn hello_world() -> RepositoryMetadata {
        RepositoryMetadata {
            name: "Hello-World".into(),
            description: Some("My first repository on GitHub!".into()),
            language: None,
            license: None,
            stars: 2500,
            forks: 2000,
            open_issues: 1000,
        }
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let content = "é".repeat(250);
        let shown = preview(&content);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + ELLIPSIS.len());
        assert!(shown.ends_with(ELLIPSIS));
        assert_eq!(preview("short"), "short");
        assert_eq!(preview(&"a".repeat(200)), "a".repeat(200));
    }

    #[test]
    fn test_metadata_block() {
        let mut metadata = hello_world();
        assert_eq!(
            render_metadata(&metadata),
            "- **name**: Hello-World\n\
             - **description**: My first repository on GitHub!\n\
             - **language**: \n\
             - **license**: None\n\
             - **stars**: 2500\n\
             - **forks**: 2000\n\
             - **open_issues**: 1000"
        );

        metadata.license = Some(String::new());
        assert!(render_metadata(&metadata).contains("- **license**: \n"));
    }

    #[test]
    fn test_prompt_layout() {
        let files: BTreeMap<String, String> = [
            ("b.rs".to_string(), "fn b() {}".to_string()),
            ("a.rs".to_string(), "fn a() {}".to_string()),
        ]
        .into_iter()
        .collect();

        let prompt = assemble_prompt(&files, &hello_world());
        let expected_files = concat!(
            "Project Files:\n",
            "### a.rs\n```\nfn a() {}\n```\n\n",
            "### b.rs\n```\nfn b() {}\n```\n\n",
            "Create a detailed README",
        );
        assert!(prompt.starts_with(concat!(
            "Generate a comprehensive README.md for the following project:\n",
            "Repository Metadata:\n- **name**: Hello-World",
        )));
        assert!(prompt.contains(expected_files));
        assert!(prompt.ends_with("highlight those prominently."));
        assert_eq!(prompt, assemble_prompt(&files, &hello_world()));
    }

    #[test]
    fn test_hello_world_scenario() {
        let main_go = "m".repeat(300);
        let candidates = [
            ("main.go", main_go.as_str()),
            ("node_modules/x.js", "ignored"),
        ];
        let filter = FilterConfig::default();
        let files: BTreeMap<String, String> = candidates
            .iter()
            .filter(|(path, content)| filter.include(path, content.len() as u64))
            .map(|(path, content)| (path.to_string(), content.to_string()))
            .collect();

        let prompt = assemble_prompt(&files, &hello_world());
        assert!(prompt.contains(&format!("### main.go\n```\n{}...\n```", "m".repeat(200))));
        assert!(!prompt.contains(&"m".repeat(201)));
        assert!(!prompt.contains("node_modules"));
    }

    proptest! {
        #[test]
        fn prop_preview_is_prefix_with_ellipsis_iff_truncated(content in "\\PC{0,400}") {
            let shown = preview(&content);
            let length = content.chars().count();
            if length > PREVIEW_CHARS {
                let head: String = content.chars().take(PREVIEW_CHARS).collect();
                prop_assert_eq!(shown, format!("{}{}", head, ELLIPSIS));
            } else {
                prop_assert_eq!(shown, content);
            }
        }
    }
}
