// src/linkedin_analysis/prompts.rs
//! Prompt text for company extraction and blog generation.
//!
//! User-supplied text is embedded verbatim.

use crate::types::COMPANY_FIELDS;

const DEFAULT_BLOG_DETAILS: &str =
    "Write for intermediate developers. Include code examples, best practices, and a conclusion.";

/// Instruction asking the model for the eight company fields as a JSON object.
pub fn company_extraction_prompt(context: &str, title: &str, snippet: &str) -> String {
    let field_list = COMPANY_FIELDS
        .iter()
        .map(|field| {
            if *field == "type_of_company" {
                format!("- {} (private or public)", field)
            } else {
                format!("- {}", field)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let output_shape = COMPANY_FIELDS
        .iter()
        .map(|field| format!("  \"{}\": \"\"", field))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"You are a precise and structured information extractor.

Given the following context about a company, extract and return the information in JSON format with these fields:

{field_list}

If any field is not mentioned, return "Not available" for that field.

Context:
{context}

Title: {title}
Industry: {snippet}

Output format (strict JSON inside a ```json fenced block):
{{
{output_shape}
}}
"#
    )
}

/// Instruction for a ~800 word Markdown article.
pub fn blog_article_prompt(title: &str, details: &str) -> String {
    let details = if details.trim().is_empty() {
        DEFAULT_BLOG_DETAILS
    } else {
        details
    };

    format!(
        r#"You are an expert programming blogger. Write a complete, high-quality blog post in Markdown.

Title: {title}
Extra Instructions: {details}

Requirements:
- Start with the title as # Heading
- Engaging intro with a real-world hook
- 3–5 sections with ## subheadings
- Include at least 2 code blocks in ```python (or relevant language)
- Use bullet points for tips/lists
- End with a conclusion and key takeaways
- Total: ~800 words
- Tone: clear, professional, practical
- Output ONLY the Markdown content. No JSON. No wrappers.

Begin now.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_prompt_lists_every_field() {
        let prompt = company_extraction_prompt("ctx", "Stripe | LinkedIn", "Financial services");
        for field in COMPANY_FIELDS {
            assert!(prompt.contains(&format!("- {}", field)), "missing {}", field);
            assert!(prompt.contains(&format!("\"{}\": \"\"", field)));
        }
        assert!(prompt.contains("\"Not available\""));
        assert!(prompt.contains("Title: Stripe | LinkedIn"));
        assert!(prompt.contains("Industry: Financial services"));
    }

    #[test]
    fn test_company_prompt_embeds_context_verbatim() {
        let context = "Stripe is a fintech company.\n<b>\"quoted\"</b> {braces}";
        let prompt = company_extraction_prompt(context, "", "");
        assert!(prompt.contains(context));
    }

    #[test]
    fn test_blog_prompt_defaults_details() {
        let prompt = blog_article_prompt("Git Worktrees", "  ");
        assert!(prompt.contains("Title: Git Worktrees"));
        assert!(prompt.contains(DEFAULT_BLOG_DETAILS));
        assert!(prompt.contains("## subheadings"));
        assert!(prompt.contains("~800 words"));
    }

    #[test]
    fn test_blog_prompt_uses_details() {
        let prompt = blog_article_prompt("Dockerizing Apps", "Step-by-step, include Dockerfile");
        assert!(prompt.contains("Extra Instructions: Step-by-step, include Dockerfile"));
        assert!(!prompt.contains(DEFAULT_BLOG_DETAILS));
    }
}
