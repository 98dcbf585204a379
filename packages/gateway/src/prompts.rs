// ABOUTME: Prompt templates for PRD generation, refinement, and review
// ABOUTME: Builds the system and user prompts sent through the completion client

/// Number of approved exemplars included in a suggestion prompt
const MAX_EXEMPLARS: usize = 3;

/// System prompt for generating a new PRD from a product idea
pub const GENERATION_SYSTEM_PROMPT: &str = r#"You are an expert Product Requirements Document (PRD) writer. You help product managers, owners, and stakeholders produce PRDs that serve as the single source of truth through product development.

Guidelines:
1. Write detailed, comprehensive documents
2. Make requirements unambiguous for development, design, and testing teams
3. Structure information logically and hierarchically
4. Include acceptance criteria where appropriate
5. Consider technical feasibility and business value

Structure every PRD with these sections:
1. **Product Overview** - vision, target audience, problem statement and solution
2. **Goals and Objectives** - business objectives, user goals, success metrics
3. **Features and Functionality** - core features, user stories, prioritization
4. **Technical Requirements** - system, performance, security, and integration needs
5. **User Experience Requirements** - UI/UX guidelines, accessibility, user journeys
6. **Constraints and Assumptions** - technical, business, timeline and resource constraints
7. **Success Criteria and Metrics** - definition of done, testing and launch criteria
8. **Dependencies and Risks** - external dependencies, risk assessment and mitigation

Ask clarifying questions when the input lacks detail for a section."#;

/// User prompt wrapping the product description for initial generation
pub fn generation_prompt(description: &str) -> String {
    format!(
        "Please generate a comprehensive Product Requirements Document based on this input: {}",
        description
    )
}

/// System prompt for iterating on an existing PRD, with the current content inline
pub fn refinement_system_prompt(prd_content: &str) -> String {
    format!(
        r#"You are helping to iterate on and improve a Product Requirements Document.

Current PRD content:
{}

Guidelines:
- Help the user refine, expand, or modify sections of the PRD
- Suggest improvements based on best practices
- Answer questions about the PRD content
- Maintain the PRD structure and quality
- Be specific and actionable"#,
        prd_content
    )
}

/// System prompt comparing a draft against approved exemplar PRDs
pub fn suggestion_system_prompt(approved_prds: &[String]) -> String {
    let exemplars = approved_prds
        .iter()
        .take(MAX_EXEMPLARS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    format!(
        r#"Analyze the current PRD against these approved, high-quality PRDs and suggest specific improvements.

Approved PRDs for reference:
{}

Provide specific, actionable suggestions grounded in the approved examples."#,
        exemplars
    )
}

/// User prompt carrying the draft to improve
pub fn suggestion_prompt(prd_content: &str) -> String {
    format!("Current PRD to improve:\n{}", prd_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_prompt_includes_description() {
        let desc = "A mobile app for tracking water intake";
        let prompt = generation_prompt(desc);
        assert!(prompt.contains(desc));
    }

    #[test]
    fn test_refinement_system_prompt_embeds_content() {
        let prompt = refinement_system_prompt("# My PRD\n\nSome content");
        assert!(prompt.contains("# My PRD"));
        assert!(prompt.contains("iterate"));
    }

    #[test]
    fn test_suggestion_system_prompt_caps_exemplars() {
        let approved: Vec<String> = (1..=5).map(|i| format!("PRD {}", i)).collect();
        let prompt = suggestion_system_prompt(&approved);
        assert!(prompt.contains("PRD 1"));
        assert!(prompt.contains("PRD 3"));
        assert!(!prompt.contains("PRD 4"));
    }
}
