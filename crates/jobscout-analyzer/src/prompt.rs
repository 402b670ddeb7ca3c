//! LLM prompts for posting classification and sponsorship analysis

use jobscout_domain::ClassificationRequest;

/// Builds prompts for one posting
pub struct PromptBuilder<'a> {
    request: &'a ClassificationRequest,
    max_description_chars: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(request: &'a ClassificationRequest, max_description_chars: usize) -> Self {
        Self {
            request,
            max_description_chars,
        }
    }

    /// Description cut to the configured number of characters
    fn description(&self) -> String {
        self.request.description.chars().take(self.max_description_chars).collect()
    }

    fn posting_block(&self) -> String {
        format!(
            "Job Title: {}\nCompany: {}\nDescription: {}\n",
            self.request.title,
            self.request.company,
            self.description()
        )
    }

    /// Category and entry-level prompt
    pub fn classification(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(CLASSIFICATION_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(&self.posting_block());
        prompt.push('\n');
        prompt.push_str(CLASSIFICATION_CRITERIA);
        prompt.push_str("\n\n");
        prompt.push_str(CLASSIFICATION_FORMAT);
        prompt
    }

    /// Sponsorship likelihood prompt
    pub fn sponsorship(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(SPONSORSHIP_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(&self.posting_block());
        prompt.push('\n');
        prompt.push_str(SPONSORSHIP_CRITERIA);
        prompt.push_str("\n\n");
        prompt.push_str(SPONSORSHIP_FORMAT);
        prompt
    }
}

/// Schema hint passed to providers that support structured output
pub const CLASSIFICATION_SCHEMA: &str =
    r#"{"category": "string", "is_entry_level": "boolean", "reasoning": "string"}"#;

/// Schema hint for the sponsorship answer
pub const SPONSORSHIP_SCHEMA: &str = r#"{"signal": "HIGH|MEDIUM|LOW", "reasoning": "string"}"#;

const CLASSIFICATION_INSTRUCTIONS: &str = "Analyze this job posting and provide:
1. Category: One of [Data Scientist, Data Analyst, Quantitative Finance, Data Engineer, Other]
2. Is it entry-level? (0-2 years experience required)
3. Brief reasoning";

const CLASSIFICATION_CRITERIA: &str = "Quantitative Finance includes: Quantitative Analyst, Quantitative Researcher, \
Quant Trader (Junior/New Grad), Financial Engineer, Quant Risk/Model Validation (entry-level).

Entry-level criteria (at least ONE must be met):
- Title includes: \"New Grad\", \"Entry Level\", \"Junior\", \"I\", \"Associate\"
- Experience requirement <= 2 years
- Early-career responsibility and scope
- Degree-focused hiring (BS/MS/PhD students or recent graduates)";

const CLASSIFICATION_FORMAT: &str = r#"Respond in JSON format only:
{
  "category": "...",
  "is_entry_level": true/false,
  "reasoning": "..."
}"#;

const SPONSORSHIP_INSTRUCTIONS: &str =
    "Assess the likelihood that the employer of this job posting would sponsor H-1B visas for international candidates.";

const SPONSORSHIP_CRITERIA: &str = "Consider:
1. Explicit mentions of visa sponsorship or international candidates
2. Language that suggests openness to diverse candidates
3. Absence of restrictive citizenship requirements
4. Company size and industry (tech/finance typically sponsor)
5. Role seniority and specialization";

const SPONSORSHIP_FORMAT: &str = r#"Respond in JSON format only:
{
  "signal": "HIGH/MEDIUM/LOW",
  "reasoning": "Brief explanation"
}"#;
