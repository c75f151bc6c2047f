// All prompt constants for the evaluation pipeline. The rules block built by
// prompt_builder is appended to BASE_SYSTEM; user prompts are templates with
// {placeholder} slots replaced by the evaluator.

/// Base system prompt shared by every mode. When no rule configuration
/// applies, this is sent unmodified.
pub const BASE_SYSTEM: &str = "You are a senior recruiter evaluating candidate resumes \
    for a hiring team. Score fairly and consistently on a 0-100 scale per category, \
    ground every observation in the resume text, and never invent facts. \
    Respond only through the function call you are given.";

/// Closing line of the rules block: ties scoring to the stated weightages and
/// red-flag detection to the company-specific concerns.
pub const RULES_CLOSING_INSTRUCTION: &str = "Weight your category scores by the \
    percentages in the weightage model above, and ground red-flag detection in the \
    company-specific concerns listed in these rules.";

/// Comparative-mode user prompt. Replace {domain}, {scorecard_json}, {resume_text}.
pub const COMPARATIVE_PROMPT_TEMPLATE: &str = r#"Evaluate the following resume for the {domain} department.

A trainee has already scored this resume. Their scorecard (each category 0-100):
{scorecard_json}

Produce your own independent scores for the same six categories, then compare them
with the trainee's. For each category, say whether the trainee was accurate,
too lenient, or too strict, with one or two sentences of feedback. Also provide
overall feedback, red flags, suggested interview questions, a recommendation,
and your reasoning.

RESUME:
{resume_text}"#;

/// Quick-fitment user prompt. Replace {job_description}, {resume_text}.
pub const QUICK_FITMENT_PROMPT_TEMPLATE: &str = r#"Assess how well the following resume fits the job description below.
Return a fitment percentage (0-100), a short status, matched and missing skills,
any red flags, a recommendation (RECOMMENDED, CONSIDER, or NOT_RECOMMENDED),
your reasoning, and a one-sentence summary.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}"#;

/// Standalone user prompt. Replace {domain}, {resume_text}.
pub const STANDALONE_PROMPT_TEMPLATE: &str = r#"Evaluate the following resume for the {domain} department.
Score all six categories from 0 to 100, list strengths and gaps, flag any
concerns, suggest interview questions, and give a recommendation with reasoning.

RESUME:
{resume_text}"#;
