// Prompt templates for résumé analysis.
// The résumé text is substituted verbatim for `{resume_text}`.

use crate::analysis::AnalysisMode;

pub const RESUME_TEXT_PLACEHOLDER: &str = "{resume_text}";

pub const SCORE_PROMPT: &str = "\
Evaluate the following resume text and provide a score from 1 to 10, \
where 10 is an excellent resume and 1 is a very poor resume.
Focus on clarity, conciseness, ATS friendliness, relevance to typical job requirements, \
and overall presentation.
Keep in mind that the text was extracted automatically from a PDF file, \
so it may contain extraction artifacts and formatting inconsistencies.
Be harsh but fair.
Return ONLY the score as a single integer number, with no explanation.
Under no circumstances may you return any other text. \
If the text is not a resume, return 0.

Resume Text:
{resume_text}";

pub const REVIEW_PROMPT: &str = "\
You are a resume analysis assistant. Evaluate the following resume text and provide \
a review of its content, focusing on ATS friendliness, clarity, and relevance to \
typical job requirements.
Your response must be constructive and suggest concrete improvements.
Keep in mind that the text was extracted automatically from a PDF file, \
so it may contain formatting inconsistencies; do not comment on them.
Respond in simple plain text only. No bullet points, lists, headings or markup.
Keep the response under 100 words.

Resume Text:
{resume_text}";

/// Builds the model prompt for `mode`. Pure: same input, same prompt.
pub fn build_prompt(resume_text: &str, mode: AnalysisMode) -> String {
    let template = match mode {
        AnalysisMode::Score => SCORE_PROMPT,
        AnalysisMode::Review => REVIEW_PROMPT,
    };
    template.replace(RESUME_TEXT_PLACEHOLDER, resume_text)
}
