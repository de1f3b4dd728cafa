// AI Gateway prompt templates.
// Placeholders are filled in a single left-to-right pass by the gateway, so
// substituted user text is never rescanned for further placeholders.

pub const EXTRACT_PROMPT_TEMPLATE: &str = "\
Parse the following resume text and extract the information into the specified JSON format. \
Make sure to accurately capture all sections. \
If a piece of information like a portfolio URL is missing, return an empty string for that field.

Resume Text:
---
{resume_text}
---";

pub const ENHANCE_PROMPT_TEMPLATE: &str = "\
Given the following resume in JSON format, enhance it to be more ATS-friendly. \
Focus on using strong action verbs, quantifying achievements where possible, \
and ensuring clear, standard phrasing. \
Rephrase responsibilities to highlight impact and results. \
Do not add any new information or skills. \
Return the enhanced resume in the exact same JSON format.

Resume JSON:
---
{resume_json}
---";

pub const MODIFY_PROMPT_TEMPLATE: &str = "\
Given the following resume in JSON format, apply the following modification requested by the user. \
Adhere strictly to the user's request. \
Return the modified resume in the exact same JSON format.

User's Request: \"{instruction}\"

Resume JSON:
---
{resume_json}
---";

pub const SCORE_PROMPT_TEMPLATE: &str = "\
Act as an advanced Applicant Tracking System (ATS) and resume expert. \
Analyze the following resume (in JSON format) against the provided job description.
Provide a score out of 100 representing the match quality.
Also, provide a brief summary of the resume's strengths for this role, \
and a list of specific, actionable suggestions for improvement to better align with the job description.

The output must be a JSON object with keys: \"score\" (number), \"strengths\" (string), \
and \"suggestions\" (an array of strings).

Job Description:
---
{job_description}
---

Resume JSON:
---
{resume_json}
---";
