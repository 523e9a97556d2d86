// LLM prompt templates for the screening steps.
// System prompts are built with llm_client::prompts::json_system.

/// Persona line for resume extraction.
pub const RESUME_PARSE_PERSONA: &str = "You are an expert resume parser. \
    Extract structured candidate information from resume text.";

/// Resume extraction prompt template. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"Extract the candidate's information from the resume text below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "Full Name",
  "email": "name@example.com",
  "phone": "555-123-4567",
  "location": "City, Country",
  "skills": ["Python", "React"],
  "experience": [
    {
      "title": "Senior Developer",
      "company": "Tech Company",
      "startDate": "2018-01",
      "endDate": "Present",
      "description": "One-sentence summary of the role"
    }
  ],
  "education": [
    {
      "institution": "University of Technology",
      "degree": "B.S. Computer Science",
      "startDate": "2011-09",
      "endDate": "2015-05"
    }
  ],
  "summary": "Two-sentence professional summary"
}

Rules:
- Dates use YYYY-MM. Use "Present" for a current role.
- Extract ALL technical and soft skills mentioned anywhere in the resume, one name per entry.
- Use an empty string or empty array when information is not present. Do NOT invent details.

RESUME TEXT:
{resume_text}"#;

/// Persona line for standard profile generation.
pub const PROFILE_PERSONA: &str = "You are an expert in human resources and talent acquisition. \
    Describe the standard expectations for a job position based on current market trends.";

/// Standard profile prompt template. Replace `{position}` before sending.
pub const PROFILE_PROMPT_TEMPLATE: &str = r#"Create a standard employee profile for the position of {position}.

Return a JSON object with this EXACT schema (no extra fields):
{
  "position": "{position}",
  "requiredSkills": ["JavaScript", "React"],
  "preferredSkills": ["Next.js", "GraphQL"],
  "minimumExperience": 3,
  "educationLevel": "Bachelor's Degree",
  "responsibilities": ["Develop and maintain web applications"]
}

Rules:
- requiredSkills: the mandatory technologies and tools, one name per entry.
- preferredSkills: nice-to-have skills that are NOT already in requiredSkills.
- minimumExperience: whole years of typical required experience.
- educationLevel: the minimum degree typically expected."#;
