//! Declared output shapes sent with every generation request.
//!
//! Written in the Gemini schema dialect (`OBJECT`, `ARRAY`, `STRING`, `INTEGER`).
//! The `required` lists mirror the non-defaulted fields of the serde models.

use serde_json::{json, Value};

pub fn resume_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "contactInfo": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING" },
                    "phone": { "type": "STRING" },
                    "email": { "type": "STRING" },
                    "linkedin": { "type": "STRING" },
                    "portfolio": { "type": "STRING" }
                },
                "required": ["name", "email"]
            },
            "summary": { "type": "STRING" },
            "workExperience": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "jobTitle": { "type": "STRING" },
                        "company": { "type": "STRING" },
                        "location": { "type": "STRING" },
                        "dates": { "type": "STRING" },
                        "responsibilities": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        }
                    },
                    "required": ["jobTitle", "company", "dates", "responsibilities"]
                }
            },
            "education": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "degree": { "type": "STRING" },
                        "institution": { "type": "STRING" },
                        "location": { "type": "STRING" },
                        "graduationDate": { "type": "STRING" }
                    },
                    "required": ["degree", "institution", "graduationDate"]
                }
            },
            "skills": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["contactInfo", "summary", "workExperience", "education", "skills"]
    })
}

pub fn ats_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": {
                "type": "INTEGER",
                "description": "A score from 0 to 100."
            },
            "strengths": {
                "type": "STRING",
                "description": "A paragraph summarizing the resume's strengths."
            },
            "suggestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "An array of actionable suggestions."
            }
        },
        "required": ["score", "strengths", "suggestions"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(schema: &Value) -> Vec<&str> {
        schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_resume_schema_requires_all_sections() {
        let schema = resume_schema();
        assert_eq!(
            required(&schema),
            vec!["contactInfo", "summary", "workExperience", "education", "skills"]
        );
        assert_eq!(
            required(&schema["properties"]["contactInfo"]),
            vec!["name", "email"]
        );
    }

    #[test]
    fn test_every_required_field_is_declared() {
        let schema = resume_schema();
        let nested = [
            &schema,
            &schema["properties"]["contactInfo"],
            &schema["properties"]["workExperience"]["items"],
            &schema["properties"]["education"]["items"],
        ];
        for object in nested {
            for field in required(object) {
                assert!(
                    object["properties"].get(field).is_some(),
                    "required field {field} has no property declaration"
                );
            }
        }
    }

    #[test]
    fn test_ats_schema_score_is_integer() {
        let schema = ats_schema();
        assert_eq!(schema["properties"]["score"]["type"], "INTEGER");
        assert_eq!(required(&schema), vec!["score", "strengths", "suggestions"]);
    }
}
