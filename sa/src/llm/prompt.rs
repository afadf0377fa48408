//! Schedule-extraction prompt

/// Instructions sent ahead of the user's text
///
/// The shape mirrors the domain model exactly; unknown values must come back
/// as null so the clarify engine can ask about them instead of the model
/// inventing answers.
const SCHEDULE_PROMPT: &str = r#"Extract the student's schedule from the text below.

Respond with a single JSON object and nothing else, in this shape:
{
  "meetings": [
    {
      "description": "<short name, e.g. 'CS101 Lecture'>",
      "day": "<weekday name or null>",
      "time": "<time of day as written, or null>",
      "duration_minutes": <integer or null>,
      "type": "<regular | exam | presentation>",
      "location": "<place or null>",
      "course_code": "<course code or null>"
    }
  ],
  "tasks": [
    {
      "description": "<short name>",
      "day": "<weekday name or null>",
      "time": "<time of day as written, or null>",
      "duration_minutes": <integer or null>,
      "priority": "<low | medium | high>",
      "category": "<homework | preparation | other>",
      "is_fixed_time": <true | false>,
      "course_code": "<course code or null>",
      "related_event": "<description of the meeting this prepares for, or null>"
    }
  ],
  "course_codes": ["<every course code mentioned>"]
}

Rules:
- Meetings are fixed-time occurrences (lectures, exams, project meetings).
- Tasks are flexible work items (assignments, studying).
- Use null for anything the text does not state. Never guess AM or PM.
- A task that prepares for a meeting gets that meeting's description in
  related_event.

Text:
"#;

/// Build the full prompt for one parse request
pub fn build_schedule_prompt(text: &str) -> String {
    format!("{}{}", SCHEDULE_PROMPT, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_user_text() {
        let prompt = build_schedule_prompt("I have a CS101 lecture on Monday at 9am.");
        assert!(prompt.ends_with("I have a CS101 lecture on Monday at 9am."));
        assert!(prompt.contains("course_codes"));
        assert!(prompt.contains("Never guess AM or PM"));
    }
}
