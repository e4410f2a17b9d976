use crate::plan::Milestone;
use crate::profile::Profile;

pub const PLAN_SYSTEM_PROMPT: &str = r#"You are a STRICT JSON curriculum planner that turns a learner profile into a milestone-based Python training plan.

OBJECTIVE
- Given the learner's background and goal, produce an ordered sequence of milestones that builds toward the goal.
- Each milestone needs a short name, a one-sentence objective, and the concrete topics to study.

PLANNING RULES
1. Order milestones from fundamentals toward the goal; never assume knowledge a prior milestone did not cover.
2. Keep the plan to 3-6 milestones; merge rather than pad.
3. Topics must be concrete and study-sized (e.g. "list comprehensions", "virtual environments"), not vague themes.
4. Calibrate the starting point to the stated experience: skip programming basics for experienced programmers.

OUTPUT FORMAT (STRICT JSON ONLY)
- Return exactly one JSON object.
- No prose, no markdown, no comments, no trailing text.
- JSON must match this schema exactly:

{
  "milestones": [
    {
      "name": "<string>",
      "objective": "<string>",
      "topics": [<string>, ...]
    }
  ]
}

ADDITIONAL CONSTRAINTS
- `milestones` MUST be a non-empty array, ordered first to last.
- `name` and `objective` MUST be non-empty strings.
- `topics` MUST be an array of strings with at least one entry.
- No additional keys are allowed. No nulls. No trailing commas.

NEGATIVE EXAMPLES (DO NOT DO)
- ```json { "milestones": [...] } ```  // code fences not allowed
- { "plan": [...] }                    // wrong key
- { "milestones": [] }                 // empty plan not allowed
- { "milestones": [...] } EXTRA TEXT   // extra text not allowed

ALLOWED OUTPUT SHAPE (the only shape):
{"milestones":[{"name":"","objective":"","topics":[""]}]}
"#;

pub const TASK_SYSTEM_PROMPT: &str = r#"You are a Python instructor writing a single practice task in Markdown.

OBJECTIVE
- Given one training milestone, write one self-contained practice task that exercises its objective.

RULES
1. The task must be solvable using only the milestone's listed topics.
2. Structure the response as Markdown: a title, a short scenario, numbered requirements, and a hints section.
3. State the expected outcome so the learner can check their own work.
4. Do not include the solution.

OUTPUT FORMAT
- Return Markdown text only. No JSON, and no code fence wrapping the whole response.
"#;

/// Renders the user message for the plan request. Deterministic: the literal
/// goal text and the experience branch always appear in the output.
pub fn plan_request(profile: &Profile) -> String {
    format!(
        "The learner is {}. Their learning goal for Python is: {}.\n\n\
         Design a milestone-based Python training plan that takes this learner \
         from their current level to their goal.",
        profile.experience_summary(),
        profile.goal()
    )
}

/// Renders the user message for the practice-task request.
pub fn task_request(milestone: &Milestone) -> String {
    format!(
        "Write one practice task for the training milestone \"{}\".\n\
         Milestone objective: {}\n\
         Topics covered: {}\n\n\
         The task should exercise the objective using only the listed topics.",
        milestone.name,
        milestone.objective,
        milestone.topics.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::PythonLevel;

    #[test]
    fn plan_request_embeds_goal_for_new_programmer() {
        let profile = Profile::NewToProgramming {
            goal: "automate my spreadsheets".to_string(),
        };

        let rendered = plan_request(&profile);
        assert!(rendered.contains("automate my spreadsheets"));
        assert!(rendered.contains("new to programming"));
        assert!(!rendered.contains("Python experience"));
    }

    #[test]
    fn plan_request_reflects_python_level_for_experienced_programmer() {
        let profile = Profile::ExperiencedProgrammer {
            python_level: PythonLevel::BasicPython,
            goal: "write a web scraper".to_string(),
        };

        let rendered = plan_request(&profile);
        assert!(rendered.contains("write a web scraper"));
        assert!(rendered.contains("experienced programmer new to Python"));
        assert!(rendered.contains("basic Python knowledge"));
    }

    #[test]
    fn plan_request_is_deterministic() {
        let profile = Profile::NewToProgramming {
            goal: "learn scripting".to_string(),
        };
        assert_eq!(plan_request(&profile), plan_request(&profile));
    }

    #[test]
    fn task_request_embeds_all_milestone_fields() {
        let milestone = Milestone {
            name: "Basics".to_string(),
            objective: "Learn syntax".to_string(),
            topics: vec!["variables".to_string(), "loops".to_string()],
        };

        let rendered = task_request(&milestone);
        assert!(rendered.contains("Basics"));
        assert!(rendered.contains("Learn syntax"));
        assert!(rendered.contains("variables, loops"));
    }
}
