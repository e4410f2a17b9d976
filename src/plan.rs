use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// One stage of a training plan, parsed from the model's JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Milestone {
    pub name: String,
    pub objective: String,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainingPlan {
    pub milestones: Vec<Milestone>,
}

/// Parse boundary for the model response: malformed text is an `Err` here,
/// never an exception deeper in the pipeline. The raw text is parsed exactly
/// once; everything downstream works with the structured plan.
pub fn parse_training_plan(content: &str) -> Result<TrainingPlan> {
    let json_fragment = extract_json_object(content)
        .ok_or_else(|| anyhow!("Response did not contain a JSON object"))?;

    let plan: TrainingPlan = serde_json::from_str(&json_fragment)
        .with_context(|| format!("Failed to parse training plan JSON: {content}"))?;

    Ok(plan)
}

fn extract_json_object(input: &str) -> Option<String> {
    let mut cleaned = input.to_string();

    loop {
        if let Some(think_start) = cleaned.find("<think>") {
            if let Some(think_end_pos) = cleaned[think_start..].find("</think>") {
                let absolute_end = think_start + think_end_pos + "</think>".len();
                cleaned.replace_range(think_start..absolute_end, "");
            } else {
                cleaned.replace_range(think_start.., "");
                break;
            }
        } else {
            break;
        }
    }

    let trimmed = cleaned.trim();
    let start = trimmed.find('{')?;

    // Braces inside string values must not move the depth counter, so track
    // whether the scan is inside a string literal (and escape sequences).
    let mut depth = 0u32;
    let mut in_string = false;
    let mut escaped = false;
    for (idx, ch) in trimmed[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + idx;
                    return Some(trimmed[start..=end].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Renders the plan as Markdown: 1-based milestone headings, an objective
/// line, then the topics as bullets, in response order. Pure and
/// deterministic, so re-rendering the same plan is byte-identical.
pub fn format_training_plan(plan: &TrainingPlan) -> String {
    let mut formatted = String::from("# Python Training Plan\n\n");

    for (i, milestone) in plan.milestones.iter().enumerate() {
        formatted.push_str(&format!("## Milestone {}: {}\n\n", i + 1, milestone.name));
        formatted.push_str(&format!("**Objective:** {}\n\n", milestone.objective));
        formatted.push_str("**Topics:**\n");
        for topic in &milestone.topics {
            formatted.push_str(&format!("- {topic}\n"));
        }
        formatted.push('\n');
    }

    formatted
}
