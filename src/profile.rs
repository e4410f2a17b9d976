use std::fmt;

/// A learner's background and goal, collected once at startup and immutable
/// afterwards. Python experience only exists on the experienced-programmer
/// branch, so a "new programmer with basic Python" cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    NewToProgramming {
        goal: String,
    },
    ExperiencedProgrammer {
        python_level: PythonLevel,
        goal: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PythonLevel {
    NoPython,
    BasicPython,
}

impl Profile {
    pub fn goal(&self) -> &str {
        match self {
            Profile::NewToProgramming { goal } => goal,
            Profile::ExperiencedProgrammer { goal, .. } => goal,
        }
    }

    /// One-line background description used when rendering prompts.
    pub fn experience_summary(&self) -> String {
        match self {
            Profile::NewToProgramming { .. } => "completely new to programming".to_string(),
            Profile::ExperiencedProgrammer { python_level, .. } => {
                format!("an experienced programmer new to Python, with {python_level}")
            }
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::NewToProgramming { goal } => {
                write!(f, "no programming experience, goal: {goal}")
            }
            Profile::ExperiencedProgrammer { python_level, goal } => {
                write!(
                    f,
                    "experienced programmer new to Python ({python_level}), goal: {goal}"
                )
            }
        }
    }
}

impl fmt::Display for PythonLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PythonLevel::NoPython => write!(f, "no Python experience"),
            PythonLevel::BasicPython => write!(f, "basic Python knowledge"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_is_reachable_from_both_variants() {
        let new = Profile::NewToProgramming {
            goal: "build a website".to_string(),
        };
        let experienced = Profile::ExperiencedProgrammer {
            python_level: PythonLevel::BasicPython,
            goal: "data analysis".to_string(),
        };

        assert_eq!(new.goal(), "build a website");
        assert_eq!(experienced.goal(), "data analysis");
    }

    #[test]
    fn experience_summary_mentions_python_level_only_when_experienced() {
        let new = Profile::NewToProgramming {
            goal: "anything".to_string(),
        };
        assert!(!new.experience_summary().contains("Python experience"));

        let experienced = Profile::ExperiencedProgrammer {
            python_level: PythonLevel::NoPython,
            goal: "anything".to_string(),
        };
        assert!(
            experienced
                .experience_summary()
                .contains("no Python experience")
        );
    }
}
