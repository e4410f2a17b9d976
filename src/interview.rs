use std::io::{self, Write};

use anyhow::Result;

use crate::profile::{Profile, PythonLevel};

const PROGRAMMING_CHOICES: &[&str] = &[
    "No programming experience",
    "Experienced programmer new to Python",
];

const PYTHON_CHOICES: &[&str] = &["No Python experience", "Basic Python knowledge"];

/// Runs the fixed interview sequence. Invalid answers re-prompt in place and
/// never reach the caller; the Python-experience question is only asked on
/// the experienced-programmer branch.
pub fn gather_profile() -> Result<Profile> {
    let programming = ask_choice("💻 What is your programming experience?", PROGRAMMING_CHOICES)?;

    if programming == 0 {
        let goal = ask_goal()?;
        Ok(Profile::NewToProgramming { goal })
    } else {
        let python = ask_choice("🐍 What is your Python experience?", PYTHON_CHOICES)?;
        let python_level = if python == 0 {
            PythonLevel::NoPython
        } else {
            PythonLevel::BasicPython
        };
        let goal = ask_goal()?;
        Ok(Profile::ExperiencedProgrammer { python_level, goal })
    }
}

/// Yes/no gate; anything other than "y"/"yes" counts as no.
pub fn confirm(question: &str) -> Result<bool> {
    print!("\n{question} [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(parse_yes_no(&input))
}

fn ask_choice(question: &str, choices: &[&str]) -> Result<usize> {
    println!("\n{question}");
    for (idx, choice) in choices.iter().enumerate() {
        println!("  {}. {}", idx + 1, choice);
    }

    loop {
        print!("Select an option (1-{}): ", choices.len());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        match parse_choice(input.trim(), choices.len()) {
            Some(idx) => break Ok(idx),
            None => println!("❌ Please enter a number between 1 and {}.", choices.len()),
        }
    }
}

fn ask_goal() -> Result<String> {
    loop {
        print!("\n🎯 What is your learning goal for Python? ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let goal = input.trim();

        if goal.is_empty() {
            println!("❌ Learning goal cannot be empty. Please try again.");
            continue;
        }

        break Ok(goal.to_string());
    }
}

fn parse_choice(input: &str, len: usize) -> Option<usize> {
    match input.parse::<usize>() {
        Ok(n) if n >= 1 && n <= len => Some(n - 1),
        _ => None,
    }
}

fn parse_yes_no(input: &str) -> bool {
    let answer = input.trim().to_lowercase();
    answer == "y" || answer == "yes"
}
