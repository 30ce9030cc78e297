//! Fixed onboarding content: goals, experience levels, time commitments,
//! interests and the diagnostic questions.

use super::{Goal, SkillLevel, TimeCommitment};

/// A selectable card or radio option
#[derive(Debug, Clone, Copy)]
pub struct Choice<T: 'static> {
    pub value: T,
    pub label: &'static str,
    pub description: &'static str,
}

pub const GOALS: &[Choice<Goal>] = &[
    Choice { value: Goal::CareerChange, label: "Career Change", description: "Transition into a tech career" },
    Choice { value: Goal::SkillImprovement, label: "Skill Improvement", description: "Enhance existing programming skills" },
    Choice { value: Goal::Academic, label: "Academic Success", description: "Prepare for exams or coursework" },
    Choice { value: Goal::PersonalProjects, label: "Personal Projects", description: "Build apps and side projects" },
];

pub const EXPERIENCE_LEVELS: &[Choice<SkillLevel>] = &[
    Choice { value: SkillLevel::Beginner, label: "Complete Beginner", description: "Never written code before" },
    Choice { value: SkillLevel::SomeExperience, label: "Some Experience", description: "1-6 months of coding" },
    Choice { value: SkillLevel::Intermediate, label: "Intermediate", description: "6+ months of coding" },
    Choice { value: SkillLevel::Advanced, label: "Advanced", description: "Years of experience" },
];

pub const TIME_COMMITMENTS: &[Choice<TimeCommitment>] = &[
    Choice { value: TimeCommitment::FiveToTen, label: "5-10 hours/week", description: "Casual learning pace" },
    Choice { value: TimeCommitment::TenToTwenty, label: "10-20 hours/week", description: "Steady progress" },
    Choice { value: TimeCommitment::TwentyToForty, label: "20-40 hours/week", description: "Intensive learning" },
    Choice { value: TimeCommitment::FortyPlus, label: "40+ hours/week", description: "Full-time commitment" },
];

pub const INTERESTS: &[&str] = &[
    "Web Development",
    "Mobile Apps",
    "Data Science",
    "Machine Learning",
    "Game Development",
    "Desktop Applications",
    "DevOps",
    "Cybersecurity",
];

/// One multiple-choice assessment question
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticQuestion {
    pub id: &'static str,
    pub question: &'static str,
    pub code: Option<&'static str>,
    pub options: &'static [&'static str],
    pub correct: &'static str,
}

impl DiagnosticQuestion {
    pub fn offers(&self, option: &str) -> bool {
        self.options.contains(&option)
    }
}

pub const DIAGNOSTIC_QUESTIONS: &[DiagnosticQuestion] = &[
    DiagnosticQuestion {
        id: "loops",
        question: "What does this code output?",
        code: Some("for i in range(3):\n    print(i * 2)"),
        options: &["0, 2, 4", "0, 1, 2", "2, 4, 6", "Error"],
        correct: "0, 2, 4",
    },
    DiagnosticQuestion {
        id: "functions",
        question: "What is the purpose of a function?",
        code: None,
        options: &[
            "To store data",
            "To reuse code and organize logic",
            "To display output",
            "To handle errors",
        ],
        correct: "To reuse code and organize logic",
    },
    DiagnosticQuestion {
        id: "variables",
        question: "Which is a valid variable name in most programming languages?",
        code: None,
        options: &["2name", "user-age", "user_name", "class"],
        correct: "user_name",
    },
];

pub fn question(id: &str) -> Option<&'static DiagnosticQuestion> {
    DIAGNOSTIC_QUESTIONS.iter().find(|q| q.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_correct_answer_is_offered() {
        for q in DIAGNOSTIC_QUESTIONS {
            assert!(q.offers(q.correct), "{} does not offer its answer", q.id);
        }
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(GOALS.len(), 4);
        assert_eq!(EXPERIENCE_LEVELS.len(), 4);
        assert_eq!(TIME_COMMITMENTS.len(), 4);
        assert_eq!(INTERESTS.len(), 8);
        assert_eq!(DIAGNOSTIC_QUESTIONS.len(), 3);
    }
}
