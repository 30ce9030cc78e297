//! Onboarding wizard
//!
//! A four-step linear questionnaire:
//! Goal → Experience → Time commitment (+ optional interests) → Diagnostic.
//! Finishing the diagnostic scores the answers and produces the
//! `OnboardingProfile` that routes the learner to the dashboard.

pub mod catalog;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

pub use catalog::{DiagnosticQuestion, DIAGNOSTIC_QUESTIONS};

/// Invalid input to the wizard. The wizard state is left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OnboardingError {
    #[error("unknown {field} '{value}'")]
    UnknownChoice { field: &'static str, value: String },
    #[error("unknown interest '{0}'")]
    UnknownInterest(String),
    #[error("unknown diagnostic question '{0}'")]
    UnknownQuestion(String),
    #[error("'{option}' is not an option for question '{question}'")]
    InvalidOption { question: String, option: String },
}

/// Why the learner is here
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    CareerChange,
    SkillImprovement,
    Academic,
    PersonalProjects,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::CareerChange,
        Goal::SkillImprovement,
        Goal::Academic,
        Goal::PersonalProjects,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Goal::CareerChange => "career-change",
            Goal::SkillImprovement => "skill-improvement",
            Goal::Academic => "academic",
            Goal::PersonalProjects => "personal-projects",
        }
    }

    /// Badge shown above the learning path, e.g. `CAREER CHANGE Track`
    pub fn track_label(&self) -> String {
        format!("{} Track", self.id().replacen('-', " ", 1).to_uppercase())
    }
}

/// Self-reported experience, also used for the computed skill level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillLevel {
    Beginner,
    SomeExperience,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::SomeExperience,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::SomeExperience => "some-experience",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }

    /// Map a diagnostic score onto a level
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => SkillLevel::Beginner,
            1 => SkillLevel::SomeExperience,
            2 => SkillLevel::Intermediate,
            _ => SkillLevel::Advanced,
        }
    }
}

/// Weekly study time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeCommitment {
    #[serde(rename = "5-10-hours")]
    FiveToTen,
    #[serde(rename = "10-20-hours")]
    TenToTwenty,
    #[serde(rename = "20-40-hours")]
    TwentyToForty,
    #[serde(rename = "40-plus-hours")]
    FortyPlus,
}

impl TimeCommitment {
    pub const ALL: [TimeCommitment; 4] = [
        TimeCommitment::FiveToTen,
        TimeCommitment::TenToTwenty,
        TimeCommitment::TwentyToForty,
        TimeCommitment::FortyPlus,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TimeCommitment::FiveToTen => "5-10-hours",
            TimeCommitment::TenToTwenty => "10-20-hours",
            TimeCommitment::TwentyToForty => "20-40-hours",
            TimeCommitment::FortyPlus => "40-plus-hours",
        }
    }
}

macro_rules! impl_id_parsing {
    ($ty:ty, $field:literal) => {
        impl std::str::FromStr for $ty {
            type Err = OnboardingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.id() == s)
                    .ok_or_else(|| OnboardingError::UnknownChoice {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.id())
            }
        }
    };
}

impl_id_parsing!(Goal, "goal");
impl_id_parsing!(SkillLevel, "experience");
impl_id_parsing!(TimeCommitment, "time commitment");

/// Result of the questionnaire, persisted under `codementor_profile`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProfile {
    pub goal: Goal,
    pub experience: SkillLevel,
    pub time_commitment: TimeCommitment,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub diagnostic_answers: BTreeMap<String, String>,
    pub calculated_skill_level: SkillLevel,
    pub diagnostic_score: u8,
}

/// Wizard position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    Goal,
    Experience,
    TimeCommitment,
    Diagnostic,
    Complete,
}

impl OnboardingStep {
    /// Number of interactive steps
    pub const TOTAL: usize = 4;

    pub fn index(&self) -> usize {
        match self {
            OnboardingStep::Goal => 0,
            OnboardingStep::Experience => 1,
            OnboardingStep::TimeCommitment => 2,
            OnboardingStep::Diagnostic => 3,
            OnboardingStep::Complete => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::Goal => "What's Your Goal?",
            OnboardingStep::Experience => "Experience Level",
            OnboardingStep::TimeCommitment => "Time Commitment",
            OnboardingStep::Diagnostic => "Quick Assessment",
            OnboardingStep::Complete => "All Set",
        }
    }

    fn next(&self) -> Self {
        match self {
            OnboardingStep::Goal => OnboardingStep::Experience,
            OnboardingStep::Experience => OnboardingStep::TimeCommitment,
            OnboardingStep::TimeCommitment => OnboardingStep::Diagnostic,
            OnboardingStep::Diagnostic | OnboardingStep::Complete => OnboardingStep::Complete,
        }
    }

    fn previous(&self) -> Option<Self> {
        match self {
            OnboardingStep::Goal => None,
            OnboardingStep::Experience => Some(OnboardingStep::Goal),
            OnboardingStep::TimeCommitment => Some(OnboardingStep::Experience),
            OnboardingStep::Diagnostic => Some(OnboardingStep::TimeCommitment),
            OnboardingStep::Complete => Some(OnboardingStep::Diagnostic),
        }
    }
}

/// Outcome of a `next` or `back` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingTransition {
    /// Moved to another step
    Moved(OnboardingStep),
    /// The current step is incomplete, nothing changed
    Blocked,
    /// `back` on the first step: leave the wizard
    Exit,
    /// The diagnostic was submitted
    Completed(OnboardingProfile),
}

/// The onboarding wizard state
#[derive(Debug, Clone)]
pub struct OnboardingFlow {
    step: OnboardingStep,
    goal: Option<Goal>,
    experience: Option<SkillLevel>,
    time_commitment: Option<TimeCommitment>,
    interests: Vec<String>,
    answers: BTreeMap<String, String>,
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingFlow {
    pub fn new() -> Self {
        Self {
            step: OnboardingStep::Goal,
            goal: None,
            experience: None,
            time_commitment: None,
            interests: Vec::new(),
            answers: BTreeMap::new(),
        }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    /// "Step n of 4"
    pub fn step_label(&self) -> String {
        let shown = (self.step.index() + 1).min(OnboardingStep::TOTAL);
        format!("Step {} of {}", shown, OnboardingStep::TOTAL)
    }

    /// Fraction of the wizard reached, `0.25` on the first step
    pub fn progress(&self) -> f32 {
        let shown = (self.step.index() + 1).min(OnboardingStep::TOTAL);
        shown as f32 / OnboardingStep::TOTAL as f32
    }

    pub fn goal(&self) -> Option<Goal> {
        self.goal
    }

    pub fn experience(&self) -> Option<SkillLevel> {
        self.experience
    }

    pub fn time_commitment(&self) -> Option<TimeCommitment> {
        self.time_commitment
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn answers(&self) -> &BTreeMap<String, String> {
        &self.answers
    }

    pub fn set_goal(&mut self, goal: Goal) {
        self.goal = Some(goal);
    }

    pub fn set_experience(&mut self, experience: SkillLevel) {
        self.experience = Some(experience);
    }

    pub fn set_time_commitment(&mut self, time: TimeCommitment) {
        self.time_commitment = Some(time);
    }

    /// Add or remove an interest. Returns whether it is now selected.
    pub fn toggle_interest(&mut self, interest: &str) -> Result<bool, OnboardingError> {
        if !catalog::INTERESTS.contains(&interest) {
            return Err(OnboardingError::UnknownInterest(interest.to_string()));
        }
        if let Some(pos) = self.interests.iter().position(|i| i == interest) {
            self.interests.remove(pos);
            Ok(false)
        } else {
            self.interests.push(interest.to_string());
            Ok(true)
        }
    }

    /// Record the chosen option for a diagnostic question
    pub fn answer(&mut self, question_id: &str, option: &str) -> Result<(), OnboardingError> {
        let question = catalog::question(question_id)
            .ok_or_else(|| OnboardingError::UnknownQuestion(question_id.to_string()))?;
        if !question.offers(option) {
            return Err(OnboardingError::InvalidOption {
                question: question_id.to_string(),
                option: option.to_string(),
            });
        }
        self.answers.insert(question_id.to_string(), option.to_string());
        Ok(())
    }

    /// Whether the current step has everything it needs
    pub fn is_step_valid(&self) -> bool {
        match self.step {
            OnboardingStep::Goal => self.goal.is_some(),
            OnboardingStep::Experience => self.experience.is_some(),
            OnboardingStep::TimeCommitment => self.time_commitment.is_some(),
            OnboardingStep::Diagnostic => self.answers.len() == DIAGNOSTIC_QUESTIONS.len(),
            OnboardingStep::Complete => false,
        }
    }

    /// Number of diagnostic answers matching the correct option
    pub fn diagnostic_score(&self) -> u8 {
        DIAGNOSTIC_QUESTIONS
            .iter()
            .filter(|q| self.answers.get(q.id).map(String::as_str) == Some(q.correct))
            .count() as u8
    }

    /// Advance, or finish when on the diagnostic step
    pub fn next(&mut self) -> OnboardingTransition {
        if !self.is_step_valid() {
            debug!("Onboarding blocked at {:?}", self.step);
            return OnboardingTransition::Blocked;
        }

        if self.step == OnboardingStep::Diagnostic {
            return match self.build_profile() {
                Some(profile) => {
                    self.step = OnboardingStep::Complete;
                    info!(
                        "Onboarding complete: score {}/{} ({})",
                        profile.diagnostic_score,
                        DIAGNOSTIC_QUESTIONS.len(),
                        profile.calculated_skill_level
                    );
                    OnboardingTransition::Completed(profile)
                }
                None => OnboardingTransition::Blocked,
            };
        }

        self.step = self.step.next();
        OnboardingTransition::Moved(self.step)
    }

    /// Go back one step, or ask to leave the wizard from the first step
    pub fn back(&mut self) -> OnboardingTransition {
        if self.step == OnboardingStep::Complete {
            return OnboardingTransition::Blocked;
        }
        match self.step.previous() {
            Some(step) => {
                self.step = step;
                OnboardingTransition::Moved(step)
            }
            None => OnboardingTransition::Exit,
        }
    }

    /// Undo a completion whose profile could not be kept, so the learner can
    /// submit the diagnostic again
    pub fn reopen_diagnostic(&mut self) {
        if self.step == OnboardingStep::Complete {
            debug!("Reopening diagnostic step");
            self.step = OnboardingStep::Diagnostic;
        }
    }

    fn build_profile(&self) -> Option<OnboardingProfile> {
        let score = self.diagnostic_score();
        Some(OnboardingProfile {
            goal: self.goal?,
            experience: self.experience?,
            time_commitment: self.time_commitment?,
            interests: self.interests.clone(),
            diagnostic_answers: self.answers.clone(),
            calculated_skill_level: SkillLevel::from_score(score),
            diagnostic_score: score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn through_to_diagnostic() -> OnboardingFlow {
        let mut flow = OnboardingFlow::new();
        flow.set_goal(Goal::CareerChange);
        assert_eq!(flow.next(), OnboardingTransition::Moved(OnboardingStep::Experience));
        flow.set_experience(SkillLevel::Beginner);
        assert_eq!(flow.next(), OnboardingTransition::Moved(OnboardingStep::TimeCommitment));
        flow.set_time_commitment(TimeCommitment::TenToTwenty);
        assert_eq!(flow.next(), OnboardingTransition::Moved(OnboardingStep::Diagnostic));
        flow
    }

    fn complete(flow: &mut OnboardingFlow) -> OnboardingProfile {
        match flow.next() {
            OnboardingTransition::Completed(profile) => profile,
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_goal_step_blocks_until_goal_set() {
        let mut flow = OnboardingFlow::new();
        assert!(!flow.is_step_valid());
        assert_eq!(flow.next(), OnboardingTransition::Blocked);
        assert_eq!(flow.step(), OnboardingStep::Goal);

        for goal in Goal::ALL {
            let mut flow = OnboardingFlow::new();
            flow.set_goal(goal);
            assert_eq!(flow.next(), OnboardingTransition::Moved(OnboardingStep::Experience));
        }
    }

    #[test]
    fn test_interests_are_optional() {
        let flow = through_to_diagnostic();
        assert!(flow.interests().is_empty());
        assert_eq!(flow.step(), OnboardingStep::Diagnostic);
    }

    #[test]
    fn test_all_correct_is_advanced() {
        let mut flow = through_to_diagnostic();
        flow.answer("loops", "0, 2, 4").unwrap();
        flow.answer("functions", "To reuse code and organize logic").unwrap();
        flow.answer("variables", "user_name").unwrap();

        let profile = complete(&mut flow);
        assert_eq!(profile.diagnostic_score, 3);
        assert_eq!(profile.calculated_skill_level, SkillLevel::Advanced);
        assert_eq!(flow.step(), OnboardingStep::Complete);
    }

    #[test]
    fn test_none_correct_is_beginner() {
        let mut flow = through_to_diagnostic();
        flow.answer("loops", "Error").unwrap();
        flow.answer("functions", "To store data").unwrap();
        flow.answer("variables", "class").unwrap();

        let profile = complete(&mut flow);
        assert_eq!(profile.diagnostic_score, 0);
        assert_eq!(profile.calculated_skill_level, SkillLevel::Beginner);
    }

    #[test]
    fn test_partial_scores() {
        let mut flow = through_to_diagnostic();
        flow.answer("loops", "0, 2, 4").unwrap();
        flow.answer("functions", "To display output").unwrap();
        flow.answer("variables", "2name").unwrap();
        assert_eq!(flow.diagnostic_score(), 1);

        flow.answer("variables", "user_name").unwrap();
        assert_eq!(flow.diagnostic_score(), 2);
        assert_eq!(complete(&mut flow).calculated_skill_level, SkillLevel::Intermediate);
    }

    #[test]
    fn test_diagnostic_blocks_until_every_question_answered() {
        let mut flow = through_to_diagnostic();
        flow.answer("loops", "0, 2, 4").unwrap();
        flow.answer("functions", "To store data").unwrap();
        assert_eq!(flow.next(), OnboardingTransition::Blocked);
        assert_eq!(flow.step(), OnboardingStep::Diagnostic);
    }

    #[test]
    fn test_invalid_answers_are_rejected() {
        let mut flow = through_to_diagnostic();
        assert_eq!(
            flow.answer("recursion", "yes"),
            Err(OnboardingError::UnknownQuestion("recursion".into()))
        );
        assert!(matches!(
            flow.answer("loops", "0, 2, 4, 6"),
            Err(OnboardingError::InvalidOption { .. })
        ));
        assert!(flow.answers().is_empty());
    }

    #[test]
    fn test_back_walks_to_exit() {
        let mut flow = through_to_diagnostic();
        assert_eq!(flow.back(), OnboardingTransition::Moved(OnboardingStep::TimeCommitment));
        assert_eq!(flow.back(), OnboardingTransition::Moved(OnboardingStep::Experience));
        assert_eq!(flow.back(), OnboardingTransition::Moved(OnboardingStep::Goal));
        assert_eq!(flow.back(), OnboardingTransition::Exit);
        // selections survive navigation
        assert_eq!(flow.goal(), Some(Goal::CareerChange));
    }

    #[test]
    fn test_toggle_interest() {
        let mut flow = OnboardingFlow::new();
        assert_eq!(flow.toggle_interest("DevOps"), Ok(true));
        assert_eq!(flow.toggle_interest("Data Science"), Ok(true));
        assert_eq!(flow.interests(), ["DevOps", "Data Science"]);
        assert_eq!(flow.toggle_interest("DevOps"), Ok(false));
        assert_eq!(flow.interests(), ["Data Science"]);
        assert!(flow.toggle_interest("Knitting").is_err());
    }

    #[test]
    fn test_ids_parse_and_serialize() {
        assert_eq!("personal-projects".parse::<Goal>(), Ok(Goal::PersonalProjects));
        assert_eq!("40-plus-hours".parse::<TimeCommitment>(), Ok(TimeCommitment::FortyPlus));
        assert!("expert".parse::<SkillLevel>().is_err());
        assert_eq!(
            serde_json::to_value(TimeCommitment::FiveToTen).unwrap(),
            serde_json::json!("5-10-hours")
        );
        assert_eq!(
            serde_json::to_value(SkillLevel::SomeExperience).unwrap(),
            serde_json::json!("some-experience")
        );
    }

    #[test]
    fn test_profile_json_shape() {
        let mut flow = through_to_diagnostic();
        flow.toggle_interest("Web Development").unwrap();
        flow.answer("loops", "0, 2, 4").unwrap();
        flow.answer("functions", "To store data").unwrap();
        flow.answer("variables", "user_name").unwrap();
        let profile = complete(&mut flow);

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["goal"], "career-change");
        assert_eq!(json["timeCommitment"], "10-20-hours");
        assert_eq!(json["calculatedSkillLevel"], "intermediate");
        assert_eq!(json["diagnosticScore"], 2);
        assert_eq!(json["diagnosticAnswers"]["variables"], "user_name");

        let back: OnboardingProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_track_label_and_progress() {
        assert_eq!(Goal::CareerChange.track_label(), "CAREER CHANGE Track");
        assert_eq!(Goal::Academic.track_label(), "ACADEMIC Track");
        let flow = OnboardingFlow::new();
        assert_eq!(flow.step_label(), "Step 1 of 4");
        assert!((flow.progress() - 0.25).abs() < f32::EPSILON);
    }
}
