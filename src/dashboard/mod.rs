//! Learner dashboard
//!
//! Shows the stored progress next to the static learning path, and hosts the
//! lesson viewer and the tutor chat as mutually exclusive sub-views.

pub mod catalog;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::app::AppContext;
use crate::lesson::{LessonTransition, LessonViewer, PYTHON_LISTS};
use crate::onboarding::OnboardingProfile;
use crate::store::ProfileStore;
use crate::tutor::TutorChat;
use crate::types::{CurrentUser, UserProgress, DEFAULT_USER_ID};

pub use catalog::{LearningModule, ModuleStatus, ACHIEVEMENTS, ANALYTICS, LEARNING_PATH, RECENT_LESSONS};

/// Rejected progress update. Nothing is changed when one is returned.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("invalid progress patch: {0}")]
    Schema(String),
    #[error("progress patch would break an invariant: {0}")]
    Invariant(&'static str),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("no module with id {0}")]
    UnknownModule(u32),
    #[error("module '{0}' is locked")]
    ModuleLocked(&'static str),
    #[error("no lesson is open")]
    NoActiveLesson,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Partial update of a progress record. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ProgressPatch {
    pub level: Option<u32>,
    pub xp: Option<u32>,
    pub xp_to_next: Option<u32>,
    pub streak: Option<u32>,
    pub completed_lessons: Option<u32>,
    pub certificates: Option<u32>,
    pub current_skills: Option<Vec<String>>,
}

impl ProgressPatch {
    /// Parse a JSON object, rejecting unknown keys and mistyped values
    pub fn from_json(json: &str) -> Result<Self, PatchError> {
        serde_json::from_str(json).map_err(|e| PatchError::Schema(e.to_string()))
    }

    /// Shallow merge over `base`
    pub fn apply(&self, base: &UserProgress) -> UserProgress {
        let mut merged = base.clone();
        if let Some(v) = self.level {
            merged.level = v;
        }
        if let Some(v) = self.xp {
            merged.xp = v;
        }
        if let Some(v) = self.xp_to_next {
            merged.xp_to_next = v;
        }
        if let Some(v) = self.streak {
            merged.streak = v;
        }
        if let Some(v) = self.completed_lessons {
            merged.completed_lessons = v;
        }
        if let Some(v) = self.certificates {
            merged.certificates = v;
        }
        if let Some(v) = &self.current_skills {
            merged.current_skills = v.clone();
        }
        merged
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Path,
    Recent,
    Achievements,
    Analytics,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 4] = [
        DashboardTab::Path,
        DashboardTab::Recent,
        DashboardTab::Achievements,
        DashboardTab::Analytics,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            DashboardTab::Path => "path",
            DashboardTab::Recent => "recent",
            DashboardTab::Achievements => "achievements",
            DashboardTab::Analytics => "analytics",
        }
    }
}

impl std::str::FromStr for DashboardTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DashboardTab::ALL
            .into_iter()
            .find(|tab| tab.id() == s)
            .ok_or_else(|| format!("unknown tab '{}'", s))
    }
}

impl std::fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Which sub-view is on screen
pub enum DashboardView {
    Home,
    Lesson(Box<LessonViewer>),
    Chat(TutorChat),
}

pub struct Dashboard {
    ctx: AppContext,
    user_id: String,
    name: String,
    avatar: Option<String>,
    progress: UserProgress,
    profile: Option<OnboardingProfile>,
    tab: DashboardTab,
    view: DashboardView,
}

impl Dashboard {
    /// Open the dashboard for `user`, or for the anonymous learner
    pub fn new(ctx: AppContext, user: Option<&CurrentUser>, profile: Option<OnboardingProfile>) -> Self {
        let user_id = user.map_or(DEFAULT_USER_ID, |u| u.id.as_str()).to_string();
        let progress = ctx.profiles.load(&user_id);
        info!("Opened dashboard for {} (level {})", user_id, progress.level);
        Self {
            name: user.map_or_else(|| "Learner".to_string(), |u| u.name.clone()),
            avatar: user.and_then(|u| u.avatar.clone()),
            ctx,
            user_id,
            progress,
            profile,
            tab: DashboardTab::default(),
            view: DashboardView::Home,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Letter shown when there is no avatar image
    pub fn avatar_initial(&self) -> char {
        self.name.chars().next().unwrap_or('L')
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn profile(&self) -> Option<&OnboardingProfile> {
        self.profile.as_ref()
    }

    /// e.g. `CAREER CHANGE Track`
    pub fn track_label(&self) -> Option<String> {
        self.profile.as_ref().map(|p| p.goal.track_label())
    }

    pub fn tab(&self) -> DashboardTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: DashboardTab) {
        self.tab = tab;
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn lesson(&self) -> Option<&LessonViewer> {
        match &self.view {
            DashboardView::Lesson(viewer) => Some(&**viewer),
            _ => None,
        }
    }

    pub fn lesson_mut(&mut self) -> Option<&mut LessonViewer> {
        match &mut self.view {
            DashboardView::Lesson(viewer) => Some(&mut **viewer),
            _ => None,
        }
    }

    pub fn chat(&self) -> Option<&TutorChat> {
        match &self.view {
            DashboardView::Chat(chat) => Some(chat),
            _ => None,
        }
    }

    pub fn chat_mut(&mut self) -> Option<&mut TutorChat> {
        match &mut self.view {
            DashboardView::Chat(chat) => Some(chat),
            _ => None,
        }
    }

    fn store(&self) -> &ProfileStore {
        &self.ctx.profiles
    }

    /// Merge a patch into the progress record and write it through
    pub fn update_progress(&mut self, patch: &ProgressPatch) -> Result<&UserProgress, PatchError> {
        let merged = patch.apply(&self.progress);
        if let Some(reason) = merged.violated_invariant() {
            warn!("Rejected progress patch for {}: {}", self.user_id, reason);
            return Err(PatchError::Invariant(reason));
        }
        self.store().save(&self.user_id, &merged)?;
        self.progress = merged;
        Ok(&self.progress)
    }

    /// `update_progress` from a JSON object
    pub fn update_progress_json(&mut self, json: &str) -> Result<&UserProgress, PatchError> {
        let patch = ProgressPatch::from_json(json)?;
        self.update_progress(&patch)
    }

    /// Start the lesson of a learning-path module
    pub fn open_lesson(&mut self, module_id: u32) -> Result<(), DashboardError> {
        let module = catalog::module(module_id).ok_or(DashboardError::UnknownModule(module_id))?;
        if !module.status.is_open() {
            return Err(DashboardError::ModuleLocked(module.title));
        }
        debug!("Opening lesson for module '{}'", module.title);
        self.view = DashboardView::Lesson(Box::new(LessonViewer::new(PYTHON_LISTS, self.ctx.latency.clone())));
        Ok(())
    }

    pub fn open_chat(&mut self) {
        debug!("Opening tutor chat");
        self.view = DashboardView::Chat(TutorChat::new(self.ctx.latency.clone()));
    }

    /// Leave the lesson or chat. Any pending run or reply is dropped.
    pub fn back_to_home(&mut self) {
        self.view = DashboardView::Home;
    }

    /// `next` in the open lesson. Finishing the lesson credits progress and
    /// returns to home.
    pub fn lesson_next(&mut self) -> Result<LessonTransition, DashboardError> {
        let viewer = self.lesson_mut().ok_or(DashboardError::NoActiveLesson)?;
        let transition = viewer.next();
        if transition == LessonTransition::Completed {
            self.credit_lesson()?;
            self.back_to_home();
        }
        Ok(transition)
    }

    fn credit_lesson(&mut self) -> anyhow::Result<()> {
        let mut credited = self.progress.clone();
        credited.completed_lessons = credited.completed_lessons.saturating_add(1);
        let levels = credited.award_xp(self.ctx.config.progress.xp_per_lesson);
        self.store().save(&self.user_id, &credited)?;
        self.progress = credited;
        info!(
            "Lesson completed by {}: {} lessons, level {} (+{})",
            self.user_id, self.progress.completed_lessons, self.progress.level, levels
        );
        Ok(())
    }
}
