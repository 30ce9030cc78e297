//! Application state
//!
//! `App` holds the single active top-level view together with the signed-in
//! user and the onboarding profile. Everything the views need from the outside
//! world (storage, latency, settings) travels in an `AppContext`.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::dashboard::{Dashboard, DashboardError, DashboardView};
use crate::latency::Latency;
use crate::lesson::{LessonTransition, LessonViewer, PYTHON_LISTS};
use crate::onboarding::{OnboardingFlow, OnboardingProfile, OnboardingTransition};
use crate::store::{KeyValueStore, ProfileStore};
use crate::types::CurrentUser;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("email and password are required")]
    InvalidCredentials,
    #[error("not available from the {actual} view (needs {expected})")]
    WrongView { expected: ViewKind, actual: ViewKind },
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Collaborators shared by every view
#[derive(Clone)]
pub struct AppContext {
    pub profiles: ProfileStore,
    pub latency: Latency,
    pub config: Config,
}

impl AppContext {
    pub fn new(kv: Arc<dyn KeyValueStore>, latency: Latency, config: Config) -> Self {
        Self {
            profiles: ProfileStore::new(kv),
            latency,
            config,
        }
    }
}

/// The screen the learner currently sees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Landing,
    Onboarding,
    Dashboard,
    Lesson,
    Chat,
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Landing => write!(f, "landing"),
            ViewKind::Onboarding => write!(f, "onboarding"),
            ViewKind::Dashboard => write!(f, "dashboard"),
            ViewKind::Lesson => write!(f, "lesson"),
            ViewKind::Chat => write!(f, "chat"),
        }
    }
}

pub enum AppView {
    Landing,
    Onboarding(OnboardingFlow),
    Dashboard(Box<Dashboard>),
    /// The lesson opened from "Try Demo", outside any dashboard
    Demo(Box<LessonViewer>),
}

pub struct App {
    ctx: AppContext,
    user: Option<CurrentUser>,
    profile: Option<OnboardingProfile>,
    view: AppView,
}

impl App {
    /// Start on the landing view, restoring a previous session when both the
    /// user and the profile are stored
    pub fn start(ctx: AppContext) -> Self {
        let (user, profile) = match (ctx.profiles.load_user(), ctx.profiles.load_profile()) {
            (Some(user), Some(profile)) => {
                info!("Restored session for {}", user.email);
                (Some(user), Some(profile))
            }
            _ => (None, None),
        };
        Self {
            ctx,
            user,
            profile,
            view: AppView::Landing,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn profile(&self) -> Option<&OnboardingProfile> {
        self.profile.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn view(&self) -> &AppView {
        &self.view
    }

    pub fn view_kind(&self) -> ViewKind {
        match &self.view {
            AppView::Landing => ViewKind::Landing,
            AppView::Onboarding(_) => ViewKind::Onboarding,
            AppView::Demo(_) => ViewKind::Lesson,
            AppView::Dashboard(dashboard) => match dashboard.view() {
                DashboardView::Home => ViewKind::Dashboard,
                DashboardView::Lesson(_) => ViewKind::Lesson,
                DashboardView::Chat(_) => ViewKind::Chat,
            },
        }
    }

    pub fn onboarding_mut(&mut self) -> Option<&mut OnboardingFlow> {
        match &mut self.view {
            AppView::Onboarding(flow) => Some(flow),
            _ => None,
        }
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.view {
            AppView::Dashboard(dashboard) => Some(&**dashboard),
            _ => None,
        }
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut Dashboard> {
        match &mut self.view {
            AppView::Dashboard(dashboard) => Some(&mut **dashboard),
            _ => None,
        }
    }

    pub fn demo_mut(&mut self) -> Option<&mut LessonViewer> {
        match &mut self.view {
            AppView::Demo(viewer) => Some(&mut **viewer),
            _ => None,
        }
    }

    /// Mock sign-in: any non-empty email and password are accepted
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<ViewKind, AppError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::InvalidCredentials);
        }
        let user = CurrentUser::from_email(email);
        self.ctx.profiles.save_user(&user)?;
        info!("Signed in as {} ({})", user.email, user.id);
        self.user = Some(user);
        self.profile = self.ctx.profiles.load_profile();

        if self.profile.is_some() {
            self.open_dashboard();
        } else {
            self.view = AppView::Onboarding(OnboardingFlow::new());
        }
        Ok(self.view_kind())
    }

    /// Sign out. The in-memory session ends even when clearing storage fails.
    pub fn sign_out(&mut self) -> Result<(), AppError> {
        if let Some(user) = self.user.take() {
            info!("Signed out {}", user.email);
        }
        self.profile = None;
        self.view = AppView::Landing;
        self.ctx.profiles.clear_session()?;
        Ok(())
    }

    /// "Get Started": the dashboard for a signed-in learner, onboarding otherwise
    pub fn get_started(&mut self) -> ViewKind {
        if self.is_signed_in() {
            self.open_dashboard();
        } else {
            self.view = AppView::Onboarding(OnboardingFlow::new());
        }
        self.view_kind()
    }

    /// Open the sample lesson from the landing view
    pub fn try_demo(&mut self) -> Result<(), AppError> {
        self.expect_view(ViewKind::Landing)?;
        debug!("Starting demo lesson");
        self.view = AppView::Demo(Box::new(LessonViewer::new(PYTHON_LISTS, self.ctx.latency.clone())));
        Ok(())
    }

    /// `next` in the onboarding wizard, routing its exit and completion
    pub fn onboarding_next(&mut self) -> Result<OnboardingTransition, AppError> {
        let actual = self.view_kind();
        let flow = self.onboarding_mut().ok_or(AppError::WrongView {
            expected: ViewKind::Onboarding,
            actual,
        })?;
        let transition = flow.next();
        self.route_onboarding(&transition)?;
        Ok(transition)
    }

    pub fn onboarding_back(&mut self) -> Result<OnboardingTransition, AppError> {
        let actual = self.view_kind();
        let flow = self.onboarding_mut().ok_or(AppError::WrongView {
            expected: ViewKind::Onboarding,
            actual,
        })?;
        let transition = flow.back();
        self.route_onboarding(&transition)?;
        Ok(transition)
    }

    /// `next` in whichever lesson is open: the demo or the dashboard's
    pub fn lesson_next(&mut self) -> Result<LessonTransition, AppError> {
        let actual = self.view_kind();
        match &mut self.view {
            AppView::Demo(viewer) => {
                let transition = viewer.next();
                if transition == LessonTransition::Completed {
                    info!("Demo lesson finished");
                    self.view = AppView::Landing;
                }
                Ok(transition)
            }
            AppView::Dashboard(dashboard) if dashboard.lesson().is_some() => Ok(dashboard.lesson_next()?),
            _ => Err(AppError::WrongView {
                expected: ViewKind::Lesson,
                actual,
            }),
        }
    }

    /// Leave the current view: lesson and chat go back to the dashboard home,
    /// the dashboard and the demo go back to landing, onboarding steps back.
    pub fn back(&mut self) -> Result<ViewKind, AppError> {
        match &mut self.view {
            AppView::Landing => {}
            AppView::Onboarding(_) => {
                self.onboarding_back()?;
            }
            AppView::Demo(_) => self.view = AppView::Landing,
            AppView::Dashboard(dashboard) => {
                if matches!(dashboard.view(), DashboardView::Home) {
                    self.view = AppView::Landing;
                } else {
                    dashboard.back_to_home();
                }
            }
        }
        Ok(self.view_kind())
    }

    fn route_onboarding(&mut self, transition: &OnboardingTransition) -> Result<(), AppError> {
        match transition {
            OnboardingTransition::Completed(profile) => {
                if let Err(e) = self.ctx.profiles.save_profile(profile) {
                    warn!("Could not save onboarding profile: {:#}", e);
                    if let Some(flow) = self.onboarding_mut() {
                        flow.reopen_diagnostic();
                    }
                    return Err(e.into());
                }
                self.profile = Some(profile.clone());
                self.open_dashboard();
            }
            OnboardingTransition::Exit => self.view = AppView::Landing,
            OnboardingTransition::Moved(_) | OnboardingTransition::Blocked => {}
        }
        Ok(())
    }

    fn open_dashboard(&mut self) {
        let dashboard = Dashboard::new(self.ctx.clone(), self.user.as_ref(), self.profile.clone());
        self.view = AppView::Dashboard(Box::new(dashboard));
    }

    fn expect_view(&self, expected: ViewKind) -> Result<(), AppError> {
        let actual = self.view_kind();
        if actual == expected {
            Ok(())
        } else {
            Err(AppError::WrongView { expected, actual })
        }
    }
}
