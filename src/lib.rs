//! CodeMentor - local coding tutor library
//!
//! A learner-facing tutor with:
//! - An onboarding questionnaire that scores a short diagnostic
//! - A dashboard with a learning path and persisted XP/level progress
//! - Step-by-step lessons with simulated code runs
//! - A keyword-matched "AI tutor" chat
//!
//! Records live in a local key-value store of JSON documents.
//!
//! # Example
//!
//! ```ignore
//! use codementor::{App, AppContext, Config, Latency, MemoryStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ctx = AppContext::new(Arc::new(MemoryStore::new()), Latency::immediate(), Config::default());
//!     let mut app = App::start(ctx);
//!     app.sign_in("ada@example.com", "secret")?;
//!     println!("{}", app.view_kind());
//!     Ok(())
//! }
//! ```

// Core modules (order matters for cross-module dependencies)
pub mod types;
pub mod config;
pub mod store;
pub mod latency;

// Views
pub mod onboarding;
pub mod lesson;
pub mod tutor;
pub mod dashboard;
pub mod app;

// Front end
pub mod shell;
pub mod cli;

// Re-export commonly used types for convenience
pub use app::{App, AppContext, AppError, AppView, ViewKind};

pub use config::Config;

pub use dashboard::{Dashboard, DashboardError, PatchError, ProgressPatch};

pub use latency::{Latency, Pending};

pub use lesson::{LessonTransition, LessonViewer, PYTHON_LISTS};

pub use onboarding::{OnboardingFlow, OnboardingProfile, OnboardingTransition};

pub use store::{JsonFileStore, KeyValueStore, MemoryStore, ProfileStore, RecordState};

pub use tutor::{reply, TutorChat, TutorReply};

pub use types::{ChatMessage, CurrentUser, UserProgress};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Local coding tutor", NAME, VERSION)
}
