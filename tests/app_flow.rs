//! End-to-end view routing: sign-in, onboarding, dashboard, lessons and demo

use codementor::app::{App, AppContext, ViewKind};
use codementor::lesson::LessonTransition;
use codementor::onboarding::catalog::GOALS;
use codementor::onboarding::{OnboardingTransition, SkillLevel, TimeCommitment, DIAGNOSTIC_QUESTIONS};
use codementor::store::{MemoryStore, ProfileStore, PROFILE_KEY, USER_KEY};
use codementor::{Config, KeyValueStore, Latency, UserProgress};
use std::sync::Arc;

fn context(kv: Arc<MemoryStore>) -> AppContext {
    AppContext::new(kv, Latency::immediate(), Config::default())
}

/// Walk the wizard, answering `correct` questions right
fn finish_onboarding(app: &mut App, correct: usize) -> anyhow::Result<()> {
    let flow = app.onboarding_mut().expect("onboarding view");
    flow.set_goal(GOALS[0].value);
    assert_eq!(app.onboarding_next()?, OnboardingTransition::Moved(codementor::onboarding::OnboardingStep::Experience));

    let flow = app.onboarding_mut().expect("onboarding view");
    flow.set_experience(SkillLevel::Beginner);
    app.onboarding_next()?;

    let flow = app.onboarding_mut().expect("onboarding view");
    flow.set_time_commitment(TimeCommitment::TenToTwenty);
    app.onboarding_next()?;

    let flow = app.onboarding_mut().expect("onboarding view");
    for (i, q) in DIAGNOSTIC_QUESTIONS.iter().enumerate() {
        let option = if i < correct {
            q.correct
        } else {
            q.options.iter().find(|o| **o != q.correct).copied().expect("a wrong option")
        };
        flow.answer(q.id, option)?;
    }
    match app.onboarding_next()? {
        OnboardingTransition::Completed(_) => Ok(()),
        other => panic!("expected completion, got {:?}", other),
    }
}

#[test]
fn test_first_sign_in_goes_through_onboarding() -> anyhow::Result<()> {
    let kv = Arc::new(MemoryStore::new());
    let mut app = App::start(context(kv.clone()));

    assert_eq!(app.sign_in("ada@example.com", "secret")?, ViewKind::Onboarding);
    assert!(kv.get(USER_KEY)?.is_some());

    finish_onboarding(&mut app, 2)?;
    assert_eq!(app.view_kind(), ViewKind::Dashboard);

    let profile = app.profile().expect("profile after onboarding");
    assert_eq!(profile.diagnostic_score, 2);
    assert_eq!(profile.calculated_skill_level, SkillLevel::Intermediate);
    assert!(kv.get(PROFILE_KEY)?.is_some());

    let dashboard = app.dashboard().expect("dashboard");
    assert_eq!(dashboard.display_name(), "ada");
    assert_eq!(dashboard.track_label().as_deref(), Some("CAREER CHANGE Track"));
    Ok(())
}

#[test]
fn test_returning_user_skips_onboarding() -> anyhow::Result<()> {
    let kv = Arc::new(MemoryStore::new());
    {
        let mut app = App::start(context(kv.clone()));
        app.sign_in("ada@example.com", "secret")?;
        finish_onboarding(&mut app, 3)?;
    }

    let mut app = App::start(context(kv.clone()));
    assert!(app.is_signed_in());
    assert_eq!(app.view_kind(), ViewKind::Landing);
    assert_eq!(app.get_started(), ViewKind::Dashboard);

    app.back()?;
    assert_eq!(app.sign_in("ada@example.com", "secret")?, ViewKind::Dashboard);
    Ok(())
}

#[test]
fn test_user_without_profile_is_not_restored() -> anyhow::Result<()> {
    let kv = Arc::new(MemoryStore::new());
    App::start(context(kv.clone())).sign_in("ada@example.com", "secret")?;

    let app = App::start(context(kv));
    assert!(!app.is_signed_in());
    assert!(app.profile().is_none());
    Ok(())
}

#[test]
fn test_sign_out_clears_session_but_keeps_progress() -> anyhow::Result<()> {
    let kv = Arc::new(MemoryStore::new());
    let mut app = App::start(context(kv.clone()));
    app.sign_in("ada@example.com", "secret")?;
    finish_onboarding(&mut app, 1)?;
    let user_id = app.user().expect("signed in").id.clone();
    app.dashboard_mut()
        .expect("dashboard")
        .update_progress_json(r#"{"streak": 4}"#)?;

    app.sign_out()?;
    assert_eq!(app.view_kind(), ViewKind::Landing);
    assert!(kv.get(USER_KEY)?.is_none());
    assert!(kv.get(PROFILE_KEY)?.is_none());

    let progress = ProfileStore::new(kv).load(&user_id);
    assert_eq!(progress.streak, 4);
    Ok(())
}

#[test]
fn test_anonymous_onboarding_uses_default_progress() -> anyhow::Result<()> {
    let kv = Arc::new(MemoryStore::new());
    let profiles = ProfileStore::new(kv.clone());
    profiles.save("default", &UserProgress { level: 5, ..Default::default() })?;

    let mut app = App::start(context(kv));
    assert_eq!(app.get_started(), ViewKind::Onboarding);
    finish_onboarding(&mut app, 0)?;

    let dashboard = app.dashboard().expect("dashboard");
    assert_eq!(dashboard.display_name(), "Learner");
    assert_eq!(dashboard.progress().level, 5);
    Ok(())
}

#[tokio::test]
async fn test_demo_lesson_gives_no_credit() -> anyhow::Result<()> {
    let kv = Arc::new(MemoryStore::new());
    let mut app = App::start(context(kv.clone()));
    app.try_demo()?;
    assert_eq!(app.view_kind(), ViewKind::Lesson);

    loop {
        let viewer = app.demo_mut().expect("demo lesson");
        if let Some(solution) = viewer.current_step().solution {
            viewer.set_code(solution);
            assert!(viewer.run());
            viewer.settle().await;
        }
        if app.lesson_next()? == LessonTransition::Completed {
            break;
        }
    }

    assert_eq!(app.view_kind(), ViewKind::Landing);
    assert!(kv.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_dashboard_lesson_and_chat_views() -> anyhow::Result<()> {
    let kv = Arc::new(MemoryStore::new());
    let mut app = App::start(context(kv));
    app.sign_in("ada@example.com", "secret")?;
    finish_onboarding(&mut app, 3)?;

    let dashboard = app.dashboard_mut().expect("dashboard");
    dashboard.open_chat();
    assert_eq!(app.view_kind(), ViewKind::Chat);

    let chat = app.dashboard_mut().and_then(|d| d.chat_mut()).expect("chat");
    assert!(chat.send("Can you give me a practice exercise?"));
    chat.settle().await;
    assert_eq!(chat.messages().len(), 3);

    assert_eq!(app.back()?, ViewKind::Dashboard);
    app.dashboard_mut().expect("dashboard").open_lesson(1)?;
    assert_eq!(app.view_kind(), ViewKind::Lesson);
    assert_eq!(app.lesson_next()?, LessonTransition::Moved(1));
    assert_eq!(app.lesson_next()?, LessonTransition::Blocked);

    assert_eq!(app.back()?, ViewKind::Dashboard);
    assert_eq!(app.back()?, ViewKind::Landing);
    Ok(())
}
