//! Interactive terminal front end
//!
//! Renders the active view and maps slash commands onto the `App` state
//! machines. In the tutor chat, plain text is sent to the tutor.

use anyhow::Result;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::Helper;
use tracing::debug;

use crate::app::{App, AppView, ViewKind};
use crate::dashboard::{Dashboard, DashboardTab, ACHIEVEMENTS, ANALYTICS, LEARNING_PATH, RECENT_LESSONS};
use crate::lesson::{LessonTransition, LessonViewer, StepKind};
use crate::onboarding::catalog::{Choice, EXPERIENCE_LEVELS, GOALS, INTERESTS, TIME_COMMITMENTS};
use crate::onboarding::{OnboardingFlow, OnboardingStep, OnboardingTransition, DIAGNOSTIC_QUESTIONS};
use crate::tutor::{TutorChat, QUICK_PROMPTS};
use crate::types::ChatMessage;

const COMMANDS: &[(&str, &str)] = &[
    ("/help", "Show commands for the current view"),
    ("/show", "Redraw the current view"),
    ("/back", "Leave the current view"),
    ("/quit", "Exit"),
    ("/signin", "<email> <password>  Sign in"),
    ("/signout", "Sign out and forget the profile"),
    ("/start", "Get started"),
    ("/demo", "Try the demo lesson"),
    ("/goal", "<n>  Pick a goal"),
    ("/experience", "<n>  Pick an experience level"),
    ("/time", "<n>  Pick a weekly time commitment"),
    ("/interest", "<n>  Toggle an interest"),
    ("/answer", "<question> <n>  Answer a diagnostic question"),
    ("/next", "Continue"),
    ("/tab", "<path|recent|achievements|analytics>  Switch dashboard tab"),
    ("/open", "<module>  Open a learning-path module"),
    ("/chat", "Open the AI tutor"),
    ("/patch", "<json>  Update stored progress"),
    ("/code", "Enter code, finish with /end"),
    ("/solution", "Load the solution into the editor"),
    ("/run", "Run the editor contents"),
    ("/hint", "Show or hide the hint"),
    ("/prev", "Previous step"),
    ("/prompt", "<n>  Put a quick prompt in the input line"),
];

/// Completion and hints for slash commands
struct ShellHelper;

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let partial = &line[..pos];
        if !partial.starts_with('/') || partial.contains(' ') {
            return Ok((pos, Vec::new()));
        }
        let matches = COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(partial))
            .map(|(cmd, _)| Pair {
                display: cmd.to_string(),
                replacement: cmd[partial.len()..].to_string(),
            })
            .collect();
        Ok((pos, matches))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if !line.starts_with('/') || pos < line.len() {
            return None;
        }
        COMMANDS
            .iter()
            .find(|(cmd, _)| cmd.starts_with(line) && *cmd != line)
            .map(|(cmd, _)| cmd[line.len()..].to_string())
    }
}

impl Validator for ShellHelper {
    fn validate(&self, _ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

impl Highlighter for ShellHelper {}

impl Helper for ShellHelper {}

/// What the loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A parsed input line
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Command { name: &'a str, args: &'a str },
    Text(&'a str),
    Empty,
}

pub fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    match line.strip_prefix('/') {
        Some(rest) => {
            let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Input::Command { name, args: args.trim() }
        }
        None => Input::Text(line),
    }
}

/// Pick a catalog entry by 1-based position
fn pick<T: Copy + 'static>(choices: &[Choice<T>], arg: &str) -> Option<T> {
    let n: usize = arg.parse().ok()?;
    choices.get(n.checked_sub(1)?).map(|c| c.value)
}

pub struct Shell {
    app: App,
    /// Code being typed after `/code`
    editing: Option<String>,
    /// Text placed in the next input line by `/prompt`
    prefill: Option<String>,
}

impl Shell {
    pub fn new(app: App) -> Self {
        Self { app, editing: None, prefill: None }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Take the text to pre-fill the next input line with
    pub fn take_prefill(&mut self) -> Option<String> {
        self.prefill.take()
    }

    /// Handle one input line
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        if let Some(buffer) = self.editing.as_mut() {
            if line.trim() == "/end" {
                let code = self.editing.take().unwrap_or_default();
                if let Some(viewer) = self.lesson_mut() {
                    viewer.set_code(code);
                    println!("Editor updated.");
                }
            } else {
                buffer.push_str(line);
                buffer.push('\n');
            }
            return Ok(Flow::Continue);
        }

        match parse_input(line) {
            Input::Empty => Ok(Flow::Continue),
            Input::Text(text) => {
                self.send_chat(text).await;
                Ok(Flow::Continue)
            }
            Input::Command { name, args } => self.command(name, args).await,
        }
    }

    async fn command(&mut self, name: &str, args: &str) -> Result<Flow> {
        debug!("Shell command /{} in {}", name, self.app.view_kind());
        match name {
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" | "?" => print_help(self.app.view_kind()),
            "show" => self.render(),
            "back" => {
                self.app.back()?;
                self.render();
            }
            "signin" => {
                let mut parts = args.split_whitespace();
                let email = parts.next().unwrap_or_default();
                let password = parts.next().unwrap_or_default();
                match self.app.sign_in(email, password) {
                    Ok(_) => self.render(),
                    Err(e) => print_error(&e.to_string()),
                }
            }
            "signout" => {
                self.app.sign_out()?;
                println!("Signed out.");
                self.render();
            }
            "start" => {
                self.app.get_started();
                self.render();
            }
            "demo" => match self.app.try_demo() {
                Ok(()) => self.render(),
                Err(e) => print_error(&e.to_string()),
            },
            "goal" | "experience" | "time" | "interest" | "answer" => self.onboarding_choice(name, args),
            "next" => self.next()?,
            "tab" => {
                let result = match (self.app.dashboard_mut(), args.parse::<DashboardTab>()) {
                    (Some(dashboard), Ok(tab)) => {
                        dashboard.set_tab(tab);
                        Ok(())
                    }
                    (Some(_), Err(e)) => Err(e),
                    (None, _) => Err("Tabs are only available on the dashboard".to_string()),
                };
                match result {
                    Ok(()) => self.render(),
                    Err(e) => print_error(&e),
                }
            }
            "open" => {
                let result = match (self.app.dashboard_mut(), args.parse::<u32>()) {
                    (Some(dashboard), Ok(id)) => dashboard.open_lesson(id).map_err(|e| e.to_string()),
                    (Some(_), Err(_)) => Err(format!("'{}' is not a module number", args)),
                    (None, _) => Err("Modules open from the dashboard".to_string()),
                };
                match result {
                    Ok(()) => self.render(),
                    Err(e) => print_error(&e),
                }
            }
            "chat" => match self.app.dashboard_mut() {
                Some(dashboard) => {
                    dashboard.open_chat();
                    self.render();
                }
                None => print_error("The tutor is available from the dashboard"),
            },
            "patch" => match self.app.dashboard_mut() {
                Some(dashboard) => match dashboard.update_progress_json(args) {
                    Ok(progress) => println!("Progress updated: level {}, {} XP", progress.level, progress.xp),
                    Err(e) => print_error(&e.to_string()),
                },
                None => print_error("Progress can only be updated from the dashboard"),
            },
            "code" | "solution" | "run" | "hint" | "prev" => self.lesson_command(name).await,
            "prompt" => self.quick_prompt(args),
            other => print_error(&format!("Unknown command '/{}'. Type /help", other)),
        }
        Ok(Flow::Continue)
    }

    fn onboarding_choice(&mut self, name: &str, args: &str) {
        let Some(flow) = self.app.onboarding_mut() else {
            print_error("Only available during onboarding");
            return;
        };
        let result = match name {
            "goal" => pick(GOALS, args).map(|g| flow.set_goal(g)).ok_or("pick a goal 1-4".to_string()),
            "experience" => pick(EXPERIENCE_LEVELS, args)
                .map(|e| flow.set_experience(e))
                .ok_or("pick a level 1-4".to_string()),
            "time" => pick(TIME_COMMITMENTS, args)
                .map(|t| flow.set_time_commitment(t))
                .ok_or("pick a time commitment 1-4".to_string()),
            "interest" => {
                let interest = args
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| INTERESTS.get(n.wrapping_sub(1)).copied())
                    .unwrap_or(args);
                flow.toggle_interest(interest).map(|_| ()).map_err(|e| e.to_string())
            }
            _ => {
                let (question, option) = args.split_once(' ').unwrap_or((args, ""));
                let option = DIAGNOSTIC_QUESTIONS
                    .iter()
                    .find(|q| q.id == question)
                    .zip(option.trim().parse::<usize>().ok())
                    .and_then(|(q, n)| q.options.get(n.wrapping_sub(1)).copied())
                    .unwrap_or(option);
                flow.answer(question, option).map_err(|e| e.to_string())
            }
        };
        match result {
            Ok(()) => self.render(),
            Err(e) => print_error(&e),
        }
    }

    fn next(&mut self) -> Result<()> {
        match self.app.view_kind() {
            ViewKind::Onboarding => match self.app.onboarding_next()? {
                OnboardingTransition::Blocked => print_error("Complete this step first"),
                OnboardingTransition::Completed(profile) => {
                    println!(
                        "Assessment complete: {}/{} correct, starting as {}.",
                        profile.diagnostic_score,
                        DIAGNOSTIC_QUESTIONS.len(),
                        profile.calculated_skill_level
                    );
                    self.render();
                }
                _ => self.render(),
            },
            ViewKind::Lesson => {
                let from_dashboard = self.app.dashboard().is_some();
                match self.app.lesson_next()? {
                    LessonTransition::Blocked => print_error("Run code that produces the expected output first"),
                    LessonTransition::Completed if from_dashboard => {
                        println!("\x1b[32mLesson complete!\x1b[0m Progress saved.");
                        self.render();
                    }
                    LessonTransition::Completed => {
                        println!("\x1b[32mDemo complete!\x1b[0m Sign in to keep your progress.");
                        self.render();
                    }
                    LessonTransition::Moved(_) => self.render(),
                }
            }
            _ => print_error("Nothing to continue"),
        }
        Ok(())
    }

    fn lesson_mut(&mut self) -> Option<&mut LessonViewer> {
        if self.app.demo_mut().is_some() {
            return self.app.demo_mut();
        }
        self.app.dashboard_mut().and_then(Dashboard::lesson_mut)
    }

    async fn lesson_command(&mut self, name: &str) {
        let Some(viewer) = self.lesson_mut() else {
            print_error("No lesson is open");
            return;
        };
        match name {
            "code" => {
                self.editing = Some(String::new());
                println!("Type your code. Finish with /end on its own line.");
            }
            "solution" => match viewer.current_step().solution {
                Some(solution) => {
                    viewer.set_code(solution);
                    print_code(viewer.code());
                }
                None => print_error("This step has no solution"),
            },
            "hint" => {
                let visible = viewer.toggle_hint();
                match viewer.current_step().hint {
                    Some(hint) if visible => println!("💡 {}", hint),
                    Some(_) => println!("Hint hidden."),
                    None => print_error("This step has no hint"),
                }
            }
            "prev" => {
                if viewer.previous() {
                    render_lesson(viewer);
                } else {
                    print_error("Already on the first step");
                }
            }
            _ => {
                if !viewer.run() {
                    print_error("Nothing to run here");
                    return;
                }
                println!("\x1b[90mRunning...\x1b[0m");
                let output = viewer.settle().await.to_string();
                println!("Output:\n{}", output);
                if viewer.is_solved() {
                    println!("\x1b[32m✓ Correct! Well done!\x1b[0m");
                }
            }
        }
    }

    fn chat_mut(&mut self) -> Option<&mut TutorChat> {
        self.app.dashboard_mut().and_then(Dashboard::chat_mut)
    }

    async fn send_chat(&mut self, text: &str) {
        let Some(chat) = self.chat_mut() else {
            print_error("Commands start with '/'. Type /help");
            return;
        };
        if !chat.send(text) {
            return;
        }
        settle_chat(chat).await;
    }

    fn quick_prompt(&mut self, args: &str) {
        let Some(chat) = self.chat_mut() else {
            print_error("Quick prompts are available in the tutor chat");
            return;
        };
        let text = args
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| chat.quick_prompt(i));
        match text {
            Some(text) => {
                self.prefill = Some(text.to_string());
                println!("Edit the question and press Enter to send it.");
            }
            None => print_error(&format!("Pick a prompt 1-{}", QUICK_PROMPTS.len())),
        }
    }

    pub fn render(&self) {
        println!();
        match self.app.view() {
            AppView::Landing => render_landing(&self.app),
            AppView::Onboarding(flow) => render_onboarding(flow),
            AppView::Demo(viewer) => render_lesson(viewer),
            AppView::Dashboard(dashboard) => {
                if let Some(viewer) = dashboard.lesson() {
                    render_lesson(viewer);
                } else if let Some(chat) = dashboard.chat() {
                    render_chat(chat);
                } else {
                    render_dashboard(dashboard);
                }
            }
        }
    }

    fn prompt(&self) -> String {
        if self.is_editing() {
            return "\x1b[90m...\x1b[0m ".to_string();
        }
        format!("\x1b[32m{} ❯\x1b[0m ", self.app.view_kind())
    }
}

async fn settle_chat(chat: &mut TutorChat) {
    println!("\x1b[90mTutor is typing...\x1b[0m");
    if let Some(reply) = chat.settle().await {
        print_message(reply);
    }
}

fn print_error(message: &str) {
    println!("\x1b[31m{}\x1b[0m", message);
}

fn print_code(code: &str) {
    for line in code.lines() {
        println!("  \x1b[36m{}\x1b[0m", line);
    }
}

fn print_message(message: &ChatMessage) {
    println!(
        "\x1b[1m{}\x1b[0m [{}] ({})\n{}\n",
        message.sender,
        message.timestamp.format("%H:%M"),
        message.kind,
        message.content
    );
}

fn print_help(view: ViewKind) {
    let relevant: &[&str] = match view {
        ViewKind::Landing => &["/signin", "/start", "/demo", "/signout"],
        ViewKind::Onboarding => &["/goal", "/experience", "/time", "/interest", "/answer", "/next"],
        ViewKind::Dashboard => &["/tab", "/open", "/chat", "/patch", "/signout"],
        ViewKind::Lesson => &["/code", "/run", "/hint", "/solution", "/next", "/prev"],
        ViewKind::Chat => &["/prompt"],
    };
    println!("\x1b[1mCommands ({})\x1b[0m", view);
    for (cmd, desc) in COMMANDS.iter().filter(|(cmd, _)| relevant.contains(cmd)) {
        println!("  \x1b[36m{:<12}\x1b[0m {}", cmd, desc);
    }
    for (cmd, desc) in &COMMANDS[..4] {
        println!("  \x1b[36m{:<12}\x1b[0m {}", cmd, desc);
    }
    if view == ViewKind::Chat {
        println!("  Anything else is sent to the tutor.");
    }
}

fn render_landing(app: &App) {
    println!("\x1b[1mCodeMentor AI\x1b[0m - learn to code with a personal AI tutor");
    match app.user() {
        Some(user) => println!("Welcome back, {}! /start to continue learning.", user.name),
        None => println!("/signin <email> <password>, /start to begin, or /demo to try a lesson."),
    }
}

fn render_choices<T: Copy + PartialEq + 'static>(choices: &[Choice<T>], selected: Option<T>) {
    for (i, choice) in choices.iter().enumerate() {
        let mark = if Some(choice.value) == selected { "●" } else { "○" };
        println!("  {} {}. {} - {}", mark, i + 1, choice.label, choice.description);
    }
}

fn render_onboarding(flow: &OnboardingFlow) {
    println!("\x1b[1m{}\x1b[0m  ({}, {:.0}%)", flow.step().title(), flow.step_label(), flow.progress() * 100.0);
    match flow.step() {
        OnboardingStep::Goal => render_choices(GOALS, flow.goal()),
        OnboardingStep::Experience => render_choices(EXPERIENCE_LEVELS, flow.experience()),
        OnboardingStep::TimeCommitment => {
            render_choices(TIME_COMMITMENTS, flow.time_commitment());
            println!("  Interests (optional, /interest <n>):");
            for (i, interest) in INTERESTS.iter().enumerate() {
                let mark = if flow.interests().iter().any(|s| s == interest) { "☑" } else { "☐" };
                println!("    {} {}. {}", mark, i + 1, interest);
            }
        }
        OnboardingStep::Diagnostic => {
            for q in DIAGNOSTIC_QUESTIONS {
                println!("  [{}] {}", q.id, q.question);
                if let Some(code) = q.code {
                    print_code(code);
                }
                for (i, option) in q.options.iter().enumerate() {
                    let chosen = flow.answers().get(q.id).is_some_and(|a| a == option);
                    println!("    {} {}. {}", if chosen { "●" } else { "○" }, i + 1, option);
                }
            }
        }
        OnboardingStep::Complete => println!("  All set."),
    }
}

fn render_dashboard(dashboard: &Dashboard) {
    let progress = dashboard.progress();
    println!(
        "\x1b[1m[{}] {}\x1b[0m  Level {}  {} XP  ({} to next level, {:.0}%)",
        dashboard.avatar_initial(),
        dashboard.display_name(),
        progress.level,
        progress.xp,
        progress.xp_remaining(),
        progress.level_fraction() * 100.0
    );
    println!(
        "Streak {} days  |  {} lessons completed  |  {} certificates",
        progress.streak, progress.completed_lessons, progress.certificates
    );
    if let Some(track) = dashboard.track_label() {
        println!("\x1b[35m{}\x1b[0m", track);
    }
    let tabs: Vec<String> = DashboardTab::ALL
        .iter()
        .map(|t| if *t == dashboard.tab() { format!("[{}]", t) } else { t.to_string() })
        .collect();
    println!("{}\n", tabs.join("  "));

    match dashboard.tab() {
        DashboardTab::Path => {
            for m in LEARNING_PATH {
                println!(
                    "  {}. {} ({}, {}, {})  {}%  {}/{} lessons",
                    m.id, m.title, m.status, m.difficulty, m.estimated_time, m.progress, m.completed_lessons, m.lessons
                );
                println!("     {}  [{}]", m.description, m.skills.join(", "));
            }
        }
        DashboardTab::Recent => {
            for lesson in RECENT_LESSONS {
                let score = lesson.score.map(|s| format!("  {}%", s)).unwrap_or_default();
                println!("  {} - {} ({}, {}){}", lesson.title, lesson.kind, lesson.duration, lesson.status, score);
            }
        }
        DashboardTab::Achievements => {
            for a in ACHIEVEMENTS {
                println!("  {} {} - {}", if a.unlocked { "🏆" } else { "🔒" }, a.title, a.description);
            }
        }
        DashboardTab::Analytics => {
            for card in ANALYTICS {
                println!("  {}: {} ({})", card.title, card.value, card.note);
            }
        }
    }
}

fn render_lesson(viewer: &LessonViewer) {
    let lesson = viewer.lesson();
    let step = viewer.current_step();
    println!(
        "\x1b[1m{}\x1b[0m  ({}, {})  step {}/{}",
        lesson.title,
        lesson.difficulty,
        lesson.estimated_time,
        viewer.position() + 1,
        lesson.steps.len()
    );
    println!("\x1b[1m{}: {}\x1b[0m\n\n{}\n", step.kind, step.title, step.content);
    if step.kind == StepKind::Practice {
        if let Some(expected) = step.expected_output {
            println!("Expected output:");
            print_code(expected);
        }
        println!("Editor:");
        print_code(viewer.code());
        if !viewer.output().is_empty() {
            println!("Output:\n{}", viewer.output());
        }
    }
}

fn render_chat(chat: &TutorChat) {
    println!("\x1b[1mAI Tutor\x1b[0m");
    for message in chat.messages() {
        print_message(message);
    }
    for (i, quick) in QUICK_PROMPTS.iter().enumerate() {
        println!("  /prompt {}  {}", i + 1, quick.label);
    }
}

/// Run the interactive loop until /quit or end of input
pub async fn run(app: App) -> Result<()> {
    let config = rustyline::Config::builder()
        .completion_type(rustyline::CompletionType::List)
        .edit_mode(rustyline::EditMode::Emacs)
        .auto_add_history(true)
        .build();
    let mut rl = rustyline::Editor::<ShellHelper, rustyline::history::DefaultHistory>::with_config(config)?;
    rl.set_helper(Some(ShellHelper));

    let mut shell = Shell::new(app);
    shell.render();
    println!("Type /help for commands.");

    loop {
        let prompt = shell.prompt();
        let read = match shell.take_prefill() {
            Some(text) => rl.readline_with_initial(&prompt, (&text, "")),
            None => rl.readline(&prompt),
        };
        match read {
            Ok(line) => match shell.handle_line(&line).await {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => print_error(&format!("Error: {:#}", e)),
            },
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(err) => {
                print_error(&format!("Error: {}", err));
                break;
            }
        }
    }
    println!("Happy coding!");
    Ok(())
}
