//! Static dashboard content: learning path, recent activity, achievements and
//! analytics cards.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    InProgress,
    Completed,
    Locked,
}

impl ModuleStatus {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModuleStatus::Locked)
    }
}

impl std::fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleStatus::InProgress => write!(f, "in-progress"),
            ModuleStatus::Completed => write!(f, "completed"),
            ModuleStatus::Locked => write!(f, "locked"),
        }
    }
}

/// One course on the learning path
#[derive(Debug, Clone, Copy)]
pub struct LearningModule {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    /// Percent complete, 0-100
    pub progress: u8,
    pub lessons: u32,
    pub completed_lessons: u32,
    pub status: ModuleStatus,
    pub difficulty: &'static str,
    pub estimated_time: &'static str,
    pub skills: &'static [&'static str],
}

pub const LEARNING_PATH: &[LearningModule] = &[
    LearningModule {
        id: 1,
        title: "Python Fundamentals",
        description: "Master the basics of Python programming",
        progress: 75,
        lessons: 8,
        completed_lessons: 6,
        status: ModuleStatus::InProgress,
        difficulty: "Beginner",
        estimated_time: "2 weeks",
        skills: &["Variables", "Data Types", "Control Flow"],
    },
    LearningModule {
        id: 2,
        title: "Data Structures",
        description: "Learn about lists, dictionaries, and more",
        progress: 30,
        lessons: 10,
        completed_lessons: 3,
        status: ModuleStatus::InProgress,
        difficulty: "Intermediate",
        estimated_time: "3 weeks",
        skills: &["Lists", "Dictionaries", "Sets"],
    },
    LearningModule {
        id: 3,
        title: "Object-Oriented Programming",
        description: "Master classes, objects, and inheritance",
        progress: 0,
        lessons: 12,
        completed_lessons: 0,
        status: ModuleStatus::Locked,
        difficulty: "Intermediate",
        estimated_time: "4 weeks",
        skills: &["Classes", "Inheritance", "Polymorphism"],
    },
    LearningModule {
        id: 4,
        title: "Web Development with Python",
        description: "Build web applications using Flask",
        progress: 0,
        lessons: 15,
        completed_lessons: 0,
        status: ModuleStatus::Locked,
        difficulty: "Advanced",
        estimated_time: "6 weeks",
        skills: &["Flask", "HTML/CSS", "Databases"],
    },
];

pub fn module(id: u32) -> Option<&'static LearningModule> {
    LEARNING_PATH.iter().find(|m| m.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityStatus {
    Completed,
    InProgress,
    Upcoming,
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityStatus::Completed => write!(f, "completed"),
            ActivityStatus::InProgress => write!(f, "in-progress"),
            ActivityStatus::Upcoming => write!(f, "upcoming"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RecentLesson {
    pub title: &'static str,
    pub kind: &'static str,
    pub duration: &'static str,
    pub status: ActivityStatus,
    pub score: Option<u8>,
}

pub const RECENT_LESSONS: &[RecentLesson] = &[
    RecentLesson {
        title: "Python Variables and Data Types",
        kind: "Interactive Lesson",
        duration: "25 min",
        status: ActivityStatus::Completed,
        score: Some(95),
    },
    RecentLesson {
        title: "Working with Lists",
        kind: "Coding Exercise",
        duration: "30 min",
        status: ActivityStatus::InProgress,
        score: None,
    },
    RecentLesson {
        title: "Functions and Parameters",
        kind: "Project",
        duration: "45 min",
        status: ActivityStatus::Upcoming,
        score: None,
    },
];

#[derive(Debug, Clone, Copy)]
pub struct Achievement {
    pub title: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement { title: "First Steps", description: "Completed first lesson", unlocked: true },
    Achievement { title: "Week Warrior", description: "7 day streak", unlocked: true },
    Achievement { title: "Code Master", description: "Scored 90%+ on 5 lessons", unlocked: true },
    Achievement { title: "Problem Solver", description: "Solved 25 coding challenges", unlocked: false },
];

#[derive(Debug, Clone, Copy)]
pub struct AnalyticsCard {
    pub title: &'static str,
    pub value: &'static str,
    pub note: &'static str,
}

pub const ANALYTICS: &[AnalyticsCard] = &[
    AnalyticsCard { title: "Weekly Progress", value: "+25%", note: "Compared to last week" },
    AnalyticsCard { title: "Study Time", value: "8.5h", note: "This week" },
    AnalyticsCard { title: "Accuracy Rate", value: "87%", note: "Average score" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_lookup() {
        assert_eq!(module(2).map(|m| m.title), Some("Data Structures"));
        assert!(module(99).is_none());
    }

    #[test]
    fn test_locked_modules_are_closed() {
        let open: Vec<u32> = LEARNING_PATH.iter().filter(|m| m.status.is_open()).map(|m| m.id).collect();
        assert_eq!(open, vec![1, 2]);
    }

    #[test]
    fn test_lesson_counts_are_consistent() {
        for m in LEARNING_PATH {
            assert!(m.completed_lessons <= m.lessons, "{}", m.title);
            assert!(m.progress <= 100);
        }
    }
}
