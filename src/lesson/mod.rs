//! Lessons and the lesson viewer
//!
//! A lesson is a fixed list of theory and practice steps. Practice steps carry
//! a recipe: the snippets a learner's code must contain and the output that
//! "running" it produces. Nothing is actually executed.

pub mod viewer;

pub use viewer::{LessonTransition, LessonViewer};

/// Output shown when a run does not match the step's recipe
pub const PLACEHOLDER_OUTPUT: &str = "# Enter your code above and click Run";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Theory,
    Practice,
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepKind::Theory => write!(f, "Theory"),
            StepKind::Practice => write!(f, "Practice"),
        }
    }
}

/// Required snippets and the canned output they unlock
#[derive(Debug, Clone, Copy)]
pub struct RunRecipe {
    pub required: &'static [&'static str],
    pub output: &'static str,
}

impl RunRecipe {
    pub fn matches(&self, code: &str) -> bool {
        self.required.iter().all(|snippet| code.contains(snippet))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub kind: StepKind,
    pub title: &'static str,
    pub content: &'static str,
    pub starter_code: Option<&'static str>,
    pub expected_output: Option<&'static str>,
    pub hint: Option<&'static str>,
    pub solution: Option<&'static str>,
    pub recipe: Option<RunRecipe>,
}

impl Step {
    /// Simulated execution of `code` on this step. `None` on theory steps.
    pub fn simulate_run(&self, code: &str) -> Option<String> {
        if self.kind != StepKind::Practice {
            return None;
        }
        let output = match self.recipe {
            Some(recipe) if recipe.matches(code) => recipe.output,
            _ => PLACEHOLDER_OUTPUT,
        };
        Some(output.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Lesson {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: &'static str,
    pub estimated_time: &'static str,
    pub steps: &'static [Step],
}

const INTRO_TO_LISTS: &str = "\
Lists are one of the most important data structures in Python. They allow you to store multiple items in a single variable and are ordered, changeable, and allow duplicate values.

## Creating Lists

You can create a list by placing items inside square brackets [], separated by commas:

```python
fruits = [\"apple\", \"banana\", \"orange\"]
numbers = [1, 2, 3, 4, 5]
mixed = [\"hello\", 42, True, 3.14]
```

## Key Properties of Lists

- **Ordered**: Lists maintain the order of items
- **Changeable**: You can modify lists after creation
- **Allow Duplicates**: The same value can appear multiple times";

const FIRST_LIST: &str = "\
Now let's practice creating lists. Your task is to create a list called `my_list` containing the numbers 1, 2, and 3.

**Instructions:**
1. Create a variable named `my_list`
2. Assign it a list containing the numbers 1, 2, and 3
3. Print the list using `print(my_list)`";

const LIST_INDEXING: &str = "\
## Accessing List Items

You can access individual items in a list using **indexing**. Python uses zero-based indexing, meaning the first item is at index 0.

```python
fruits = [\"apple\", \"banana\", \"orange\"]

print(fruits[0])   # Output: \"apple\"
print(fruits[1])   # Output: \"banana\"
print(fruits[2])   # Output: \"orange\"
```

## Negative Indexing

Python also supports negative indexing, where -1 refers to the last item:

```python
print(fruits[-1])  # Output: \"orange\"
print(fruits[-2])  # Output: \"banana\"
```";

const INDEXING_PRACTICE: &str = "\
Given a list of colors, practice accessing different elements.

**Your task:**
1. Create a list called `colors` with: \"red\", \"green\", \"blue\", \"yellow\"
2. Print the first color (index 0)
3. Print the last color using negative indexing (-1)
4. Print the second color (index 1)";

const PYTHON_LISTS_STEPS: &[Step] = &[
    Step {
        kind: StepKind::Theory,
        title: "Introduction to Lists",
        content: INTRO_TO_LISTS,
        starter_code: None,
        expected_output: None,
        hint: None,
        solution: None,
        recipe: None,
    },
    Step {
        kind: StepKind::Practice,
        title: "Create Your First List",
        content: FIRST_LIST,
        starter_code: Some("# Create your list here\n"),
        expected_output: Some("[1, 2, 3]"),
        hint: Some("Remember to use square brackets [] and separate items with commas"),
        solution: Some("my_list = [1, 2, 3]\nprint(my_list)"),
        recipe: Some(RunRecipe {
            required: &["my_list = [1, 2, 3]", "print(my_list)"],
            output: "[1, 2, 3]",
        }),
    },
    Step {
        kind: StepKind::Theory,
        title: "List Indexing",
        content: LIST_INDEXING,
        starter_code: None,
        expected_output: None,
        hint: None,
        solution: None,
        recipe: None,
    },
    Step {
        kind: StepKind::Practice,
        title: "Practice List Indexing",
        content: INDEXING_PRACTICE,
        starter_code: Some("# Create the colors list and practice indexing\n"),
        expected_output: Some("red\nyellow\ngreen"),
        hint: Some("Use colors[0], colors[-1], and colors[1] to access the elements"),
        solution: Some(
            "colors = ['red', 'green', 'blue', 'yellow']\nprint(colors[0])\nprint(colors[-1])\nprint(colors[1])",
        ),
        recipe: Some(RunRecipe {
            required: &["colors", "print"],
            output: "red\nyellow\ngreen",
        }),
    },
];

/// The authored lesson: "Python Lists and Indexing"
pub const PYTHON_LISTS: Lesson = Lesson {
    id: "python-lists",
    title: "Python Lists and Indexing",
    description: "Learn how to create, access, and manipulate lists in Python",
    difficulty: "Beginner",
    estimated_time: "25 minutes",
    steps: PYTHON_LISTS_STEPS,
};
