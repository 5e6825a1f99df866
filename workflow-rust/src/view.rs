use wiki_quiz_client::{Quiz, QuizQuestion};

/// Presentation category of a question's difficulty label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
    /// Absent or unrecognized label.
    Unrated,
}

impl DifficultyLevel {
    /// Case-insensitive mapping of a free-form label.
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|label| label.trim().to_lowercase()).as_deref() {
            Some("easy") => Self::Easy,
            Some("medium") => Self::Medium,
            Some("hard") => Self::Hard,
            _ => Self::Unrated,
        }
    }
}

/// Positional option label: `A`, `B`, ..., `Z`, `AA`, `AB`, ...
#[must_use]
pub fn option_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut remaining = index + 1;
    while remaining > 0 {
        let offset = (remaining - 1) % 26;
        label.push(char::from(b'A' + u8::try_from(offset).unwrap_or_default()));
        remaining = (remaining - 1) / 26;
    }
    label.iter().rev().collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView<'a> {
    pub label: String,
    pub text: &'a str,
    /// Set only when answers are shown and this option is the single match
    /// of the answer.
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView<'a> {
    /// 1-based position in the quiz.
    pub number: usize,
    pub question: &'a str,
    pub difficulty: DifficultyLevel,
    /// The raw label, or `N/A` when absent.
    pub difficulty_label: &'a str,
    pub options: Vec<OptionView<'a>>,
    pub explanation: Option<&'a str>,
}

impl<'a> QuestionView<'a> {
    fn new(number: usize, question: &'a QuizQuestion, show_answers: bool) -> Self {
        let correct = if show_answers {
            question.correct_option_index()
        } else {
            None
        };

        Self {
            number,
            question: &question.question,
            difficulty: DifficultyLevel::from_label(question.difficulty.as_deref()),
            difficulty_label: question.difficulty.as_deref().unwrap_or("N/A"),
            options: question
                .options
                .iter()
                .enumerate()
                .map(|(index, text)| OptionView {
                    label: option_label(index),
                    text,
                    is_correct: correct == Some(index),
                })
                .collect(),
            explanation: if show_answers {
                question.explanation.as_deref()
            } else {
                None
            },
        }
    }

    /// The option marked correct, if any.
    #[must_use]
    pub fn correct_option(&self) -> Option<&OptionView<'a>> {
        self.options.iter().find(|option| option.is_correct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityGroupView<'a> {
    pub heading: &'static str,
    pub items: &'a [String],
}

/// Presentation-neutral view of a quiz. Absent and empty sections are both
/// left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView<'a> {
    pub title: &'a str,
    pub summary: Option<&'a str>,
    /// Non-empty entity groups, in People, Organizations, Locations order.
    pub entity_groups: Vec<EntityGroupView<'a>>,
    pub sections: &'a [String],
    pub questions: Vec<QuestionView<'a>>,
    pub related_topics: &'a [String],
}

impl<'a> QuizView<'a> {
    #[must_use]
    pub fn new(quiz: &'a Quiz, show_answers: bool) -> Self {
        let entity_groups = quiz
            .key_entities
            .as_ref()
            .map(|entities| {
                [
                    ("People", entities.people.as_slice()),
                    ("Organizations", entities.organizations.as_slice()),
                    ("Locations", entities.locations.as_slice()),
                ]
                .into_iter()
                .filter(|(_, items)| !items.is_empty())
                .map(|(heading, items)| EntityGroupView { heading, items })
                .collect()
            })
            .unwrap_or_default();

        Self {
            title: &quiz.title,
            summary: quiz.summary.as_deref(),
            entity_groups,
            sections: &quiz.sections,
            questions: quiz
                .quiz
                .iter()
                .enumerate()
                .map(|(index, question)| QuestionView::new(index + 1, question, show_answers))
                .collect(),
            related_topics: &quiz.related_topics,
        }
    }

    /// Whether the questions section should be rendered at all.
    #[must_use]
    pub fn has_questions(&self) -> bool {
        !self.questions.is_empty()
    }
}
