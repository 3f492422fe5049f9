//! Quiz questions and mini-game challenges.
//!
//! Every option carries the per-domain score it contributes; the helpers
//! at the bottom turn a choice into a ledger event.

use crate::models::{DomainDelta, GameScoreEvent, QuizAnswerEvent};

/// A multiple-choice quiz question.
#[derive(Debug)]
pub struct QuizQuestion {
    pub id: u32,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    /// Per-domain weights, one value per option.
    weights: &'static [(&'static str, &'static [u32])],
}

impl QuizQuestion {
    /// Domain delta contributed by choosing `option`.
    pub fn delta_for(&self, option: usize) -> Option<DomainDelta> {
        if option >= self.options.len() {
            return None;
        }
        Some(
            self.weights
                .iter()
                .filter_map(|(domain, per_option)| {
                    per_option.get(option).map(|w| (domain.to_string(), *w))
                })
                .collect(),
        )
    }
}

/// One answer to a mini-game challenge.
#[derive(Debug)]
pub struct GameOption {
    pub label: &'static str,
    /// Score awarded for this answer, 0 to 100.
    pub score: u8,
    delta: &'static [(&'static str, u32)],
}

/// A single-challenge mini-game.
#[derive(Debug)]
pub struct CareerGame {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub challenge: &'static str,
    pub options: &'static [GameOption],
}

pub fn questions() -> &'static [QuizQuestion] {
    QUESTIONS
}

pub fn games() -> &'static [CareerGame] {
    GAMES
}

pub fn find_question(id: u32) -> Option<&'static QuizQuestion> {
    QUESTIONS.iter().find(|q| q.id == id)
}

pub fn find_game(id: &str) -> Option<&'static CareerGame> {
    GAMES.iter().find(|g| g.id == id)
}

/// Build the ledger event for answering `question_id` with `option`.
///
/// Returns `None` for an unknown question or an out-of-range option.
pub fn quiz_answer(question_id: u32, option: usize) -> Option<QuizAnswerEvent> {
    let question = find_question(question_id)?;
    let per_domain_delta = question.delta_for(option)?;
    Some(QuizAnswerEvent {
        question_id,
        chosen_option_index: option,
        answer: question.options[option].to_string(),
        per_domain_delta,
    })
}

/// Build the ledger event for answering game `game_id` with `option`.
pub fn game_result(game_id: &str, option: usize) -> Option<GameScoreEvent> {
    let game = find_game(game_id)?;
    let choice = game.options.get(option)?;
    Some(GameScoreEvent {
        game_id: game.id.to_string(),
        score: choice.score,
        per_domain_delta: choice
            .delta
            .iter()
            .map(|(d, w)| (d.to_string(), *w))
            .collect(),
    })
}

static QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        id: 1,
        prompt: "What type of problems do you enjoy solving the most?",
        options: &[
            "Building features and applications end to end",
            "Protecting systems from threats",
            "Finding patterns in large datasets",
            "Designing scalable infrastructure",
            "Breaking things to make them more reliable",
            "Deciding what to build and why",
        ],
        weights: &[
            ("SDE", &[3, 1, 1, 2, 1, 1]),
            ("Data Analyst", &[1, 0, 3, 1, 1, 2]),
            ("Cybersecurity", &[0, 3, 1, 1, 2, 0]),
            ("Cloud", &[1, 1, 0, 3, 1, 0]),
            ("Tester", &[1, 1, 1, 0, 3, 0]),
            ("Product Manager", &[1, 0, 1, 0, 0, 3]),
        ],
    },
    QuizQuestion {
        id: 2,
        prompt: "Which work environment appeals to you most?",
        options: &[
            "Product startup shipping fast",
            "Security operations center",
            "Analytics team at a large company",
            "Platform or infrastructure team",
            "Quality engineering group",
            "Cross-functional product squad",
        ],
        weights: &[
            ("SDE", &[3, 0, 1, 2, 1, 1]),
            ("Data Analyst", &[1, 0, 3, 1, 0, 1]),
            ("Cybersecurity", &[0, 3, 1, 1, 1, 0]),
            ("Cloud", &[1, 1, 0, 3, 1, 0]),
            ("Tester", &[1, 1, 0, 1, 3, 0]),
            ("Product Manager", &[2, 0, 1, 0, 0, 3]),
        ],
    },
    QuizQuestion {
        id: 3,
        prompt: "What motivates you most in your work?",
        options: &[
            "Solving complex technical challenges",
            "Keeping systems and data secure",
            "Discovering insights from data",
            "Automating and scaling systems",
            "Shipping software that just works",
            "Shaping products users love",
        ],
        weights: &[
            ("SDE", &[3, 1, 1, 2, 2, 1]),
            ("Data Analyst", &[1, 0, 3, 1, 0, 1]),
            ("Cybersecurity", &[1, 3, 0, 1, 1, 0]),
            ("Cloud", &[1, 1, 0, 3, 1, 0]),
            ("Tester", &[1, 1, 0, 1, 3, 0]),
            ("Product Manager", &[0, 0, 1, 0, 1, 3]),
        ],
    },
];

static GAMES: &[CareerGame] = &[
    CareerGame {
        id: "bug-buster",
        title: "Bug Buster",
        description: "Find and fix code bugs to test your debugging skills",
        challenge: "function calculateSum(a, b) { return a - b; }\nWhat's wrong with this code?",
        options: &[
            GameOption {
                label: "The function uses subtraction (-) instead of addition (+)",
                score: 85,
                delta: &[("SDE", 15), ("Tester", 8)],
            },
            GameOption {
                label: "The function name is incorrect",
                score: 45,
                delta: &[("SDE", 5), ("Tester", 3)],
            },
            GameOption {
                label: "Missing semicolon at the end",
                score: 45,
                delta: &[("SDE", 5), ("Tester", 3)],
            },
            GameOption {
                label: "Variables a and b are not defined",
                score: 45,
                delta: &[("SDE", 5), ("Tester", 3)],
            },
        ],
    },
    CareerGame {
        id: "code-match",
        title: "Code Match",
        description: "Match programming concepts with their definitions",
        challenge: "Which definition matches the term \"closure\"?",
        options: &[
            GameOption {
                label: "A function bundled with the variables of its enclosing scope",
                score: 90,
                delta: &[("SDE", 12), ("Tester", 4)],
            },
            GameOption {
                label: "A loop that never terminates",
                score: 50,
                delta: &[("SDE", 4)],
            },
            GameOption {
                label: "A database transaction that was rolled back",
                score: 50,
                delta: &[("SDE", 4)],
            },
        ],
    },
    CareerGame {
        id: "cyber-chase",
        title: "Cyber Chase",
        description: "Identify security threats and vulnerabilities",
        challenge: "An email asks you to confirm your password via a shortened link. What is it?",
        options: &[
            GameOption {
                label: "A phishing attempt",
                score: 88,
                delta: &[("Cybersecurity", 16), ("Tester", 4)],
            },
            GameOption {
                label: "A routine security check",
                score: 40,
                delta: &[("Cybersecurity", 6)],
            },
            GameOption {
                label: "A newsletter subscription",
                score: 40,
                delta: &[("Cybersecurity", 6)],
            },
        ],
    },
    CareerGame {
        id: "data-detective",
        title: "Data Detective",
        description: "Analyze patterns and trends in datasets",
        challenge: "What comes next in the series 2, 4, 8, 16, 32, ...?",
        options: &[
            GameOption {
                label: "64",
                score: 92,
                delta: &[("Data Analyst", 16), ("Product Manager", 4)],
            },
            GameOption {
                label: "48",
                score: 50,
                delta: &[("Data Analyst", 6), ("Product Manager", 2)],
            },
            GameOption {
                label: "36",
                score: 50,
                delta: &[("Data Analyst", 6), ("Product Manager", 2)],
            },
        ],
    },
    CareerGame {
        id: "web-builder",
        title: "Web Builder Sprint",
        description: "Build responsive web layouts quickly",
        challenge: "Which rule lets a row of cards wrap onto new lines on small screens?",
        options: &[
            GameOption {
                label: "display: flex; flex-wrap: wrap;",
                score: 87,
                delta: &[("SDE", 15), ("Product Manager", 4)],
            },
            GameOption {
                label: "position: absolute;",
                score: 45,
                delta: &[("SDE", 5), ("Product Manager", 2)],
            },
            GameOption {
                label: "overflow: hidden;",
                score: 45,
                delta: &[("SDE", 5), ("Product Manager", 2)],
            },
        ],
    },
    CareerGame {
        id: "career-sim",
        title: "Career Simulator",
        description: "Make career decisions and see outcomes",
        challenge: "You have a free semester. How do you spend it?",
        options: &[
            GameOption {
                label: "Build and ship an open-source app",
                score: 80,
                delta: &[("SDE", 15)],
            },
            GameOption {
                label: "Analyze a public dataset and publish the findings",
                score: 80,
                delta: &[("Data Analyst", 15)],
            },
            GameOption {
                label: "Compete in capture-the-flag events",
                score: 80,
                delta: &[("Cybersecurity", 15)],
            },
            GameOption {
                label: "Earn a cloud certification",
                score: 80,
                delta: &[("Cloud", 15)],
            },
            GameOption {
                label: "Write test suites for open-source projects",
                score: 80,
                delta: &[("Tester", 15)],
            },
            GameOption {
                label: "Run product for a student startup",
                score: 80,
                delta: &[("Product Manager", 15)],
            },
        ],
    },
];
