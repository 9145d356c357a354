//! Fallback policy: network-free answers used whenever the model is
//! unconfigured, unreachable, or returns something unusable.
//!
//! Uniform choices go through [`MovePicker`], which is seedable so tests can
//! pin the outcome.

use parking_lot::Mutex;
use rand::prelude::*;
use rand::rngs::StdRng;

use super::types::{Difficulty, DotsState, LineMove, Orientation, TriviaQuestion};

const EASY_WORDS: &[&str] = &[
    "apple", "house", "smile", "train", "beach", "cloud", "happy", "music", "tiger", "water",
    "bread", "chair", "dream", "green", "light", "plant", "river", "sunny", "table", "zebra",
];

const MEDIUM_WORDS: &[&str] = &[
    "balloon", "captain", "dolphin", "blanket", "library", "monster", "pyramid", "rainbow",
    "sandwich", "thunder", "volcano", "whistle", "kitchen", "lantern", "penguin", "mystery",
];

const HARD_WORDS: &[&str] = &[
    "algorithm", "benevolent", "chrysalis", "labyrinth", "magnificent", "nocturnal",
    "quarantine", "rhythm", "silhouette", "symphony", "kaleidoscope", "xylophone",
    "juxtapose", "ephemeral", "mnemonic",
];

/// Word list for a difficulty tier. Never empty.
pub fn word_list(difficulty: Difficulty) -> &'static [&'static str] {
    match difficulty {
        Difficulty::Easy => EASY_WORDS,
        Difficulty::Medium => MEDIUM_WORDS,
        Difficulty::Hard => HARD_WORDS,
    }
}

/// The fixed, kid-safe general-knowledge batch returned when generation fails.
pub fn trivia_questions() -> Vec<TriviaQuestion> {
    vec![
        TriviaQuestion::new(
            "What is the largest planet in our solar system?",
            ["Earth", "Mars", "Jupiter", "Saturn"],
            2,
        ),
        TriviaQuestion::new(
            "How many legs does a spider have?",
            ["Six", "Eight", "Ten", "Four"],
            1,
        ),
        TriviaQuestion::new(
            "What color do you get when you mix blue and yellow?",
            ["Green", "Purple", "Orange", "Brown"],
            0,
        ),
        TriviaQuestion::new(
            "Which animal is known as the King of the Jungle?",
            ["Elephant", "Tiger", "Giraffe", "Lion"],
            3,
        ),
        TriviaQuestion::new(
            "What do bees make?",
            ["Milk", "Honey", "Silk", "Wax paper"],
            1,
        ),
    ]
}

/// First open line, scanning `hLines` row-major and then `vLines`.
pub fn first_open_line(state: &DotsState) -> Option<LineMove> {
    [Orientation::Horizontal, Orientation::Vertical]
        .into_iter()
        .find_map(|orientation| {
            state
                .lines(orientation)
                .iter()
                .enumerate()
                .find_map(|(row, cells)| {
                    cells.iter().position(|drawn| !drawn).map(|col| LineMove {
                        row,
                        col,
                        orientation,
                    })
                })
        })
}

/// Thread-safe uniform chooser shared by all requests.
pub struct MovePicker {
    rng: Mutex<StdRng>,
}

impl MovePicker {
    /// `Some(seed)` gives reproducible picks (tests); `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        let mut rng = self.rng.lock();
        items.choose(&mut *rng)
    }
}

impl Default for MovePicker {
    fn default() -> Self {
        Self::new(None)
    }
}
