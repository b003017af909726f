//! Quizzes shown when the hero picks up a treasure.
use rand::Rng;
use rand::rngs::StdRng;

use crate::game::input::{Key, KeyEvent};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Passed(i64),
    Failed(i64),
}

/// A single question the player answers from the keyboard.
pub trait Puzzle {
    /// Feeds one key press; returns the verdict once the answer is confirmed.
    fn on_key_down(&mut self, event: &KeyEvent) -> Option<QuizOutcome>;
    fn points(&self) -> i64;
    /// The question without the typed answer, e.g. `3 * 4`.
    fn question(&self) -> String;
    /// Digits typed so far.
    fn answer_text(&self) -> String;
}

/// Every quiz variant the session can pick from.
pub const PUZZLES: &[fn(&mut StdRng) -> Box<dyn Puzzle>] = &[MultiplicationQuiz::boxed];

pub fn random_puzzle(rng: &mut StdRng) -> Box<dyn Puzzle> {
    let idx = rng.gen_range(0..PUZZLES.len());
    PUZZLES[idx](rng)
}

#[derive(Clone, Debug)]
pub struct MultiplicationQuiz {
    a: u32,
    b: u32,
    points: i64,
    answer: Vec<char>,
}

impl MultiplicationQuiz {
    pub fn new(rng: &mut StdRng) -> Self {
        Self::with_operands(rng.gen_range(0..=9), rng.gen_range(0..=9))
    }

    pub fn with_operands(a: u32, b: u32) -> Self {
        Self { a, b, points: points_for(a, b), answer: Vec::new() }
    }

    fn boxed(rng: &mut StdRng) -> Box<dyn Puzzle> {
        Box::new(Self::new(rng))
    }

    #[cfg(test)]
    pub fn operands(&self) -> (u32, u32) {
        (self.a, self.b)
    }

    fn judge(&self) -> QuizOutcome {
        let typed: String = self.answer.iter().collect();
        match typed.parse::<u32>() {
            Ok(n) if n == self.a * self.b => QuizOutcome::Passed(self.points),
            // Empty or overlong input counts as a wrong answer.
            _ => QuizOutcome::Failed(self.points),
        }
    }
}

/// Halved when either operand is 5, never below one point.
pub fn points_for(a: u32, b: u32) -> i64 {
    let product = i64::from(a * b);
    let points = if a == 5 || b == 5 { product / 2 } else { product };
    points.max(1)
}

impl Puzzle for MultiplicationQuiz {
    fn on_key_down(&mut self, event: &KeyEvent) -> Option<QuizOutcome> {
        if event.key == Key::Backspace {
            self.answer.pop();
            return None;
        }
        if event.is_confirm() {
            return Some(self.judge());
        }
        if let Some(c) = event.character.filter(char::is_ascii_digit) {
            self.answer.push(c);
        }
        None
    }

    fn points(&self) -> i64 {
        self.points
    }

    fn question(&self) -> String {
        format!("{} * {}", self.a, self.b)
    }

    fn answer_text(&self) -> String {
        self.answer.iter().collect()
    }
}
