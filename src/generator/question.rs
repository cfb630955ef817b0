use crate::pool::{canonical, Element};
use crate::tracking::PairKey;

/// Outcome of checking one answer against the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerCheck {
    pub correct: bool,
    /// Position the answer was given for
    pub position: usize,
    pub expected: Element,
    pub chosen: Element,
    /// Scored element before this position, if any
    pub previous: Option<Element>,
}

impl AnswerCheck {
    /// Transition the user was asked for
    pub fn key(&self) -> PairKey {
        PairKey::new(self.previous, self.expected)
    }

    /// Transition the user actually answered with
    pub fn chosen_key(&self) -> PairKey {
        PairKey::new(self.previous, self.chosen)
    }
}

/// One question: what is played, what is scored, and how far the user got
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    played: Vec<Element>,
    answers: Vec<Element>,
    /// Answers compare modulo this period when set
    period: Option<i32>,
    position: usize,
}

impl Question {
    pub fn new(played: Vec<Element>, answers: Vec<Element>, period: Option<i32>) -> Self {
        Self {
            played,
            answers,
            period,
            position: 0,
        }
    }

    /// Everything to render or play, including unscored trailing elements
    pub fn played(&self) -> &[Element] {
        &self.played
    }

    /// Scored elements in answer order
    pub fn answers(&self) -> &[Element] {
        &self.answers
    }

    /// Number of positions answered correctly so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Scored positions in this question
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.answers.len()
    }

    /// Element expected at the current position
    pub fn expected(&self) -> Option<Element> {
        self.answers.get(self.position).copied()
    }

    fn previous(&self) -> Option<Element> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.answers.get(i).copied())
    }

    fn matches(&self, chosen: Element, expected: Element) -> bool {
        match self.period {
            Some(period) => canonical(chosen, period) == canonical(expected, period),
            None => chosen == expected,
        }
    }

    /// Check `chosen` at the current position; correct answers advance.
    /// Returns `None` once the question is complete.
    pub fn check(&mut self, chosen: Element) -> Option<AnswerCheck> {
        let expected = self.expected()?;
        let check = AnswerCheck {
            correct: self.matches(chosen, expected),
            position: self.position,
            expected,
            chosen,
            previous: self.previous(),
        };
        if check.correct {
            self.position += 1;
        }
        Some(check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_answers_advance() {
        let mut question = Question::new(vec![0, 4, 7], vec![0, 4, 7], Some(12));
        assert_eq!(question.expected(), Some(0));

        let check = question.check(0).unwrap();
        assert!(check.correct);
        assert_eq!(check.key(), PairKey::opening(0));
        assert_eq!(question.position(), 1);

        let check = question.check(4).unwrap();
        assert_eq!(check.key(), PairKey::new(Some(0), 4));
        assert!(!question.is_complete());

        question.check(7).unwrap();
        assert!(question.is_complete());
        assert_eq!(question.check(7), None);
    }

    #[test]
    fn test_wrong_answer_stays_put() {
        let mut question = Question::new(vec![2, 5], vec![2, 5], Some(12));
        question.check(2);
        let check = question.check(9).unwrap();
        assert!(!check.correct);
        assert_eq!(check.position, 1);
        assert_eq!(check.chosen_key(), PairKey::new(Some(2), 9));
        assert_eq!(question.position(), 1);
        assert_eq!(question.expected(), Some(5));
    }

    #[test]
    fn test_octave_equivalent_answers_accepted() {
        let mut question = Question::new(vec![-5], vec![-5], Some(12));
        assert!(question.check(7).unwrap().correct);

        let mut question = Question::new(vec![12], vec![12], Some(12));
        assert!(question.check(0).unwrap().correct);
    }

    #[test]
    fn test_exact_comparison_without_period() {
        let mut question = Question::new(vec![0, 12], vec![12], None);
        assert!(!question.check(0).unwrap().correct);
        assert!(question.check(12).unwrap().correct);
    }

    #[test]
    fn test_trailing_elements_are_not_scored() {
        let mut question = Question::new(vec![0, 2, 4, 5], vec![0, 2], Some(12));
        assert_eq!(question.len(), 2);
        question.check(0);
        question.check(2);
        assert!(question.is_complete());
        assert_eq!(question.played().len(), 4);
    }
}
