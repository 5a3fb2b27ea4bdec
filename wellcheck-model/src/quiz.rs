#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

/// Answers to the five self-assessment questions, each scored by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuizAnswers {
    pub q1: i32,
    pub q2: i32,
    pub q3: i32,
    pub q4: i32,
    pub q5: i32,
}

impl QuizAnswers {
    pub fn score(&self) -> Result<i32, InvalidInputError> {
        [self.q1, self.q2, self.q3, self.q4, self.q5]
            .into_iter()
            .try_fold(0i32, |total, answer| total.checked_add(answer))
            .ok_or(InvalidInputError::OutOfRange("score"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_sum_of_answers() {
        let answers = QuizAnswers {
            q1: 1,
            q2: 3,
            q3: 0,
            q4: 2,
            q5: 4,
        };
        assert_eq!(answers.score(), Ok(10));
    }

    #[test]
    fn score_of_all_zero_answers() {
        let answers = QuizAnswers {
            q1: 0,
            q2: 0,
            q3: 0,
            q4: 0,
            q5: 0,
        };
        assert_eq!(answers.score(), Ok(0));
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let answers = QuizAnswers {
            q1: i32::MAX,
            q2: 1,
            q3: 0,
            q4: 0,
            q5: 0,
        };
        assert_eq!(answers.score(), Err(InvalidInputError::OutOfRange("score")));
    }

    #[test]
    fn negative_answers_count_against_total() {
        let answers = QuizAnswers {
            q1: i32::MIN,
            q2: i32::MAX,
            q3: 1,
            q4: 0,
            q5: 0,
        };
        assert_eq!(answers.score(), Ok(0));
    }
}
