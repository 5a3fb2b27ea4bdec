use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::{
    error::InvalidInputError,
    metabolic::{BiometricInput, Gender},
    quiz::QuizAnswers,
};

/// Calculator request as submitted by the browser. Numeric fields may arrive
/// either as JSON numbers or as strings taken straight from form inputs.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiometricPayload {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<f64>,
}

impl TryFrom<BiometricPayload> for BiometricInput {
    type Error = InvalidInputError;

    fn try_from(payload: BiometricPayload) -> Result<Self, Self::Error> {
        let height = payload
            .height
            .ok_or(InvalidInputError::MissingField("height"))?;
        let weight = payload
            .weight
            .ok_or(InvalidInputError::MissingField("weight"))?;
        let age = payload.age.ok_or(InvalidInputError::MissingField("age"))?;
        let gender = payload
            .gender
            .as_deref()
            .map(Gender::from)
            .ok_or(InvalidInputError::MissingField("gender"))?;
        let activity = payload
            .activity
            .ok_or(InvalidInputError::MissingField("activity"))?;

        BiometricInput::new(height, weight, age, gender, activity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub q1: Option<i32>,
    pub q2: Option<i32>,
    pub q3: Option<i32>,
    pub q4: Option<i32>,
    pub q5: Option<i32>,
}

impl TryFrom<QuizSubmission> for QuizAnswers {
    type Error = InvalidInputError;

    fn try_from(submission: QuizSubmission) -> Result<Self, Self::Error> {
        Ok(QuizAnswers {
            q1: submission.q1.ok_or(InvalidInputError::MissingField("q1"))?,
            q2: submission.q2.ok_or(InvalidInputError::MissingField("q2"))?,
            q3: submission.q3.ok_or(InvalidInputError::MissingField("q3"))?,
            q4: submission.q4.ok_or(InvalidInputError::MissingField("q4"))?,
            q5: submission.q5.ok_or(InvalidInputError::MissingField("q5"))?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    pub score: i32,
}
