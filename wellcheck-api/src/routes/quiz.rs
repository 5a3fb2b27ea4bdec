use actix_web::{post, web};
use log::debug;
use wellcheck_model::{
    payload::{QuizScore, QuizSubmission},
    quiz::QuizAnswers,
};

use crate::error::ApiError;

#[post("/result")]
pub async fn result(form: web::Form<QuizSubmission>) -> Result<web::Json<QuizScore>, ApiError> {
    let answers = QuizAnswers::try_from(form.into_inner())?;
    let score = answers.score()?;
    debug!("Quiz scored {}", score);
    Ok(web::Json(QuizScore { score }))
}
