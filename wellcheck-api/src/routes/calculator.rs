use actix_web::{post, web};
use log::debug;
use wellcheck_model::{
    metabolic::{classify_and_estimate, BiometricInput, MetabolicResult},
    payload::BiometricPayload,
};

use crate::error::ApiError;

#[post("/calculate")]
pub async fn calculate(
    payload: web::Json<BiometricPayload>,
) -> Result<web::Json<MetabolicResult>, ApiError> {
    let input = BiometricInput::try_from(payload.into_inner())?;
    let result = classify_and_estimate(&input);
    debug!(
        "BMI {} ({}), goal {} kcal",
        result.bmi, result.category, result.goal_calories
    );
    Ok(web::Json(result))
}
