#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

const UNDERWEIGHT_BELOW: f64 = 18.5;
const OVERWEIGHT_FROM: f64 = 25.0;
const OBESE_FROM: f64 = 30.0;

const HEALTHY_BMI_MIN: f64 = 18.5;
const HEALTHY_BMI_MAX: f64 = 24.9;

const MAX_HEIGHT_CM: f64 = 300.0;
const MAX_WEIGHT_KG: f64 = 1000.0;
const MAX_AGE: u32 = 150;
const MAX_ACTIVITY_FACTOR: f64 = 10.0;

const PROTEIN_GRAMS_PER_KG: f64 = 1.5;
const FAT_CALORIE_SHARE: f64 = 0.25;
const KCAL_PER_GRAM_PROTEIN: i64 = 4;
const KCAL_PER_GRAM_FAT: i64 = 9;
const KCAL_PER_GRAM_CARB: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    fn bmr_offset(&self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        }
    }

    pub fn minimum_calories(&self) -> i64 {
        match self {
            Gender::Male => 1500,
            Gender::Female => 1200,
        }
    }
}

/// Only the exact value "male" selects the male formula, anything else
/// falls back to the female one.
impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        if value == "male" {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiometricInput {
    height: f64,
    weight: f64,
    age: u32,
    gender: Gender,
    activity_factor: f64,
}

impl BiometricInput {
    pub fn new(
        height: f64,
        weight: f64,
        age: u32,
        gender: Gender,
        activity_factor: f64,
    ) -> Result<Self, InvalidInputError> {
        ensure_in_range("height", height, MAX_HEIGHT_CM)?;
        ensure_in_range("weight", weight, MAX_WEIGHT_KG)?;
        ensure_in_range("activity", activity_factor, MAX_ACTIVITY_FACTOR)?;
        if age == 0 {
            return Err(InvalidInputError::NotPositive("age"));
        }
        if age > MAX_AGE {
            return Err(InvalidInputError::OutOfRange("age"));
        }

        Ok(Self {
            height,
            weight,
            age,
            gender,
            activity_factor,
        })
    }

    pub fn height_cm(&self) -> f64 {
        self.height
    }
    pub fn height_m(&self) -> f64 {
        self.height / 100.0
    }
    pub fn weight_kg(&self) -> f64 {
        self.weight
    }
    pub fn age(&self) -> u32 {
        self.age
    }
    pub fn gender(&self) -> Gender {
        self.gender
    }
    pub fn activity_factor(&self) -> f64 {
        self.activity_factor
    }
}

fn ensure_in_range(field: &'static str, value: f64, max: f64) -> Result<(), InvalidInputError> {
    if !(value.is_finite() && value > 0.0) {
        Err(InvalidInputError::NotPositive(field))
    } else if value > max {
        Err(InvalidInputError::OutOfRange(field))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize, strum::Display, strum::EnumString)
)]
pub enum BmiCategory {
    Underweight,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Normal Weight"),
        strum(serialize = "Normal Weight")
    )]
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_BELOW {
            BmiCategory::Underweight
        } else if bmi < OVERWEIGHT_FROM {
            BmiCategory::NormalWeight
        } else if bmi < OBESE_FROM {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    fn calorie_adjustment(&self) -> i64 {
        match self {
            BmiCategory::Underweight => 400,
            BmiCategory::NormalWeight => 0,
            BmiCategory::Overweight => -500,
            BmiCategory::Obese => -600,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MacroSplit {
    pub protein_g: u32,
    pub fat_g: u32,
    pub carb_g: u32,
}

impl MacroSplit {
    /// Protein follows body weight, fat takes a fixed share of the calories
    /// and carbohydrates fill whatever is left.
    pub fn from_calories(calories: i64, weight_kg: f64) -> Self {
        let protein_g = (PROTEIN_GRAMS_PER_KG * weight_kg) as i64;
        let protein_cal = protein_g.saturating_mul(KCAL_PER_GRAM_PROTEIN);
        let fat_cal = (FAT_CALORIE_SHARE * calories as f64) as i64;
        let fat_g = fat_cal / KCAL_PER_GRAM_FAT;
        let carb_cal = calories
            .saturating_sub(protein_cal.saturating_add(fat_cal))
            .max(0);
        let carb_g = carb_cal / KCAL_PER_GRAM_CARB;

        Self {
            protein_g: to_grams(protein_g),
            fat_g: to_grams(fat_g),
            carb_g: to_grams(carb_g),
        }
    }
}

fn to_grams(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetabolicResult {
    pub bmi: f64,
    pub category: BmiCategory,
    #[cfg_attr(feature = "serde", serde(rename = "calories"))]
    pub maintenance_calories: i64,
    pub goal_calories: i64,
    #[cfg_attr(feature = "serde", serde(rename = "calorie_goal"))]
    pub goal_description: String,
    #[cfg_attr(feature = "serde", serde(rename = "macros"))]
    pub macro_split: MacroSplit,
}

/// Rounds the exact binary value to one decimal, ties to even.
fn round_to_tenth(x: f64) -> f64 {
    format!("{:.1}", x).parse().unwrap_or(x)
}

pub fn body_mass_index(input: &BiometricInput) -> f64 {
    input.weight_kg() / input.height_m().powf(2.0)
}

pub fn basal_metabolic_rate(input: &BiometricInput) -> f64 {
    10.0 * input.weight_kg() + 6.25 * input.height_cm() - 5.0 * input.age() as f64
        + input.gender().bmr_offset()
}

/// Weights bounding the healthy BMI band for the given height, in kg.
pub fn healthy_weight_range(height_m: f64) -> (f64, f64) {
    let area = height_m.powf(2.0);
    (HEALTHY_BMI_MIN * area, HEALTHY_BMI_MAX * area)
}

fn goal_description(category: BmiCategory, weight: f64, healthy_range: (f64, f64)) -> String {
    let (min_weight, max_weight) = healthy_range;
    match category {
        BmiCategory::Underweight => format!(
            "Gain {:.1} kg to reach healthy BMI",
            round_to_tenth(min_weight - weight)
        ),
        BmiCategory::NormalWeight => "Maintain Weight".to_owned(),
        BmiCategory::Overweight | BmiCategory::Obese => format!(
            "Lose {:.1} kg to reach healthy BMI",
            round_to_tenth(weight - max_weight)
        ),
    }
}

pub fn classify_and_estimate(input: &BiometricInput) -> MetabolicResult {
    let bmi = round_to_tenth(body_mass_index(input));
    let category = BmiCategory::from_bmi(bmi);

    let maintenance_calories = (basal_metabolic_rate(input) * input.activity_factor()) as i64;
    let goal_calories = maintenance_calories
        .saturating_add(category.calorie_adjustment())
        .max(input.gender().minimum_calories());

    let goal_description = goal_description(
        category,
        input.weight_kg(),
        healthy_weight_range(input.height_m()),
    );

    MetabolicResult {
        bmi,
        category,
        maintenance_calories,
        goal_calories,
        goal_description,
        macro_split: MacroSplit::from_calories(goal_calories, input.weight_kg()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(height: f64, weight: f64, age: u32, gender: Gender, activity: f64) -> BiometricInput {
        BiometricInput::new(height, weight, age, gender, activity).unwrap()
    }

    #[test]
    fn normal_weight_male_maintains() {
        let input = input(170.0, 70.0, 30, Gender::Male, 1.55);
        assert_eq!(basal_metabolic_rate(&input), 1617.5);

        let result = classify_and_estimate(&input);
        assert_eq!(result.bmi, 24.2);
        assert_eq!(result.category, BmiCategory::NormalWeight);
        assert_eq!(result.maintenance_calories, 2507);
        assert_eq!(result.goal_calories, 2507);
        assert_eq!(result.goal_description, "Maintain Weight");
        assert_eq!(
            result.macro_split,
            MacroSplit {
                protein_g: 105,
                fat_g: 69,
                carb_g: 365
            }
        );
    }

    #[test]
    fn obese_female_gets_deficit() {
        let result = classify_and_estimate(&input(160.0, 90.0, 40, Gender::Female, 1.2));
        assert_eq!(result.bmi, 35.2);
        assert_eq!(result.category, BmiCategory::Obese);
        assert_eq!(result.maintenance_calories, 1846);
        assert_eq!(result.goal_calories, 1246);
        assert_eq!(result.goal_description, "Lose 26.3 kg to reach healthy BMI");
        assert_eq!(
            result.macro_split,
            MacroSplit {
                protein_g: 135,
                fat_g: 34,
                carb_g: 98
            }
        );
    }

    #[test]
    fn overweight_male_gets_smaller_deficit() {
        let result = classify_and_estimate(&input(175.0, 85.0, 35, Gender::Male, 1.5));
        assert_eq!(result.bmi, 27.8);
        assert_eq!(result.category, BmiCategory::Overweight);
        assert_eq!(result.maintenance_calories, 2660);
        assert_eq!(result.goal_calories, 2160);
        assert_eq!(result.goal_description, "Lose 8.7 kg to reach healthy BMI");
        assert_eq!(
            result.macro_split,
            MacroSplit {
                protein_g: 127,
                fat_g: 60,
                carb_g: 278
            }
        );
    }

    #[test]
    fn underweight_gets_surplus() {
        let result = classify_and_estimate(&input(180.0, 55.0, 25, Gender::Male, 1.5));
        assert_eq!(result.bmi, 17.0);
        assert_eq!(result.category, BmiCategory::Underweight);
        assert_eq!(result.maintenance_calories, 2332);
        assert_eq!(result.goal_calories, 2732);
        assert_eq!(result.goal_description, "Gain 4.9 kg to reach healthy BMI");
    }

    #[test]
    fn bmi_rounds_like_decimal_one_place() {
        let test_data = [
            (99.8, 24.9, BmiCategory::NormalWeight),
            (97.0, 24.2, BmiCategory::NormalWeight),
            (73.8, 18.4, BmiCategory::Underweight),
        ];

        for (i, (weight, bmi, category)) in test_data.into_iter().enumerate() {
            let result = classify_and_estimate(&input(200.0, weight, 30, Gender::Male, 1.2));
            assert_eq!(result.bmi, bmi, "Test case #{}", i);
            assert_eq!(result.category, category, "Test case #{}", i);
        }
    }

    #[test]
    fn just_below_healthy_band_gains_a_fraction() {
        let result = classify_and_estimate(&input(200.0, 73.8, 30, Gender::Male, 1.2));
        assert_eq!(result.goal_description, "Gain 0.2 kg to reach healthy BMI");

        let result = classify_and_estimate(&input(200.0, 99.8, 30, Gender::Male, 1.2));
        assert_eq!(result.goal_description, "Maintain Weight");
    }

    #[test]
    fn rejects_implausible_magnitudes() {
        let test_data = [
            ((170.0, 1e300, 30, 1.2), "weight"),
            ((1e6, 70.0, 30, 1.2), "height"),
            ((170.0, 70.0, 30, 1e9), "activity"),
            ((170.0, 70.0, u32::MAX, 1.2), "age"),
        ];

        for (i, ((height, weight, age, activity), field)) in test_data.into_iter().enumerate() {
            assert_eq!(
                BiometricInput::new(height, weight, age, Gender::Male, activity),
                Err(InvalidInputError::OutOfRange(field)),
                "Test case #{}",
                i
            );
        }
    }

    #[test]
    fn heaviest_accepted_input_is_estimated() {
        let result = classify_and_estimate(&input(300.0, 1000.0, 150, Gender::Male, 10.0));
        assert_eq!(result.macro_split.protein_g, 1500);
    }

    #[test]
    fn macro_split_saturates_instead_of_overflowing() {
        let split = MacroSplit::from_calories(i64::MAX, 1e300);
        assert_eq!(split.protein_g, u32::MAX);
        assert_eq!(split.carb_g, 0);
    }

    #[test]
    fn goal_calories_respect_gender_minimum() {
        let female = classify_and_estimate(&input(150.0, 100.0, 80, Gender::Female, 1.2));
        assert_eq!(female.maintenance_calories, 1651);
        assert_eq!(female.goal_calories, 1200);

        let male = classify_and_estimate(&input(150.0, 80.0, 90, Gender::Male, 1.0));
        assert_eq!(male.maintenance_calories, 1292);
        assert_eq!(male.goal_calories, 1500);
    }

    #[test]
    fn category_boundaries() {
        let test_data = [
            (10.0, BmiCategory::Underweight),
            (18.4, BmiCategory::Underweight),
            (18.5, BmiCategory::NormalWeight),
            (24.9, BmiCategory::NormalWeight),
            (25.0, BmiCategory::Overweight),
            (29.9, BmiCategory::Overweight),
            (30.0, BmiCategory::Obese),
            (45.0, BmiCategory::Obese),
        ];

        for (i, (bmi, expected)) in test_data.into_iter().enumerate() {
            assert_eq!(BmiCategory::from_bmi(bmi), expected, "Test case #{}", i);
        }
    }

    #[test]
    fn carbs_drop_to_zero_when_protein_and_fat_cover_calories() {
        let split = MacroSplit::from_calories(1200, 200.0);
        assert_eq!(
            split,
            MacroSplit {
                protein_g: 300,
                fat_g: 33,
                carb_g: 0
            }
        );
    }

    #[test]
    fn protein_does_not_depend_on_calories() {
        let low = MacroSplit::from_calories(1200, 64.9);
        let high = MacroSplit::from_calories(3500, 64.9);
        assert_eq!(low.protein_g, 97);
        assert_eq!(high.protein_g, 97);
        assert!(high.fat_g > low.fat_g);
    }

    #[test]
    fn bmi_grows_with_weight() {
        let mut previous = 0.0;
        for weight in (40..150).map(|w| w as f64) {
            let bmi = classify_and_estimate(&input(172.0, weight, 30, Gender::Female, 1.3)).bmi;
            assert!(bmi >= previous, "BMI decreased at {} kg", weight);
            previous = bmi;
        }
    }

    #[test]
    fn healthy_range_for_two_meters() {
        let (min, max) = healthy_weight_range(2.0);
        assert_eq!(min, 74.0);
        assert_eq!(max, 99.6);
    }

    #[test]
    fn rejects_non_positive_values() {
        let test_data = [
            ((0.0, 70.0, 30, 1.2), "height"),
            ((-170.0, 70.0, 30, 1.2), "height"),
            ((170.0, 0.0, 30, 1.2), "weight"),
            ((170.0, f64::NAN, 30, 1.2), "weight"),
            ((170.0, 70.0, 0, 1.2), "age"),
            ((170.0, 70.0, 30, 0.0), "activity"),
        ];

        for (i, ((height, weight, age, activity), field)) in test_data.into_iter().enumerate() {
            assert_eq!(
                BiometricInput::new(height, weight, age, Gender::Male, activity),
                Err(InvalidInputError::NotPositive(field)),
                "Test case #{}",
                i
            );
        }
    }

    #[test]
    fn only_exact_male_selects_male_formula() {
        assert_eq!(Gender::from("male"), Gender::Male);
        assert_eq!(Gender::from("female"), Gender::Female);
        assert_eq!(Gender::from("Male"), Gender::Female);
        assert_eq!(Gender::from(""), Gender::Female);
    }
}
