use std::{env, error::Error, fs::File, io::BufReader};

use dotenv::dotenv;
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;
    dotenv().ok();

    let file = File::open("input.json")?;
    let url = env::var("WELLCHECK_URL").unwrap_or_else(|_| "http://localhost:8080/".to_owned());
    let client = wellcheck_client::create(url);

    let result =
        wellcheck_client::calculate_from_reader(&client, BufReader::new(file)).await?;
    info!("BMI {} ({})", result.bmi, result.category);
    info!(
        "Maintenance {} kcal, goal {} kcal: {}",
        result.maintenance_calories, result.goal_calories, result.goal_description
    );
    info!(
        "Protein {} g, fat {} g, carbohydrates {} g",
        result.macro_split.protein_g, result.macro_split.fat_g, result.macro_split.carb_g
    );

    Ok(())
}
