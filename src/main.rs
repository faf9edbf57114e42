use bmi_service::app::render::render_history;
use bmi_service::config::cli::Command;
use bmi_service::domain::model::BmiMeasurement;
use bmi_service::utils::logger;
use bmi_service::utils::validation::{validate_min_measure, MIN_MEASURE};
use bmi_service::{BmiClient, CliConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let config = cli.client_config()?;
    let client = BmiClient::new(&config)?;

    match cli.command {
        Command::Calc { height, weight } => {
            validate_min_measure("height", height, MIN_MEASURE)?;
            validate_min_measure("weight", weight, MIN_MEASURE)?;

            match client.calculate(BmiMeasurement { height, weight }).await {
                Ok(result) => {
                    println!("Your BMI is: {}", result.bmi);
                    println!("{}", result.message);
                }
                Err(e) => {
                    tracing::error!("BMI calculation failed: {}", e);
                    eprintln!("Error while calculating BMI: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::History => match client.history().await {
            Ok(entries) => println!("{}", render_history(&entries)),
            Err(e) => {
                tracing::error!("History request failed: {}", e);
                eprintln!("Error while fetching history: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
