pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use crate::core::rate::ExchangeRateClient;
use crate::core::{Calculator, CurrencyDetailPresenter, RateListPresenter};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    List,
    Show { code: String },
    Convert { code: String, amount: String },
    Browse,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxview starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let metadata = Arc::new(config.metadata_table()?);
    let client: Arc<dyn ExchangeRateClient> =
        Arc::new(providers::RestRateClient::new(&config.backend.base_url)?);

    match command {
        AppCommand::List => {
            let mut presenter = RateListPresenter::new(client, metadata);
            cli::list::run(&mut presenter).await;
        }
        AppCommand::Show { code } => {
            let mut presenter = CurrencyDetailPresenter::new(client, metadata);
            cli::show::run(&mut presenter, &code.to_uppercase()).await;
        }
        AppCommand::Convert { code, amount } => {
            let mut calculator = Calculator::new(client);
            cli::convert::run(&mut calculator, &amount, &code.to_uppercase()).await;
        }
        AppCommand::Browse => {
            let mut list = RateListPresenter::new(Arc::clone(&client), Arc::clone(&metadata));
            let mut detail = CurrencyDetailPresenter::new(Arc::clone(&client), metadata);
            let mut calculator = Calculator::new(client);
            cli::browse::run(&mut list, &mut detail, &mut calculator).await?;
        }
    }

    Ok(())
}
