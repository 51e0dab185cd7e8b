use crate::commands::CommandResult;
use boardquote_core::config::{AppConfig, LoadOptions};
use boardquote_core::domain::quote::QuoteId;
use boardquote_core::policy::PolicyTable;
use boardquote_db::{connect_pool, QuotingService, ServiceError};

pub fn run(quote_id: &str) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "totals",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "totals",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect_pool(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        let service = QuotingService::new(
            pool.clone(),
            PolicyTable::standard(),
            config.pricing.price_book(),
        );
        let totals = service
            .compute_totals(&QuoteId(quote_id.to_owned()))
            .await
            .map_err(|error| match error {
                ServiceError::Domain(domain) => ("quote_lookup", domain.to_string(), 5u8),
                other => ("totals_computation", other.to_string(), 6u8),
            });

        pool.close().await;
        totals
    });

    match result {
        Ok(totals) => match serde_json::to_string(&totals) {
            Ok(rendered) => CommandResult::success("totals", rendered),
            Err(error) => CommandResult::failure(
                "totals",
                "serialization",
                format!("could not render totals: {error}"),
                6,
            ),
        },
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("totals", error_class, message, exit_code)
        }
    }
}
