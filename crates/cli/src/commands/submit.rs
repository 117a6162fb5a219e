use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use tracing::warn;

use quotewire_core::config::{AppConfig, LoadOptions};
use quotewire_core::{submit_quote, DefaultsCatalog, QuoteRequest, SubmitError};
use quotewire_pbs::PbsQuoteClient;

use crate::commands::CommandResult;

#[derive(Debug, Default, Args)]
pub struct SubmitArgs {
    #[arg(long, help = "Customer full name")]
    pub name: Option<String>,
    #[arg(long, help = "Customer email address")]
    pub email: Option<String>,
    #[arg(long, help = "Customer phone number")]
    pub phone: Option<String>,
    #[arg(long = "address1", help = "Address line 1")]
    pub address_one: Option<String>,
    #[arg(long = "address2", default_value = "", help = "Address line 2 (optional)")]
    pub address_two: String,
    #[arg(long, help = "City")]
    pub city: Option<String>,
    #[arg(long, help = "State/region code")]
    pub state: Option<String>,
    #[arg(long, help = "ZIP/postal code")]
    pub zip: Option<String>,
    #[arg(long, help = "Coverage start date (YYYY-MM-DD)")]
    pub effective_date: Option<NaiveDate>,
    #[arg(long, help = "Premium dollar amount")]
    pub premium: Option<Decimal>,
    #[arg(long, help = "Fill unset fields from the built-in demonstration quote")]
    pub demo: bool,
}

pub fn run(args: SubmitArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult {
                exit_code: 2,
                output: format!("config validation failed: {error}"),
            }
        }
    };
    crate::init_logging(&config);

    let request = match build_request(args) {
        Ok(request) => request,
        Err(message) => return CommandResult { exit_code: 2, output: message },
    };

    let client = match PbsQuoteClient::from_config(&config.service, &config.http) {
        Ok(client) => client,
        Err(error) => return CommandResult { exit_code: 4, output: error.to_string() },
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult {
                exit_code: 4,
                output: format!("failed to initialize async runtime: {error}"),
            }
        }
    };

    let defaults = DefaultsCatalog::standard();
    let outcome = runtime.block_on(submit_quote(&client, &defaults, &request));

    match outcome {
        Ok(quote_number) => {
            CommandResult { exit_code: 0, output: format!("Quote number: {quote_number}") }
        }
        Err(SubmitError::QuoteGeneration { errors }) => {
            let mut lines = vec!["The quoting service rejected the request:".to_string()];
            lines.extend(errors.into_iter().map(|error| format!("  - {error}")));
            CommandResult { exit_code: 3, output: lines.join("\n") }
        }
        Err(SubmitError::Communication { message, diagnostics }) => {
            warn!(
                event_name = "quote.submit.communication_diagnostics",
                diagnostics = %diagnostics.join("; "),
                "communication failure diagnostics"
            );
            CommandResult { exit_code: 4, output: message }
        }
    }
}

fn build_request(args: SubmitArgs) -> Result<QuoteRequest, String> {
    let demo = args.demo;
    let name = resolve(args.name, demo, "Molly Terrier", "name")?;
    let email = resolve(args.email, demo, "foo@bar.com", "email")?;
    let phone = resolve(args.phone, demo, "888.555.1212", "phone")?;
    let address_one = resolve(args.address_one, demo, "123 Main St.", "address1")?;
    let address_two = if args.address_two.is_empty() && demo {
        "Apt. D-22".to_string()
    } else {
        args.address_two
    };
    let city = resolve(args.city, demo, "Foo", "city")?;
    let state = resolve(args.state, demo, "TX", "state")?;
    let zip = resolve(args.zip, demo, "01234", "zip")?;

    let effective_date = match (args.effective_date, demo) {
        (Some(date), _) => date,
        (None, true) => "2019-03-05"
            .parse::<NaiveDate>()
            .map_err(|error| format!("demo effective date failed to parse: {error}"))?,
        (None, false) => return Err(missing_flag("effective-date")),
    };
    let premium = match (args.premium, demo) {
        (Some(premium), _) => premium,
        (None, true) => Decimal::from(1275),
        (None, false) => return Err(missing_flag("premium")),
    };

    QuoteRequest::new(
        name,
        email,
        phone,
        address_one,
        address_two,
        city,
        state,
        zip,
        effective_date,
        premium,
    )
    .map_err(|error| format!("invalid quote request: {error}"))
}

fn resolve(
    value: Option<String>,
    demo: bool,
    demo_value: &str,
    flag: &str,
) -> Result<String, String> {
    match value {
        Some(value) => Ok(value),
        None if demo => Ok(demo_value.to_string()),
        None => Err(missing_flag(flag)),
    }
}

fn missing_flag(flag: &str) -> String {
    format!("missing --{flag} (pass a value, or use --demo for the demonstration quote)")
}
