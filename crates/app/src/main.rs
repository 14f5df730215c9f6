use clap::Parser;

use commands::{Command, Context};
use report::Report;
use settings::{Settings, SettingsArgs};

mod commands;
mod currency;
mod error;
mod records;
mod report;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "farmcost")]
#[command(about = "Production cost and amortization reports for a livestock farm")]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli.settings)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "farmcost={level},cost_engine={level}",
            level = settings.log_level
        ))
        .init();

    let expenses = records::load(settings.expenses.as_deref(), records::read_expenses)?;
    let sales = records::load(settings.sales.as_deref(), records::read_sales)?;
    tracing::info!(
        "loaded {} expenses and {} sales",
        expenses.len(),
        sales.len()
    );

    let ctx = Context::new(&settings, expenses, sales)?;
    let report = Report {
        currency: settings.currency()?,
        duration_months: ctx.duration_months,
        data: cli.command.run(&ctx)?,
    };
    println!("{}", report::render(&report, settings.decimals()?)?);

    Ok(())
}
