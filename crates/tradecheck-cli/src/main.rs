//! Tradecheck CLI - batch data-quality validation for trading tables.

mod cli;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tradecheck::{
    ConsoleSink, CsvSource, PostgresConfig, PostgresSource, QaConfig, QaReport, QaRunner,
};

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match run(&cli) {
        Ok(report) => {
            print_summary(&report);
            if report.summary.failed > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> tradecheck::Result<QaReport> {
    let runner = QaRunner::with_config(QaConfig {
        users_query: cli.users_query.clone(),
        trades_query: cli.trades_query.clone(),
    });
    let sink = ConsoleSink;

    match (&cli.users_csv, &cli.trades_csv) {
        (Some(users), Some(trades)) => {
            let mut source = CsvSource::new()
                .with_table("users", users)
                .with_table("trades", trades);
            runner.run(&mut source, &sink)
        }
        _ => {
            let mut source = PostgresSource::new(PostgresConfig {
                host: cli.host.clone(),
                port: cli.port,
                dbname: cli.dbname.clone(),
                user: cli.user.clone(),
                password: cli.password.clone(),
            });
            let report = runner.run(&mut source, &sink);
            source.close();
            report
        }
    }
}

fn print_summary(report: &QaReport) {
    println!();
    println!("{}", "Summary".bold());
    println!("  checks run: {}", report.summary.total);
    println!("  passed:     {}", report.summary.passed.to_string().green());
    if report.summary.failed > 0 {
        println!("  failed:     {}", report.summary.failed.to_string().red().bold());
        for outcome in report.outcomes.iter().filter(|o| !o.passed) {
            println!("    {} {}", "✗".red(), outcome.description);
        }
    } else {
        println!("  failed:     0");
    }
}
