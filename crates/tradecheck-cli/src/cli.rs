//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Tradecheck: data-quality validation for trading platform tables
#[derive(Parser)]
#[command(name = "tradecheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Database host
    #[arg(long, env = "PGHOST", default_value = "localhost")]
    pub host: String,

    /// Database port
    #[arg(long, env = "PGPORT", default_value = "5432")]
    pub port: u16,

    /// Database name
    #[arg(long, env = "PGDATABASE", default_value = "trading")]
    pub dbname: String,

    /// Database user
    #[arg(long, env = "PGUSER", default_value = "postgres")]
    pub user: String,

    /// Database password
    #[arg(long, env = "PGPASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Query producing the users table
    #[arg(long, default_value = "SELECT * FROM users;")]
    pub users_query: String,

    /// Query producing the trades table
    #[arg(long, default_value = "SELECT * FROM trades;")]
    pub trades_query: String,

    /// Read the users table from a CSV file instead of the database
    #[arg(long, value_name = "FILE", requires = "trades_csv")]
    pub users_csv: Option<PathBuf>,

    /// Read the trades table from a CSV file instead of the database
    #[arg(long, value_name = "FILE", requires = "users_csv")]
    pub trades_csv: Option<PathBuf>,

    /// Enable verbose diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}
