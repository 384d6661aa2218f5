use camino::Utf8PathBuf;
use clap::Parser;

mod log;

pub(crate) use log::LogLevel;

#[derive(Debug, Parser)]
#[command(name = "pgmodel", version)]
/// Generate Rust structs from the tables and views of a Postgres database
pub(crate) struct Args {
    /// Server address as host:port
    #[arg(short, long, default_value = "localhost:5432")]
    pub addr: String,
    /// User to connect as
    #[arg(short, long, default_value = "postgres")]
    pub user: String,
    /// Password for the user
    #[arg(
        short,
        long,
        env = "PGMODEL_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    pub password: String,
    /// Database to introspect
    #[arg(short = 'n', long, default_value = "postgres")]
    pub dbname: String,
    /// Connection string, either `postgres://…` or `key=value` pairs.
    /// Takes precedence over --addr, --user, --password and --dbname.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
    /// Comma-separated schema names. Defaults to every user schema.
    #[arg(short, long, default_value = "")]
    pub schemas: String,
    /// Comma-separated table or view names. When set, --kind is ignored.
    #[arg(short, long, default_value = "")]
    pub tables: String,
    /// Relation kind: `r`/`t`/`table` for tables, `v`/`view` for views,
    /// anything else for both
    #[arg(short, long, default_value = "")]
    pub kind: String,
    /// Wrap the generated structs in `pub mod <MODULE>`
    #[arg(short, long)]
    pub module: Option<String>,
    /// Write the generated code to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,
    /// Set the logging level
    #[arg(long = "log", env = "PGMODEL_LOG")]
    pub log_level: Option<LogLevel>,
}
