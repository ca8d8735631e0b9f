use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "warpwin",
    about = "WarpGrid rolling window — inspect max/min over a trailing time span",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a sample file through a time window.
    ///
    /// Each input line is `<unix_seconds> <value>`. Blank lines and lines
    /// starting with `#` are skipped. Flags override values from --config.
    Replay {
        /// Sample file to replay
        #[arg(short, long)]
        input: String,
        /// TOML file with `duration` and `granularity`
        #[arg(short, long)]
        config: Option<String>,
        /// Trailing span to retain (e.g., 5m)
        #[arg(long)]
        duration: Option<String>,
        /// Width of one bucket (e.g., 60s)
        #[arg(long)]
        granularity: Option<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("warpgrid_window_cli=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            input,
            config,
            duration,
            granularity,
            format,
        } => commands::replay::replay(&commands::replay::ReplayArgs {
            input: &input,
            config: config.as_deref(),
            duration: duration.as_deref(),
            granularity: granularity.as_deref(),
            format: &format,
        }),
    }
}
