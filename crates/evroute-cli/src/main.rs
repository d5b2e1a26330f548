use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use evroute_cli::commands::charge::handle_charge;
use evroute_cli::commands::locations::handle_locations;
use evroute_cli::commands::menu::run_menu;
use evroute_cli::commands::route::{handle_route, RouteArgs};
use evroute_cli::output::OutputFormat;
use evroute_cli::session::{Session, SessionOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Electric vehicle route planner")]
struct Cli {
    /// Road network JSON file; overrides EVROUTE_NETWORK and the user config.
    #[arg(long, global = true)]
    network: Option<PathBuf>,

    /// Starting battery charge in kWh (defaults to a full battery).
    #[arg(long, global = true)]
    battery_level: Option<f64>,

    /// Starting location of the vehicle.
    #[arg(long, global = true)]
    location: Option<String>,

    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a trip and drive it if the battery allows.
    Route {
        /// Destination location name.
        #[arg(long = "to")]
        to: String,
        /// Starting location; the vehicle's location when omitted.
        #[arg(long = "from")]
        from: Option<String>,
    },
    /// Drive to the nearest charging station and recharge.
    Charge {
        /// Starting location; the vehicle's location when omitted.
        #[arg(long = "from")]
        from: Option<String>,
    },
    /// List the locations of the road network.
    Locations,
    /// Open the interactive main menu.
    Menu,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let options = SessionOptions {
        network: cli.network,
        battery_level: cli.battery_level,
        location: cli.location,
    };
    let mut session = Session::start(&options)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command.unwrap_or(Command::Menu) {
        Command::Route { to, from } => {
            handle_route(&mut session, &RouteArgs { to, from }, cli.format, &mut out)?;
        }
        Command::Charge { from } => {
            handle_charge(&mut session, from.as_deref(), cli.format, &mut out)?;
        }
        Command::Locations => {
            handle_locations(&session.network, cli.format, &mut out)?;
        }
        Command::Menu => {
            let stdin = io::stdin();
            run_menu(&mut session, &mut stdin.lock(), &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
