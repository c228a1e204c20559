use clap::{Parser, Subcommand};
use sectorwheel::ItemId;
use sectorwheel::control::{ControlCommand, SOCKET_PATH};
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "sectorwheel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the circle menu
    Show,
    /// Hide the circle menu
    Hide,
    /// Rotate the menu to an absolute angle in degrees
    Rotate {
        #[arg(allow_hyphen_values = true)]
        angle: i32,
    },
    /// Select a sector by its 1-based id and snap it home
    Select { id: u32 },
}

impl From<Commands> for ControlCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Show => ControlCommand::Show,
            Commands::Hide => ControlCommand::Hide,
            Commands::Rotate { angle } => ControlCommand::Rotate(angle),
            Commands::Select { id } => ControlCommand::Select(ItemId::new(id)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    send_command(ControlCommand::from(cli.command))
}

fn send_command(command: ControlCommand) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to circlemenu at {}: {}. Is circlemenu running?",
            SOCKET_PATH,
            e
        )
    })?;

    log::debug!("sending '{}'", command);
    writeln!(stream, "{}", command)?;
    Ok(())
}
