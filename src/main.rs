use anyhow::Result;
use clap::{Parser, ValueEnum};
use term_snake::game::{GameConfig, Speed};
use term_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Classic Snake for the terminal")]
struct Cli {
    /// Start with wrap-around walls: crossing an edge teleports the snake
    /// to the opposite side instead of ending the game
    #[arg(long)]
    wrap: bool,

    /// Game tick speed
    #[arg(long, value_enum, default_value = "normal")]
    speed: SpeedArg,

    /// Grid width in cells
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(5..))]
    width: u16,

    /// Grid height in cells
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(5..))]
    height: u16,
}

#[derive(Clone, Copy, ValueEnum)]
enum SpeedArg {
    Normal,
    Fast,
}

impl From<SpeedArg> for Speed {
    fn from(arg: SpeedArg) -> Self {
        match arg {
            SpeedArg::Normal => Speed::Normal,
            SpeedArg::Fast => Speed::Fast,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig {
        grid_width: cli.width as usize,
        grid_height: cli.height as usize,
        wrap: cli.wrap,
        speed: cli.speed.into(),
        ..GameConfig::default()
    };

    let mut mode = HumanMode::new(config);
    mode.run().await
}
