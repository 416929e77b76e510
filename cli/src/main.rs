use clap::Parser;
use std::io;
use sweeper_core::{Coord, GameConfig};

mod game;
mod input;
mod render;
mod theme;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board height
    #[arg(short, long, default_value_t = GameConfig::DEFAULT_SIZE.0)]
    rows: Coord,

    /// Board width
    #[arg(short, long, default_value_t = GameConfig::DEFAULT_SIZE.1)]
    columns: Coord,

    /// Fraction of cells holding a mine
    #[arg(short, long, default_value_t = GameConfig::DEFAULT_DENSITY)]
    density: f64,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Draw with plain ASCII glyphs
    #[arg(long)]
    ascii: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
    log::debug!("{:?}", args);

    let config = GameConfig::new((args.rows, args.columns), args.density)?;
    let mut session = game::Session::new(config, args.seed)?;

    let theme = if args.ascii {
        theme::Theme::ASCII
    } else {
        theme::Theme::default()
    };
    let mut renderer = render::Renderer::new(io::stdout().lock(), theme);
    renderer.usage()?;

    game::run(&mut session, io::stdin().lock(), &mut renderer)
}
