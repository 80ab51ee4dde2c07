use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "microcosm", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the particle expansion scene as numbered PNG frames.
    Expansion(SceneArgs),
    /// Render the replicating double helix scene as numbered PNG frames.
    Replication(SceneArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Output directory for the frame files.
    #[arg(long, default_value = microcosm::DEFAULT_OUTPUT_DIR)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let (stats, out_dir) = match cli.cmd {
        Command::Expansion(args) => (
            microcosm::render_expansion_scene_into(&args.out_dir)?,
            args.out_dir,
        ),
        Command::Replication(args) => (
            microcosm::render_replication_scene_into(&args.out_dir)?,
            args.out_dir,
        ),
    };

    eprintln!("wrote {} frames to {}", stats.frames, out_dir.display());
    Ok(())
}
