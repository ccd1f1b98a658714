use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser};
use regionmark::Config;
use regionmark::input::InputState;
use regionmark::replay::ReplayScript;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "regionmark")]
#[command(version, about = "Interaction engine for annotating captured screen regions")]
struct Cli {
    /// Replay a JSON event script and print the resulting scene as JSON
    #[arg(long, short = 'r', value_name = "SCRIPT")]
    replay: Option<PathBuf>,

    /// Config file to use instead of ~/.config/regionmark/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the effective configuration (after clamping) as TOML
    #[arg(long, action = ArgAction::SetTrue)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if cli.print_config {
        let rendered = toml::to_string_pretty(&config).context("Failed to serialize config")?;
        print!("{rendered}");
    } else if let Some(script) = &cli.replay {
        replay(&config, script)?;
    } else {
        println!("regionmark: Interaction engine for annotating captured screen regions");
        println!();
        println!("Usage:");
        println!("  regionmark --replay <SCRIPT>   Run a JSON event script, print the scene");
        println!("  regionmark --print-config      Show the effective configuration");
        println!("  regionmark --help              Show help");
        println!();
        println!("Default controls:");
        println!("  V / R / A / T     Select, rectangle, arrow, text tools");
        println!("  Tab               Toggle region selection");
        println!("  Ctrl+Z / Ctrl+Y   Undo / redo");
        println!("  Ctrl+C / X / V    Copy, cut, paste");
        println!("  [ / ]             Send backward / bring forward");
        println!("  Escape            Cancel, leave tool, exit");
    }

    Ok(())
}

fn replay(config: &Config, script_path: &Path) -> Result<()> {
    let payload = std::fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read replay script {}", script_path.display()))?;
    let script = ReplayScript::from_json(&payload)
        .with_context(|| format!("Invalid replay script {}", script_path.display()))?;

    let mut state =
        InputState::from_config(config).map_err(|err| anyhow!("Invalid keybindings: {err}"))?;

    log::info!(
        "Replaying {} events from {}",
        script.events.len(),
        script_path.display()
    );
    let outcome = script
        .run(&mut state)
        .with_context(|| format!("Replay of {} failed", script_path.display()))?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
