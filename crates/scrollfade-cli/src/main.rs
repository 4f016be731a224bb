//! Scrollfade - scroll-driven fades in the terminal
//!
//! A terminal host for the scrollfade core:
//! - Interactive demo page with fade, reveal and parallax sections
//! - Fade curve inspection for any configured preset
//! - Settings and preset listing

use anyhow::Result;
use clap::{Parser, Subcommand};

use scrollfade_core::{paths, Settings};

mod curve;
mod tui;

/// Scrollfade - scroll-driven fades
#[derive(Parser)]
#[command(name = "scrollfade")]
#[command(about = "Scroll-driven fade effects in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll through the demo page (default)
    Demo,

    /// Print the opacity curve for a fade preset
    Curve {
        /// Preset name, or "default" for the [fade] section
        #[arg(short, long, default_value = "default")]
        preset: String,
        /// Viewport height
        #[arg(long, default_value_t = 800.0)]
        viewport: f64,
        /// Element height
        #[arg(long, default_value_t = 200.0)]
        height: f64,
        /// Distance between samples
        #[arg(long, default_value_t = 50.0)]
        step: f64,
    },

    /// Show the settings file location and effective settings
    Config,

    /// List fade presets
    Presets,
}

/// Log to a file so output never lands on the alternate screen
fn init_logging() {
    let log_dir = paths::logs_dir();
    std::fs::create_dir_all(&log_dir).ok();

    let Ok(log_file) = std::fs::File::create(log_dir.join("scrollfade.log")) else {
        // No writable log location; run without logging
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    tui::install_panic_hook();
    init_logging();

    let cli = Cli::parse();
    let settings = Settings::load()?;

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => {
            let (width, height) = crossterm::terminal::size()?;
            tracing::info!(width, height, "Starting demo");
            let mut app = tui::App::new(settings, width, height);
            app.run().await?;
        }
        Commands::Curve {
            preset,
            viewport,
            height,
            step,
        } => {
            let config = settings.fade_preset(&preset)?;
            curve::print_curve(&preset, &config, viewport, height, step)?;
        }
        Commands::Config => {
            let path = paths::config_file();
            let status = if path.exists() { "" } else { " (not present, using defaults)" };
            println!("Settings file: {}{}", path.display(), status);
            println!("Logs: {}", paths::logs_dir().display());
            println!();
            print!("{}", toml::to_string_pretty(&settings)?);
        }
        Commands::Presets => {
            println!("Fade presets ({}):", settings.preset_names().len());
            for name in settings.preset_names() {
                let config = settings.fade_preset(name)?;
                println!(
                    "  {:<10} in {:.2}×{:.2}  out {:.2}  initial {:.2}  min {:.2}",
                    name,
                    config.fade_in_point,
                    config.fade_in_duration,
                    config.fade_out_point,
                    config.initial_opacity,
                    config.min_opacity
                );
            }
        }
    }

    Ok(())
}
