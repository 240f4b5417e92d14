use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use spotwatch::Sandbox;
use spotwatch::logging;
use spotwatch::repl::readline;
use spotwatch_core::{AnimationId, Handle, NpcId, SettingsExt, TrackerSettings, WorldPoint};

fn main() -> Result<(), String> {
    logging::init();
    let mut sandbox = Sandbox::new(TrackerSettings::load_or_default());

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut sandbox) {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "spotwatch sandbox")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter the world
    Login,
    /// Return to the login screen
    Logout,
    /// Hop to another world
    Hop,
    /// Spawn an NPC, printing its handle
    Spawn {
        npc_id: NpcId,
        x: i32,
        y: i32,
        #[arg(long, default_value_t = 0)]
        plane: i32,
    },
    /// Remove an NPC
    Despawn {
        handle: u32,
        /// Remove without delivering a despawn event
        #[arg(long)]
        silent: bool,
    },
    /// Teleport an NPC to another tile
    Move {
        handle: u32,
        x: i32,
        y: i32,
        #[arg(long, default_value_t = 0)]
        plane: i32,
    },
    /// Advance the clock
    Tick {
        #[arg(default_value_t = 1)]
        count: u32,
    },
    /// Interact with an NPC, or "none" to stop
    Target { handle: String },
    /// Set the local player's animation
    Animate {
        #[arg(allow_negative_numbers = true)]
        animation: AnimationId,
    },
    /// Show tracked spots and overlay markers
    Status,
    /// Render the overlay to a PNG file
    Snapshot { path: PathBuf },
    /// Save or reload tracker settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    Exit,
}

#[derive(Subcommand)]
enum SettingsAction {
    Save,
    Load,
}

fn respond(line: &str, sandbox: &mut Sandbox) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "spotwatch".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Login) => sandbox.login(),
        Some(Commands::Logout) => sandbox.logout(),
        Some(Commands::Hop) => sandbox.hop(),
        Some(Commands::Spawn {
            npc_id,
            x,
            y,
            plane,
        }) => {
            let handle = sandbox.spawn(npc_id, WorldPoint::new(x, y, plane));
            println!("spawned {} at tick {}", handle, sandbox.tick_count());
        }
        Some(Commands::Despawn { handle, silent }) => {
            if !sandbox.despawn(Handle(handle), silent) {
                println!("no live npc {}", Handle(handle));
            }
        }
        Some(Commands::Move {
            handle,
            x,
            y,
            plane,
        }) => {
            if !sandbox.move_npc(Handle(handle), WorldPoint::new(x, y, plane)) {
                println!("no live npc {}", Handle(handle));
            }
        }
        Some(Commands::Tick { count }) => {
            for message in sandbox.tick(count) {
                println!("[chat] {message}");
            }
            println!("tick {}", sandbox.tick_count());
        }
        Some(Commands::Target { handle }) => {
            let target = if handle.eq_ignore_ascii_case("none") {
                None
            } else {
                let id = handle
                    .parse::<u32>()
                    .map_err(|e| format!("error: invalid handle '{handle}': {e}\n"))?;
                Some(Handle(id))
            };
            sandbox.target(target);
        }
        Some(Commands::Animate { animation }) => sandbox.animate(animation),
        Some(Commands::Status) => print_status(sandbox),
        Some(Commands::Snapshot { path }) => {
            let markers = sandbox.snapshot(&path).map_err(|e| format!("{e}\n"))?;
            println!("wrote {} markers to {}", markers, path.display());
        }
        Some(Commands::Settings { action }) => match action {
            SettingsAction::Save => {
                sandbox
                    .session()
                    .settings()
                    .save()
                    .map_err(|e| format!("{e}\n"))?;
                println!("settings saved");
            }
            SettingsAction::Load => {
                let settings = TrackerSettings::load().map_err(|e| format!("{e}\n"))?;
                sandbox.set_settings(settings);
                println!("settings loaded");
            }
        },
        Some(Commands::Exit) => {
            write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
            std::io::stdout().flush().map_err(|e| e.to_string())?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

fn print_status(sandbox: &Sandbox) {
    let tracker = sandbox.session().tracker();
    println!(
        "tick {}: {} tracked, {} cached",
        sandbox.tick_count(),
        tracker.len(),
        tracker.departures().len()
    );
    for line in sandbox.status_lines() {
        println!("  {line}");
    }

    let overlay = sandbox.overlay();
    for marker in &overlay.markers {
        println!(
            "  marker {} {} {}",
            marker.handle,
            marker.kind.name,
            marker.timer_text.as_deref().unwrap_or("-")
        );
    }
    if !overlay.dots.is_empty() {
        println!("  {} minimap dots", overlay.dots.len());
    }
}
