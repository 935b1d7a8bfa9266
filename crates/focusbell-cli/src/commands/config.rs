use clap::Subcommand;
use focusbell_core::{Config, FOCUS_PRESETS_MIN};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as JSON
    Show,
    /// Set the focus duration preset in minutes
    SetFocus {
        minutes: u64,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::SetFocus { minutes } => {
            let mut config = Config::load();
            if config.set_focus_minutes(minutes) {
                config.save()?;
                println!("focus duration set to {minutes} minutes");
            } else {
                println!(
                    "{minutes} is not an available preset (choose one of {FOCUS_PRESETS_MIN:?})"
                );
            }
        }
    }
    Ok(())
}
