//! Configuration and CLI argument handling

use clap::Parser;

use crate::tasks::FinishAction;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "eta-countdown")]
#[command(about = "A countdown controller that renders an eta into named displays")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Countdown duration in minutes used when a reset names none
    #[arg(short, long, default_value = "10", value_parser = parse_minutes)]
    pub max_time: f64,

    /// Arm the countdown with the max time as soon as the server starts
    #[arg(long)]
    pub autostart: bool,

    /// Display to register at startup (repeatable)
    #[arg(long = "display", value_name = "NAME", default_value = "timer")]
    pub displays: Vec<String>,

    /// Shell command to run every time a countdown finishes
    #[arg(long, value_name = "CMD")]
    pub on_finish: Option<String>,

    /// Reset the countdown to the max time after it finishes
    #[arg(long)]
    pub rearm: bool,

    /// Mirror every rendered text into the log
    #[arg(long)]
    pub log_ticks: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_minutes(value: &str) -> Result<f64, String> {
    let minutes: f64 = value
        .parse()
        .map_err(|e| format!("`{}` is not a number: {}", value, e))?;
    if !minutes.is_finite() || minutes < 0.0 {
        return Err(format!("`{}` is not a non-negative number of minutes", value));
    }
    Ok(minutes)
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// What to do whenever a countdown finishes
    pub fn finish_action(&self) -> FinishAction {
        FinishAction {
            command: self.on_finish.clone(),
            rearm: self.rearm,
        }
    }
}
