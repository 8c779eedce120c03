use clap::{Parser, Subcommand, ValueEnum};

use crate::{action_channel::DEFAULT_ACTION_PORT, geometry::Side, monitor::MonitorIdentifier};

/// Struct that gets generated from `RawOpt`.
#[derive(Debug, PartialEq)]
pub struct Opt {
    pub log_debug: bool,
    pub config_path: Option<std::path::PathBuf>,
    pub action: Action,
}

#[derive(Parser, Debug, PartialEq)]
#[command(version, about, long_about = None)]
pub(super) struct RawOpt {
    /// Write out debug logs.
    #[arg(long = "debug", global = true)]
    log_debug: bool,

    /// Override the path to the configuration directory (the directory that contains dockbar.scss)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Action {
    /// Show a notification bar on the active monitor and wait until it is closed.
    #[command(name = "show", alias = "s")]
    Show(BarArgs),

    /// Send an action selection to a running bar.
    #[command(name = "action", alias = "a")]
    SendAction {
        /// Index of the selected action, as a non-negative integer.
        action: String,

        /// Loopback port the bar listens on.
        #[arg(long, default_value_t = DEFAULT_ACTION_PORT)]
        port: u16,
    },

    /// Generate a shell completion script
    #[command(name = "shell-completions")]
    ShellCompletions {
        #[arg(short, long)]
        shell: clap_complete::Shell,
    },
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct BarArgs {
    /// Notification urgency
    #[arg(short, long, value_enum, default_value_t = Urgency::Normal)]
    pub urgency: Urgency,

    /// Message to display
    #[arg(short, long, default_value = "")]
    pub message: String,

    /// Labels of the buttons to show. Button N selects action N, counting from 0.
    #[arg(short = 'b', long = "button", num_args = 1..)]
    pub buttons: Vec<String>,

    /// Close the bar after this many seconds. 0 keeps it open until an action is selected.
    #[arg(short, long, default_value_t = 20)]
    pub timeout: u64,

    /// Height of the bar in pixels
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..=i32::MAX as i64))]
    pub height: u32,

    /// Screen edge to dock the bar to
    #[arg(long, value_enum, default_value_t = Side::Top)]
    pub side: Side,

    /// Monitor to show the bar on, by index or model name. Defaults to the monitor of the active window.
    #[arg(long)]
    pub screen: Option<MonitorIdentifier>,

    /// Notification id reported in bus signals
    #[arg(long, default_value_t = 0)]
    pub id: u32,

    /// Don't emit signals on the notification bus
    #[arg(long)]
    pub no_bus: bool,

    /// Loopback port to listen on for action selections
    #[arg(long, default_value_t = DEFAULT_ACTION_PORT)]
    pub port: u16,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum Urgency {
    #[display("low")]
    Low,
    #[default]
    #[display("normal")]
    Normal,
    #[display("critical")]
    Critical,
}

impl Opt {
    pub fn from_env() -> Self {
        let raw: RawOpt = RawOpt::parse();
        raw.into()
    }
}

impl From<RawOpt> for Opt {
    fn from(other: RawOpt) -> Self {
        let RawOpt { action, log_debug, config } = other;
        Opt { action, log_debug, config_path: config }
    }
}
