use anyhow::{Context, Result};
use clap::CommandFactory as _;
use notification_bus::NotificationBus;

use crate::{app::BarOutcome, paths::DockbarPaths};

mod action;
mod action_channel;
mod app;
mod application_lifecycle;
mod bar;
mod bar_process;
mod display_backend;
mod error_handling_ctx;
mod geometry;
mod monitor;
mod opts;
mod paths;
mod style;
mod util;

fn main() {
    let opts: opts::Opt = opts::Opt::from_env();

    let log_level_filter = if opts.log_debug { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    if std::env::var("RUST_LOG").is_ok() {
        pretty_env_logger::init_timed();
    } else {
        pretty_env_logger::formatted_timed_builder()
            .filter(Some("dockbar"), log_level_filter)
            .filter(Some("notification_bus"), log_level_filter)
            .init();
    }

    if let Err(err) = run(opts) {
        error_handling_ctx::print_error(err);
        std::process::exit(1);
    }
}

fn run(opts: opts::Opt) -> Result<()> {
    match opts.action {
        opts::Action::ShellCompletions { shell } => {
            clap_complete::generate(shell, &mut opts::RawOpt::command(), "dockbar", &mut std::io::stdout());
        }
        opts::Action::SendAction { action, port } => {
            let action = action_channel::send_action(&action, port)?;
            log::info!("Sent action {} to the bar on port {}", action, port);
        }
        opts::Action::Show(args) => {
            let paths = opts
                .config_path
                .map(DockbarPaths::from_config_dir)
                .unwrap_or_else(DockbarPaths::default)
                .context("Failed to initialize dockbar paths")?;

            let (id, emit_signals) = (args.id, !args.no_bus);
            let outcome = bar_process::run_bar(paths, args)?;
            if let BarOutcome::ActionInvoked(action) = outcome {
                println!("{}", action);
            }

            if emit_signals {
                let result = emit_bus_signals(id, outcome);
                crate::print_result_err!("while emitting notification bus signals", result);
            }
        }
    }
    Ok(())
}

/// Tell the notification daemon how the bar ended.
fn emit_bus_signals(id: u32, outcome: BarOutcome) -> Result<()> {
    let signals = outcome.signals(id);
    let rt = tokio::runtime::Builder::new_current_thread()
        .thread_name("emit-bus-signals")
        .enable_all()
        .build()
        .context("Failed to initialize tokio runtime")?;
    rt.block_on(async {
        let bus = NotificationBus::connect().await?;
        bus.emit_all(&signals).await?;
        log::debug!("emitted {} signal(s) on the notification bus", signals.len());
        Ok::<(), anyhow::Error>(())
    })
}
