//! Roost - print Mastodon and Pleroma timelines from the terminal
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use roost::models::{Notification, Status};
use roost::{Config, Mentions, Scope, TimelineModule, TimelineSpace};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match parse_args()? {
        Command::Timeline { scope, pages } => timeline_cli(scope, pages).await,
        Command::Instance => instance_cli().await,
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            println!("roost {}", roost::VERSION);
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Timeline { scope: Scope, pages: usize },
    Instance,
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Help);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),
        "instance" => Ok(Command::Instance),

        "timeline" | "tl" => {
            let name = args
                .get(2)
                .filter(|a| !a.starts_with('-'))
                .map_or("home", String::as_str);
            let scope = Scope::parse(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown timeline: {name}"))?;
            let pages = args
                .iter()
                .position(|a| a == "--pages" || a == "-p")
                .and_then(|i| args.get(i + 1))
                .and_then(|s| s.parse().ok())
                .unwrap_or(1);
            Ok(Command::Timeline { scope, pages })
        }

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'roost --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"🐦 Roost - Mastodon and Pleroma timelines

USAGE:
    roost [COMMAND]

COMMANDS:
    timeline [name] [--pages N]        Print a timeline (default: home)
      Names: home, local, public, mentions, notifications, #tag, list:<id>
    instance                           Show server type and character limit
    help                               Show this help
    version                            Show version

CONFIG:
    {config_path}
"#
    );
}

fn load_space() -> Result<TimelineSpace> {
    let config = Config::load()?;
    let space = TimelineSpace::from_config(&config);
    if space.account.is_none() {
        anyhow::bail!("No account configured: set `instance` and `access_token` in the config file");
    }
    Ok(space)
}

async fn instance_cli() -> Result<()> {
    let mut space = load_space()?;
    space
        .detect_instance()
        .await
        .context("Failed to fetch instance info")?;
    println!("{} (toot max {})", space.sns, space.toot_max);
    Ok(())
}

async fn timeline_cli(scope: Scope, pages: usize) -> Result<()> {
    let space = load_space()?;
    let client = space.client().context("No account configured")?;

    match scope {
        Scope::Mentions => {
            let mut mentions = Mentions::new();
            mentions.fetch(&client).await?;
            for _ in 1..pages {
                let Some(anchor) = mentions.mentions().last().cloned() else {
                    break;
                };
                if mentions.lazy_fetch_mentions(&client, &anchor).await? == 0 {
                    break;
                }
            }
            mentions.mentions().iter().for_each(print_notification);
        }
        Scope::Notifications => {
            let mut module = TimelineModule::<Notification>::new();
            fetch_pages(&mut module, &client, &scope, pages).await?;
            module.timeline().iter().for_each(print_notification);
        }
        _ => {
            let mut module = TimelineModule::<Status>::new();
            fetch_pages(&mut module, &client, &scope, pages).await?;
            module.timeline().iter().for_each(print_status);
        }
    }

    Ok(())
}

async fn fetch_pages<T, S>(
    module: &mut TimelineModule<T>,
    source: &S,
    scope: &Scope,
    pages: usize,
) -> Result<()>
where
    T: roost::TimelineEntry + Clone,
    S: roost::TimelineSource<T>,
{
    module
        .fetch(source, scope)
        .await
        .with_context(|| format!("Failed to fetch {scope}"))?;

    for _ in 1..pages {
        let Some(anchor) = module.timeline().last().cloned() else {
            break;
        };
        let added = module
            .lazy_fetch(source, scope, &anchor)
            .await
            .with_context(|| format!("Failed to fetch older entries of {scope}"))?;
        if added == 0 {
            break;
        }
    }

    Ok(())
}

fn print_status(status: &Status) {
    let shown = status.original();
    let boost = if status.is_reblog() {
        format!(" (boosted by {})", status.account.full_handle())
    } else {
        String::new()
    };
    println!(
        "{:>4}  {}{}\n      {}\n",
        shown.relative_time(),
        shown.account.full_handle(),
        boost,
        shown.preview(100)
    );
}

fn print_notification(notification: &Notification) {
    let preview = notification
        .status
        .as_ref()
        .map(|s| s.preview(100))
        .unwrap_or_default();
    println!(
        "{:<9} {}\n      {}\n",
        notification.kind.as_str(),
        notification.account.full_handle(),
        preview
    );
}
