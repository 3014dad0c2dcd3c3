mod command;
mod config;
mod github;
mod payload;
mod reply;
mod trigger;

use clap::Parser;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

use command::RawCommand;

/// smoke-responder — reads an automation event (JSON, or base64-encoded
/// compressed JSON) plus an optional command value, and acknowledges /smoke
/// invocations with a comment on the originating issue.
#[derive(Parser, Debug)]
#[command(name = "smoke-responder", version, about)]
struct Cli {
    /// Event payload: JSON text, or base64-encoded compressed JSON
    payload: String,

    /// Raw command value (plain name like "/smoke", or a JSON descriptor
    /// with a "name" field)
    #[arg(short, long)]
    command: Option<String>,

    /// Resolve the reply and print it to stdout instead of posting to GitHub
    /// (no token needed)
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let _main_span = info_span!("smoke_respond", dry_run = cli.dry_run).entered();

    let raw = RawCommand::from_input(cli.command.as_deref());
    let canonical = command::normalize(&raw);
    debug!(command = %canonical, "normalized command");

    info!("resolving event payload");
    let event = payload::resolve(&cli.payload, "event payload")?;

    let body = reply::comment_body(&event);
    if !trigger::is_triggered(&canonical, body) {
        info!("event does not invoke the smoke trigger");
        return Ok(());
    }
    info!("smoke trigger detected");

    if cli.dry_run {
        let facts = reply::ReplyFacts::from_payload(&event)?;
        println!("{}", reply::compose_body(&facts));
        info!(owner = %facts.owner, repo = %facts.repo, "dry run, nothing posted");
        return Ok(());
    }

    let config = config::Config::load()?;
    let responder = github::GitHubResponder::from_config(&config)?;
    let facts = reply::respond(&event, &responder).await?;
    info!(
        owner = %facts.owner,
        repo = %facts.repo,
        issue = facts.issue_number,
        comment = facts.comment_id,
        "acknowledgement posted"
    );

    Ok(())
}
