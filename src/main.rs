use anyhow::{Context, Result};
use midjourney_feed::config::Config;
use midjourney_feed::{FeedClient, HttpTransport, Preset, RecentJobs};
use std::path::Path;

fn print_page(page: &RecentJobs) {
    println!("--- page {} ({} jobs) ---", page.page.max(1), page.jobs.len());
    for job in &page.jobs {
        let prompt = job
            .prompt
            .as_deref()
            .or(job.full_command.as_deref())
            .unwrap_or("");
        let user = job.username.as_deref().unwrap_or("?");
        println!("{}  {:<16}  {}", job.id, user, prompt);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "midjourney_feed=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // usage: midjourney-feed [config.toml] [preset]
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load(Path::new(&config_path))?;

    // Load saved values from .env (real env vars take precedence)
    Config::load_env_file();

    let token = Config::session_token();
    if token.is_none() {
        tracing::warn!("MIDJOURNEY_SESSION_TOKEN not set, requests are unauthenticated");
    }
    let transport = HttpTransport::new(
        token.as_deref(),
        &config.api.user_agent,
        config.api.request_timeout(),
    )?;
    let client = FeedClient::new(transport, &config.api.base_url)?;

    let preset: Preset = match args.next() {
        Some(name) => name.parse()?,
        None => config.feed.preset,
    };
    let user_id = config.user_id().unwrap_or_default();
    if preset.requires_user() && user_id.is_empty() {
        anyhow::bail!("{} feed needs MIDJOURNEY_USER_ID or feed.user_id", preset);
    }
    tracing::info!(%preset, pages = config.feed.pages, "fetching feed");

    let mut page = client
        .preset(preset, &user_id)
        .await
        .with_context(|| format!("failed to fetch {} feed", preset))?;
    print_page(&page);

    for _ in 1..config.feed.pages {
        if page.jobs.is_empty() {
            break;
        }
        page = client
            .next_page(&page)
            .await
            .with_context(|| format!("failed to fetch {} feed page", preset))?;
        print_page(&page);
    }

    Ok(())
}
