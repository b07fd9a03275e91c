use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ai_release_notes::cli::{Cli, Commands};
use ai_release_notes::config::{FileConfig, RemoteSettings, Settings};
use ai_release_notes::git::GitRepository;
use ai_release_notes::github::{GitHubClient, Release, ReleasePublisher};
use ai_release_notes::pipeline;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.common.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "warn,ai_release_notes=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let file = FileConfig::load(cli.common.config.as_deref())?;

    match cli.command {
        None => {
            let settings = Settings::resolve(&cli.common, &cli.generate, &file)?;
            let git = GitRepository::new(".");
            pipeline::run(settings, &git).await?;
        }
        Some(Commands::Show { tag, json }) => {
            let remote = RemoteSettings::resolve(&cli.common, &file)?;
            let client = GitHubClient::new(remote.target.token, remote.target.api_url.as_deref())?;
            let publisher = ReleasePublisher::new(client);

            match publisher.release(&remote.repo, &tag).await? {
                Some(release) if json => println!("{}", serde_json::to_string_pretty(&release)?),
                Some(release) => {
                    println!("✓ {}: Release {} found", remote.repo, tag);
                    print_release(&release);
                }
                None => {
                    println!("✗ {}: Release {} not found", remote.repo, tag);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::List { limit, json }) => {
            let remote = RemoteSettings::resolve(&cli.common, &file)?;
            let client = GitHubClient::new(remote.target.token, remote.target.api_url.as_deref())?;
            let publisher = ReleasePublisher::new(client);

            let releases = publisher.releases(&remote.repo, Some(limit)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&releases)?);
                return Ok(());
            }

            println!("Recent releases for {} (limit: {}):", remote.repo, limit);
            println!();
            if releases.is_empty() {
                println!("  No releases found");
            }
            for release in releases {
                let date = release
                    .published_at
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "unpublished".to_string());
                println!("  - {}: {}{}", release.tag_name, date, flags(&release));
            }
        }
    }

    Ok(())
}

fn print_release(release: &Release) {
    println!("  Title: {}", release.name.as_deref().unwrap_or(&release.tag_name));
    if let Some(published) = release.published_at {
        println!("  Published: {}", published.format("%Y-%m-%d"));
    }
    let flags = flags(release);
    if !flags.is_empty() {
        println!("  Flags:{}", flags);
    }
    println!("  URL: {}", release.html_url);
    if let Some(body) = release.body.as_deref().filter(|b| !b.trim().is_empty()) {
        println!();
        println!("{}", body);
    }
}

fn flags(release: &Release) -> String {
    let mut flags = String::new();
    if release.draft {
        flags.push_str(" [draft]");
    }
    if release.prerelease {
        flags.push_str(" [prerelease]");
    }
    flags
}
