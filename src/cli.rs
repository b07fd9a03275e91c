use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::github::DEFAULT_PAGE_SIZE;

#[derive(Debug, Parser)]
#[command(name = "ai-release-notes", version)]
#[command(about = "Generate AI-powered release notes for GitHub releases")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

/// Options shared by every mode.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Repository in format owner/repo
    #[arg(short, long, env = "GITHUB_REPOSITORY", global = true)]
    pub repo: Option<String>,

    /// GitHub token for API access
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub github_token: Option<String>,

    /// TOML config file (defaults to .release-notes.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Git tag to generate release notes for
    #[arg(short, long, conflicts_with = "latest")]
    pub tag: Option<String>,

    /// Use the most recent tag (auto-detected)
    #[arg(short, long)]
    pub latest: bool,

    /// Previous tag to compare against (auto-detected if not provided)
    #[arg(long)]
    pub previous_tag: Option<String>,

    /// AI provider to use [default: openai]
    #[arg(short, long)]
    pub provider: Option<String>,

    /// API key for the AI provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// AI model to use [default: gpt-5-mini]
    #[arg(long, env = "OPENAI_MODEL")]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub base_url: Option<String>,

    /// List commit subjects instead of calling an AI provider
    #[arg(long)]
    pub no_ai: bool,

    /// Release title (defaults to the tag)
    #[arg(long)]
    pub title: Option<String>,

    /// Publish the release as a draft
    #[arg(long)]
    pub draft: bool,

    /// Mark the release as a prerelease (auto-detected from the tag if omitted)
    #[arg(long, value_name = "BOOL")]
    pub prerelease: Option<bool>,

    /// Also write the generated notes to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Generate notes without creating a release
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show the release published for a tag
    Show {
        tag: String,

        /// Print the release as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recent releases
    List {
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u8).range(1..=100))]
        limit: u8,

        /// Print the releases as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "ai-release-notes",
            "--tag",
            "v1.2.0",
            "--previous-tag",
            "v1.1.0",
            "--provider",
            "OpenAI",
            "--dry-run",
            "--no-ai",
            "--prerelease",
            "false",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.generate.tag.as_deref(), Some("v1.2.0"));
        assert_eq!(cli.generate.previous_tag.as_deref(), Some("v1.1.0"));
        assert_eq!(cli.generate.provider.as_deref(), Some("OpenAI"));
        assert_eq!(cli.generate.prerelease, Some(false));
        assert!(cli.generate.dry_run);
        assert!(cli.generate.no_ai);
        assert!(!cli.generate.latest);
    }

    #[test]
    fn tag_and_latest_are_exclusive() {
        assert!(Cli::try_parse_from(["ai-release-notes", "--tag", "v1.0.0", "--latest"]).is_err());
    }

    #[test]
    fn parses_list_subcommand() {
        let cli = Cli::try_parse_from(["ai-release-notes", "list", "--limit", "5"]).unwrap();

        match cli.command {
            Some(Commands::List { limit, json }) => {
                assert_eq!(limit, 5);
                assert!(!json);
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn common_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "ai-release-notes",
            "show",
            "v1.0.0",
            "--repo",
            "acme/widgets",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.common.repo.as_deref(), Some("acme/widgets"));
        assert!(cli.common.verbose);
        assert!(matches!(cli.command, Some(Commands::Show { ref tag, json: false }) if tag == "v1.0.0"));
    }

    #[test]
    fn generate_flags_are_rejected_with_a_subcommand() {
        assert!(Cli::try_parse_from(["ai-release-notes", "--tag", "v1.0.0", "show", "v1.0.0"]).is_err());
        assert!(Cli::try_parse_from(["ai-release-notes", "list", "--dry-run"]).is_err());
    }

    #[test]
    fn list_limit_is_bounded() {
        assert!(Cli::try_parse_from(["ai-release-notes", "list", "--limit", "0"]).is_err());
        assert!(Cli::try_parse_from(["ai-release-notes", "list", "--limit", "101"]).is_err());
    }
}
