//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "lazytables")]
#[command(about = "Browse, search and sort tables from a tables API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// API origin, e.g. http://localhost:8000. Overrides the environment and config file.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file to read instead of the default location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Without a subcommand the interactive table browser starts.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an empty table.
    CreateTable {
        #[arg(long)]
        title: String,
    },

    /// Create a tag.
    CreateTag {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_runs_browser() {
        let cli = Cli::try_parse_from(["lazytables", "--api-url", "http://localhost:8000"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8000"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_create_tag_subcommand() {
        let cli = Cli::try_parse_from([
            "lazytables",
            "create-tag",
            "--title",
            "urgent",
            "--description",
            "Needs attention",
        ])
        .unwrap();
        match cli.command {
            Some(Command::CreateTag { title, description }) => {
                assert_eq!(title, "urgent");
                assert_eq!(description, "Needs attention");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "lazytables",
            "create-table",
            "--title",
            "Backlog",
            "--config",
            "/tmp/lt.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/lt.toml")));
        assert!(matches!(cli.command, Some(Command::CreateTable { .. })));
    }

    #[test]
    fn test_create_tag_requires_description() {
        assert!(Cli::try_parse_from(["lazytables", "create-tag", "--title", "x"]).is_err());
    }
}
