use clap::{Parser, Subcommand};

/// Top-level CLI for the GEO score tool.
#[derive(Debug, Parser)]
#[command(name = "geo-score", version)]
#[command(about = "Synthetic generative-engine visibility score for a website", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Score one URL and print the breakdown.
    Score {
        /// Website URL, e.g. https://example.com
        url: String,

        /// Also export the report as a PDF.
        #[arg(long)]
        export: bool,

        /// Print the breakdown as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Line-oriented console (default).
    Interactive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_score_flags() {
        let cli = Cli::parse_from(["geo-score", "score", "https://example.com", "--json"]);
        match cli.command {
            Some(CliCommand::Score { url, export, json }) => {
                assert_eq!(url, "https://example.com");
                assert!(!export);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_means_console() {
        assert!(Cli::parse_from(["geo-score"]).command.is_none());
    }
}
