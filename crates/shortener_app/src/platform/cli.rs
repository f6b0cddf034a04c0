use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "isgd_shortener", version, about = "Shorten URLs with is.gd")]
pub(crate) struct Cli {
    /// RON configuration file (defaults to ./isgd_shortener.ron when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Override the shortening endpoint.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
    #[command(subcommand)]
    pub surface: Option<SurfaceCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub(crate) enum SurfaceCommand {
    /// Interactive window: each line read from stdin is shortened.
    Window,
    /// Toolbar handler: shortens the active page URL handed over by the browser.
    Toolbar {
        #[arg(long)]
        page_url: String,
        /// Popover buttons to press once the short URL is available.
        #[arg(long = "then", value_enum)]
        then: Vec<ToolbarAction>,
    },
}

/// Post-success buttons offered by the toolbar popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ToolbarAction {
    Mail,
    Share,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_the_default_surface() {
        let cli = Cli::try_parse_from(["isgd_shortener"]).unwrap();
        assert_eq!(cli.surface, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn toolbar_takes_page_url_and_global_flags() {
        let cli = Cli::try_parse_from([
            "isgd_shortener",
            "toolbar",
            "--page-url",
            "https://example.com/page",
            "--endpoint",
            "http://127.0.0.1:9000/create.php",
        ])
        .unwrap();
        assert_eq!(
            cli.surface,
            Some(SurfaceCommand::Toolbar {
                page_url: "https://example.com/page".to_string(),
                then: Vec::new(),
            })
        );
        assert_eq!(
            cli.endpoint.as_deref(),
            Some("http://127.0.0.1:9000/create.php")
        );
    }

    #[test]
    fn toolbar_collects_follow_up_actions_in_order() {
        let cli = Cli::try_parse_from([
            "isgd_shortener",
            "toolbar",
            "--page-url",
            "https://example.com",
            "--then",
            "share",
            "--then",
            "mail",
        ])
        .unwrap();
        let Some(SurfaceCommand::Toolbar { then, .. }) = cli.surface else {
            panic!("expected toolbar surface");
        };
        assert_eq!(then, vec![ToolbarAction::Share, ToolbarAction::Mail]);
    }

    #[test]
    fn toolbar_rejects_unknown_follow_up() {
        assert!(Cli::try_parse_from([
            "isgd_shortener",
            "toolbar",
            "--page-url",
            "https://example.com",
            "--then",
            "print",
        ])
        .is_err());
    }

    #[test]
    fn toolbar_requires_page_url() {
        assert!(Cli::try_parse_from(["isgd_shortener", "toolbar"]).is_err());
    }
}
