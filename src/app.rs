use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    config::AppConfig,
    console::{parse_command, ConsoleCommand, HELP},
    infrastructure::{directories::ResolvedPaths, shutdown::Shutdown},
    report::{self, ExportError, PdfRenderer, ReportContext, WkHtmlToPdf},
    scoring::ScoreCalculator,
    signals::{ProxyMarkupFetcher, WikipediaSearch},
    widget::{CalculateOutcome, Phase, ScoreWidget, WidgetSnapshot},
};

pub struct GeoScoreApp {
    widget: Arc<ScoreWidget>,
    renderer: Arc<dyn PdfRenderer>,
    config: Arc<AppConfig>,
    reports_dir: PathBuf,
}

impl GeoScoreApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths) -> Result<Self> {
        let config = Arc::new(config);

        let http_client = Client::builder()
            .user_agent(format!("geo-score/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let calculator = ScoreCalculator::new(
            Arc::new(WikipediaSearch::new(
                http_client.clone(),
                config.signals.clone(),
            )),
            Arc::new(ProxyMarkupFetcher::new(http_client, config.signals.clone())),
            config.favicon.clone(),
        );

        Ok(Self {
            widget: Arc::new(ScoreWidget::new(calculator)),
            renderer: Arc::new(WkHtmlToPdf::new(config.report.renderer_bin.clone())),
            config,
            reports_dir: paths.reports_dir,
        })
    }

    /// One-shot mode: score `url`, print it, optionally export.
    pub async fn run_once(&self, url: &str, export: bool, json: bool) -> Result<()> {
        if url.trim().is_empty() {
            anyhow::bail!("empty URL: nothing to score");
        }
        self.widget.set_url(url);
        let snapshot = match self.widget.calculate().await {
            CalculateOutcome::Published(snapshot) => snapshot,
            CalculateOutcome::Skipped(reason) => {
                anyhow::bail!("nothing to score: {}", reason.label())
            }
        };

        if json {
            let breakdown = snapshot.breakdown.as_ref().context("score was not published")?;
            println!("{}", serde_json::to_string_pretty(breakdown)?);
        } else {
            print!("{}", self.render_text(&snapshot).unwrap_or_default());
        }

        if export {
            let path = self.export(&snapshot).await?;
            eprintln!("saved {}", path.display());
        }
        Ok(())
    }

    pub async fn run_interactive(&self, shutdown: Shutdown) -> Result<()> {
        let mut shutdown_listener = shutdown.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("GEO score console. Type a URL to score it, `help` for commands.");
        loop {
            if shutdown_listener.is_triggered() {
                break;
            }
            let line = tokio::select! {
                _ = shutdown_listener.notified() => {
                    tracing::info!(target: "console", "shutdown requested");
                    break;
                }
                line = lines.next_line() => line?,
            };
            let Some(line) = line else {
                break;
            };

            match parse_command(&line) {
                ConsoleCommand::Empty => {}
                ConsoleCommand::Help => println!("{HELP}"),
                ConsoleCommand::Quit => break,
                ConsoleCommand::SetUrl(url) => {
                    self.widget.set_url(url);
                }
                ConsoleCommand::Calculate => self.spawn_calculation(),
                ConsoleCommand::Submit(url) => {
                    self.widget.set_url(url);
                    self.spawn_calculation();
                }
                ConsoleCommand::Reset => match self.widget.reset() {
                    Ok(_) => println!("cleared"),
                    Err(reason) => println!("cannot reset: {}", reason.label()),
                },
                ConsoleCommand::Show => self.print_snapshot(&self.widget.snapshot()),
                ConsoleCommand::Export => match self.export(&self.widget.snapshot()).await {
                    Ok(path) => println!("saved {}", path.display()),
                    Err(err) => println!("export failed: {err}"),
                },
            }
        }
        Ok(())
    }

    /// Runs in the background so the console stays responsive; the widget
    /// turns away overlapping requests on its own.
    fn spawn_calculation(&self) {
        let widget = self.widget.clone();
        let render = self.text_renderer();
        tokio::spawn(async move {
            match widget.calculate().await {
                CalculateOutcome::Published(snapshot) => {
                    if let Some(text) = render(&snapshot) {
                        print!("{text}");
                    }
                }
                CalculateOutcome::Skipped(reason) => println!("skipped: {}", reason.label()),
            }
        });
    }

    fn print_snapshot(&self, snapshot: &WidgetSnapshot) {
        let url = if snapshot.url.is_empty() { "-" } else { &snapshot.url };
        println!("url: {url}");
        match snapshot.phase {
            Phase::Calculating => println!("calculating..."),
            Phase::Idle => println!("no score yet"),
            Phase::Ready => print!("{}", self.render_text(snapshot).unwrap_or_default()),
        }
    }

    async fn export(&self, snapshot: &WidgetSnapshot) -> Result<PathBuf, ExportError> {
        let breakdown = snapshot.breakdown.as_ref().ok_or(ExportError::NoResult)?;
        let ctx = self.report_context(&snapshot.logo_url);
        let html = report::render_html(breakdown, &ctx);
        report::export_report(
            self.renderer.as_ref(),
            &self.reports_dir,
            &breakdown.brand,
            &html,
        )
        .await
    }

    fn render_text(&self, snapshot: &WidgetSnapshot) -> Option<String> {
        (self.text_renderer())(snapshot)
    }

    fn text_renderer(&self) -> impl Fn(&WidgetSnapshot) -> Option<String> + Send + 'static {
        let config = self.config.clone();
        move |snapshot: &WidgetSnapshot| {
            let breakdown = snapshot.breakdown.as_ref()?;
            let ctx = ReportContext::new(
                &snapshot.logo_url,
                config.report.contact.as_deref(),
                &config.report.timezone,
                Utc::now(),
            );
            Some(report::render_text(breakdown, &ctx))
        }
    }

    fn report_context<'a>(&'a self, logo_url: &'a str) -> ReportContext<'a> {
        ReportContext::new(
            logo_url,
            self.config.report.contact.as_deref(),
            &self.config.report.timezone,
            Utc::now(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        env::{LoggingConfig, ReportConfig},
        DirectoryConfig, FaviconConfig, SignalConfig,
    };

    fn app_in(dir: &std::path::Path) -> GeoScoreApp {
        let config = AppConfig {
            directories: DirectoryConfig {
                logs_dir: dir.display().to_string(),
                reports_dir: dir.display().to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            signals: SignalConfig::default(),
            favicon: FaviconConfig::default(),
            report: ReportConfig::default(),
        };
        let paths = ResolvedPaths {
            logs_dir: dir.to_path_buf(),
            reports_dir: dir.to_path_buf(),
        };
        GeoScoreApp::initialize(config, paths).unwrap()
    }

    #[tokio::test]
    async fn blank_url_is_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(dir.path());

        for url in ["", "   "] {
            let err = app.run_once(url, false, false).await.unwrap_err();
            assert_eq!(err.to_string(), "empty URL: nothing to score");
        }
        assert_eq!(app.widget.snapshot().phase, Phase::Idle);
    }

    #[tokio::test]
    async fn export_without_score_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(dir.path());

        let err = app.export(&app.widget.snapshot()).await.unwrap_err();
        assert!(matches!(err, ExportError::NoResult));
    }
}
