use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use futures::{future::BoxFuture, FutureExt};
use thiserror::Error;
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::{info, warn};

const AVOID_BREAKS_CSS: &str = "<style>*{page-break-inside:avoid;break-inside:avoid}</style>";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("there is no score to export yet")]
    NoResult,
    #[error("failed to start PDF renderer {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("PDF renderer exited with {status}: {stderr}")]
    RendererFailed { status: String, stderr: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
}

/// Fixed rendering setup for every exported report.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    pub margin_mm: u32,
    pub jpeg_quality: f32,
    pub scale: u32,
    pub cross_origin_images: bool,
    pub page_size: &'static str,
    pub orientation: Orientation,
    pub avoid_page_breaks: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            margin_mm: 10,
            jpeg_quality: 0.98,
            scale: 2,
            cross_origin_images: true,
            page_size: "A4",
            orientation: Orientation::Portrait,
            avoid_page_breaks: true,
        }
    }
}

/// Turns an HTML document into a PDF file at `output`.
pub trait PdfRenderer: Send + Sync {
    fn render<'a>(
        &'a self,
        html: &'a str,
        options: &'a PdfOptions,
        output: &'a Path,
    ) -> BoxFuture<'a, Result<(), ExportError>>;
}

/// Pipes the report into the `wkhtmltopdf` executable.
pub struct WkHtmlToPdf {
    bin: String,
}

impl WkHtmlToPdf {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    fn args(options: &PdfOptions, output: &Path) -> Vec<String> {
        let margin = format!("{}mm", options.margin_mm);
        let mut args = vec!["--quiet".to_string(), "--encoding".into(), "utf-8".into()];
        for side in ["top", "right", "bottom", "left"] {
            args.push(format!("--margin-{side}"));
            args.push(margin.clone());
        }
        let orientation = match options.orientation {
            Orientation::Portrait => "Portrait",
        };
        args.extend([
            "--page-size".into(),
            options.page_size.to_string(),
            "--orientation".into(),
            orientation.to_string(),
            "--image-quality".into(),
            ((options.jpeg_quality * 100.0).round() as u32).to_string(),
            "--dpi".into(),
            (96 * options.scale).to_string(),
        ]);
        if options.cross_origin_images {
            args.extend([
                "--images".into(),
                "--load-media-error-handling".into(),
                "ignore".into(),
            ]);
        }
        args.push("-".into());
        args.push(output.display().to_string());
        args
    }

    async fn run(
        &self,
        html: &str,
        options: &PdfOptions,
        output: &Path,
    ) -> Result<(), ExportError> {
        let mut child = Command::new(&self.bin)
            .args(Self::args(options, output))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExportError::Spawn {
                bin: self.bin.clone(),
                source,
            })?;

        // stdin is fed while stderr is drained; either pipe can fill up first.
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(html.as_bytes()).await?;
                stdin.shutdown().await?;
            }
            Ok::<_, std::io::Error>(())
        };
        let (fed, result) = tokio::join!(feed, child.wait_with_output());

        let result = result?;
        if !result.status.success() {
            return Err(ExportError::RendererFailed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        fed?;
        Ok(())
    }
}

impl PdfRenderer for WkHtmlToPdf {
    fn render<'a>(
        &'a self,
        html: &'a str,
        options: &'a PdfOptions,
        output: &'a Path,
    ) -> BoxFuture<'a, Result<(), ExportError>> {
        self.run(html, options, output).boxed()
    }
}

/// `<brand>_GEO_Score_Report.pdf`, with path separators neutralised.
pub fn report_file_name(brand: &str) -> String {
    let safe: String = brand
        .chars()
        .map(|ch| if matches!(ch, '/' | '\\') { '_' } else { ch })
        .collect();
    format!("{safe}_GEO_Score_Report.pdf")
}

pub async fn export_report(
    renderer: &dyn PdfRenderer,
    reports_dir: &Path,
    brand: &str,
    html: &str,
) -> Result<PathBuf, ExportError> {
    let options = PdfOptions::default();
    let output = reports_dir.join(report_file_name(brand));

    let document = if options.avoid_page_breaks {
        html.replacen("</head>", &format!("{AVOID_BREAKS_CSS}</head>"), 1)
    } else {
        html.to_string()
    };

    match renderer.render(&document, &options, &output).await {
        Ok(()) => {
            info!(target: "export", path = %output.display(), "report exported");
            Ok(output)
        }
        Err(err) => {
            warn!(target: "export", error = %err, brand, "report export failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingRenderer {
        seen: Mutex<Option<(String, PdfOptions)>>,
    }

    impl PdfRenderer for RecordingRenderer {
        fn render<'a>(
            &'a self,
            html: &'a str,
            options: &'a PdfOptions,
            output: &'a Path,
        ) -> BoxFuture<'a, Result<(), ExportError>> {
            *self.seen.lock() = Some((html.to_string(), options.clone()));
            async move {
                tokio::fs::write(output, b"%PDF-1.4").await?;
                Ok(())
            }
            .boxed()
        }
    }

    struct BrokenRenderer;

    impl PdfRenderer for BrokenRenderer {
        fn render<'a>(
            &'a self,
            _html: &'a str,
            _options: &'a PdfOptions,
            _output: &'a Path,
        ) -> BoxFuture<'a, Result<(), ExportError>> {
            async {
                Err(ExportError::RendererFailed {
                    status: "exit status: 1".into(),
                    stderr: "boom".into(),
                })
            }
            .boxed()
        }
    }

    #[test]
    fn file_name_follows_brand() {
        assert_eq!(report_file_name("example"), "example_GEO_Score_Report.pdf");
        assert_eq!(report_file_name("a/b\\c"), "a_b_c_GEO_Score_Report.pdf");
    }

    #[test]
    fn wkhtmltopdf_flags_follow_options() {
        let args = WkHtmlToPdf::args(&PdfOptions::default(), Path::new("/tmp/out.pdf"));
        let joined = args.join(" ");
        assert!(joined.contains(
            "--margin-top 10mm --margin-right 10mm --margin-bottom 10mm --margin-left 10mm"
        ));
        assert!(joined.contains("--page-size A4 --orientation Portrait"));
        assert!(joined.contains("--image-quality 98"));
        assert!(joined.contains("--dpi 192"));
        assert!(joined.contains("--images"));
        assert!(joined.ends_with("- /tmp/out.pdf"));
    }

    #[tokio::test]
    async fn writes_named_report_with_fixed_options() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = RecordingRenderer::default();

        let path = export_report(&renderer, dir.path(), "example", "<html><head></head></html>")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("example_GEO_Score_Report.pdf"));
        assert!(path.exists());
        let (html, options) = renderer.seen.lock().take().unwrap();
        assert!(html.contains("page-break-inside:avoid"));
        assert_eq!(options, PdfOptions::default());
    }

    #[tokio::test]
    async fn renderer_failure_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_report(&BrokenRenderer, dir.path(), "example", "<html></html>")
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::RendererFailed { .. }));
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = WkHtmlToPdf::new("definitely-not-a-real-pdf-renderer");
        let err = export_report(&renderer, dir.path(), "example", "<html></html>")
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn chatty_renderer_does_not_stall() {
        use std::{os::unix::fs::PermissionsExt, time::Duration};

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-renderer.sh");
        // Floods stderr past the pipe buffer before reading any input.
        std::fs::write(
            &script,
            "#!/bin/sh\nfor last; do :; done\n\
             head -c 262144 /dev/zero | tr '\\0' x >&2\n\
             cat > \"$last\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let renderer = WkHtmlToPdf::new(script.display().to_string());
        let html = format!("<html><head></head><body>{}</body></html>", "y".repeat(262_144));

        let path = tokio::time::timeout(
            Duration::from_secs(30),
            export_report(&renderer, dir.path(), "example", &html),
        )
        .await
        .expect("renderer pipes deadlocked")
        .unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.ends_with("</body></html>"));
        assert!(written.contains("page-break-inside:avoid"));
    }
}
