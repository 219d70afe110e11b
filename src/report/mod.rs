//! The report region: what the user sees after a calculation, as terminal
//! text or as the HTML handed to the PDF renderer.

mod pdf;

use std::fmt::Write;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::domain::{
    types::{PLATFORMS_CAP, RECALL_MAX, SEO_MAX, WIKI_POINTS},
    ScoreBreakdown,
};

pub use pdf::{export_report, ExportError, PdfRenderer, WkHtmlToPdf};

const SUGGESTIONS: [&str; 4] = [
    "Create Wikidata/Wikipedia with credible sources.",
    "Publish GEO-powered articles (at least 20/month) on Medium, blogs, etc.",
    "Perform Data Injections.",
    "Add structured data (schema.org) to your website.",
];

/// Everything the report region needs besides the breakdown itself.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub logo_url: &'a str,
    pub contact: Option<&'a str>,
    pub generated_at: String,
}

impl<'a> ReportContext<'a> {
    pub fn new(
        logo_url: &'a str,
        contact: Option<&'a str>,
        timezone: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let tz: Tz = timezone.parse().unwrap_or(chrono_tz::UTC);
        Self {
            logo_url,
            contact,
            generated_at: now.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z").to_string(),
        }
    }
}

fn component_lines(breakdown: &ScoreBreakdown) -> [String; 4] {
    [
        format!("LLM Recall: {}/{}", breakdown.recall, RECALL_MAX),
        format!("Wikipedia/Wikidata Presence: {}/{}", breakdown.wiki, WIKI_POINTS),
        format!("Web & SEO Presence: {}/{}", breakdown.seo, SEO_MAX),
        format!(
            "Platform Visibility (incl. schema.org): {}/{}",
            breakdown.platforms, PLATFORMS_CAP
        ),
    ]
}

fn heading(breakdown: &ScoreBreakdown) -> String {
    format!("GEO Score for {}: {}/100", breakdown.brand, breakdown.total)
}

pub fn render_text(breakdown: &ScoreBreakdown, ctx: &ReportContext<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading(breakdown));
    if !ctx.logo_url.is_empty() {
        let _ = writeln!(out, "Logo: {}", ctx.logo_url);
    }
    for line in component_lines(breakdown) {
        let _ = writeln!(out, "  - {line}");
    }
    let _ = writeln!(out, "\nSuggestions to Improve:");
    for suggestion in SUGGESTIONS {
        let _ = writeln!(out, "  - {suggestion}");
    }
    if let Some(contact) = ctx.contact {
        let _ = writeln!(out, "\n{contact}");
    }
    let _ = writeln!(out, "\nGenerated {}", ctx.generated_at);
    out
}

pub fn render_html(breakdown: &ScoreBreakdown, ctx: &ReportContext<'_>) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">");
    let _ = write!(out, "<title>{}</title>", escape_html(&heading(breakdown)));
    out.push_str(
        "<style>body{font-family:sans-serif;color:#1f2937}\
         .report{background:#f3f4f6;padding:24px;border-radius:6px}\
         .brand{color:#2563eb}.logo{height:48px;width:48px;float:right}\
         .footer{margin-top:24px;border-top:1px solid #d1d5db;padding-top:16px;\
         text-align:center;font-size:0.9em}</style></head><body>\n",
    );
    out.push_str("<div class=\"report\">\n");
    if !ctx.logo_url.is_empty() {
        let _ = writeln!(
            out,
            "<img class=\"logo\" src=\"{}\" alt=\"Brand Logo\">",
            escape_html(ctx.logo_url)
        );
    }
    let _ = writeln!(
        out,
        "<h2>GEO Score for <span class=\"brand\">{}</span>: {}/100</h2>",
        escape_html(&breakdown.brand),
        breakdown.total
    );
    out.push_str("<ul>\n");
    for line in component_lines(breakdown) {
        let _ = writeln!(out, "<li>{}</li>", escape_html(&line));
    }
    out.push_str("</ul>\n<h3>Suggestions to Improve:</h3>\n<ul>\n");
    for suggestion in SUGGESTIONS {
        let _ = writeln!(out, "<li>{}</li>", escape_html(suggestion));
    }
    out.push_str("</ul>\n");
    if let Some(contact) = ctx.contact {
        let _ = writeln!(out, "<div class=\"footer\">{}</div>", escape_html(contact));
    }
    let _ = writeln!(out, "<p><small>Generated {}</small></p>", escape_html(&ctx.generated_at));
    out.push_str("</div>\n</body></html>\n");
    out
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
