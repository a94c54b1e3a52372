//! Output formats for rendered selections.

use anyhow::Result;
use bridger_core::{ColorScheme, Settings};
use bridger_markup::html::escape;
use bridger_markup::{HtmlWriter, RenderNode, StyleVars, TerminalWriter};
use bridger_view::Rendition;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Ansi,
    Html,
    Json,
}

/// Format a rendition for stdout.
pub fn format_rendition(rendition: &Rendition, settings: &Settings, format: OutputFormat) -> Result<String> {
    match rendition {
        Rendition::Transformed { nodes } => format_nodes(nodes, settings, format),
        Rendition::Original { text } | Rendition::Pending { text } => match format {
            OutputFormat::Plain | OutputFormat::Ansi => Ok(text.clone()),
            OutputFormat::Html => Ok(format!("<span class=\"bridger-original\">{}</span>", escape(text))),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rendition)?),
        },
    }
}

pub fn format_nodes(nodes: &[RenderNode], settings: &Settings, format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Plain => TerminalWriter::from_settings(settings, false).write(nodes),
        OutputFormat::Ansi => TerminalWriter::from_settings(settings, true).write(nodes),
        OutputFormat::Html => {
            let style = StyleVars::from_settings(settings, ColorScheme::Light);
            HtmlWriter::to_html_with_style(nodes, &style)
        }
        OutputFormat::Json => serde_json::to_string_pretty(nodes)?,
    };
    Ok(out)
}
