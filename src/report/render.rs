use crossterm::style::{Color, Stylize};

use crate::error::{Error, Result};
use crate::models::{AnalyzedArticle, Diagnostic, SentimentLabel};
use crate::report::dashboard::Dashboard;

const BAR_WIDTH: usize = 40;
const TITLE_WIDTH: usize = 60;

pub fn render(dashboard: &Dashboard, format: &str, colored: bool) -> Result<String> {
    match format {
        "text" => Ok(format_text(dashboard, colored)),
        "markdown" | "md" => Ok(format_markdown(dashboard)),
        "json" => Ok(serde_json::to_string_pretty(dashboard)?),
        "html" => Ok(format_html(dashboard)),
        other => Err(Error::Config(format!(
            "Unknown output format {:?} (expected text, markdown, json or html)",
            other
        ))),
    }
}

fn bar_len(count: usize, max: usize) -> usize {
    if max == 0 || count == 0 {
        return 0;
    }
    (count * BAR_WIDTH / max).max(1)
}

fn terminal_color(label: SentimentLabel) -> Color {
    match label {
        SentimentLabel::Positive => Color::Green,
        SentimentLabel::Negative => Color::Red,
        SentimentLabel::Neutral => Color::Grey,
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn published(analyzed: &AnalyzedArticle) -> String {
    analyzed
        .article
        .published_at
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn diagnostic_line(diagnostic: &Diagnostic) -> String {
    if diagnostic.is_error() {
        format!("[error] {}", diagnostic)
    } else {
        format!("[warning] {}", diagnostic)
    }
}

pub fn format_text(dashboard: &Dashboard, colored: bool) -> String {
    let mut output = String::new();

    output.push_str("\n=== Real-Time News Sentiment Dashboard ===\n\n");

    if let Some(ref diagnostic) = dashboard.diagnostic {
        output.push_str(&format!("{}\n", diagnostic_line(diagnostic)));
    }

    if !dashboard.has_results() {
        output.push_str(&format!("{}\n", dashboard.status));
        return output;
    }

    output.push_str(&format!("{}\n", dashboard.status));
    if dashboard.from_cache {
        output.push_str(&format!(
            "(cached result from {})\n",
            dashboard.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output.push_str(&format!(
        "\nTotal Articles: {}    Positive: {}    Negative: {}\n",
        dashboard.counts.total, dashboard.counts.positive, dashboard.counts.negative
    ));

    // Chart
    output.push_str(&format!("\nSentiment Distribution ({})\n", dashboard.chart_title));
    let max = dashboard.max_bar();
    for bar in &dashboard.chart {
        let blocks = "█".repeat(bar_len(bar.count, max));
        let blocks = if colored {
            blocks.with(terminal_color(bar.label)).to_string()
        } else {
            blocks
        };
        output.push_str(&format!("  {:<8} | {} {}\n", bar.label.as_str(), blocks, bar.count));
    }

    // Table
    output.push_str("\nAnalyzed Headlines:\n");
    for (i, analyzed) in dashboard.articles.iter().enumerate() {
        let label = analyzed.sentiment_label.as_str();
        let label = if colored {
            label.with(terminal_color(analyzed.sentiment_label)).to_string()
        } else {
            label.to_string()
        };
        output.push_str(&format!(
            "  {:>2}. {} [{}]\n      {} ({:+.3})",
            i + 1,
            truncate(&analyzed.article.title, TITLE_WIDTH),
            analyzed.article.source,
            label,
            analyzed.sentiment_score
        ));
        let when = published(analyzed);
        if !when.is_empty() {
            output.push_str(&format!("  published {}", when));
        }
        output.push_str(&format!("\n      {}\n", analyzed.article.url));
    }

    output
}

fn escape_markdown_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

pub fn format_markdown(dashboard: &Dashboard) -> String {
    let mut output = String::new();

    output.push_str("# Real-Time News Sentiment Dashboard\n\n");

    if let Some(ref diagnostic) = dashboard.diagnostic {
        output.push_str(&format!("> {}\n\n", diagnostic_line(diagnostic)));
    }

    output.push_str(&format!("{}\n\n", dashboard.status));
    if !dashboard.has_results() {
        return output;
    }

    output.push_str("| Total Articles | Positive | Negative |\n");
    output.push_str("|----------------|----------|----------|\n");
    output.push_str(&format!(
        "| {} | {} | {} |\n",
        dashboard.counts.total, dashboard.counts.positive, dashboard.counts.negative
    ));

    output.push_str(&format!("\n## {}\n\n", dashboard.chart_title));
    output.push_str("| Sentiment | Count |\n|-----------|-------|\n");
    for bar in &dashboard.chart {
        output.push_str(&format!("| {} | {} |\n", bar.label, bar.count));
    }

    output.push_str("\n## Analyzed Headlines\n\n");
    output.push_str("| Title | Source | Published | Score | Sentiment | Article Link |\n");
    output.push_str("|-------|--------|-----------|-------|-----------|--------------|\n");
    for analyzed in &dashboard.articles {
        let link = if analyzed.article.url.is_empty() {
            String::new()
        } else {
            format!("[link]({})", analyzed.article.url)
        };
        output.push_str(&format!(
            "| {} | {} | {} | {:.3} | {} | {} |\n",
            escape_markdown_cell(&analyzed.article.title),
            escape_markdown_cell(&analyzed.article.source),
            published(analyzed),
            analyzed.sentiment_score,
            analyzed.sentiment_label,
            link
        ));
    }

    output.push_str(&format!(
        "\n---\n*Analyzed on {}*\n",
        dashboard.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn svg_chart(dashboard: &Dashboard) -> String {
    const HEIGHT: usize = 200;
    const SLOT: usize = 120;
    const BAR: usize = 40;

    let max = dashboard.max_bar().max(1);
    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" role=\"img\" aria-label=\"{}\">\n",
        SLOT * dashboard.chart.len(),
        HEIGHT + 40,
        escape_html(&dashboard.chart_title)
    );

    for (i, bar) in dashboard.chart.iter().enumerate() {
        let h = bar.count * HEIGHT / max;
        let x = i * SLOT + (SLOT - BAR) / 2;
        let y = HEIGHT - h;
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"><title>{}: {}</title></rect>\n",
            x, y, BAR, h, bar.color, bar.label, bar.count
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\">{} ({})</text>\n",
            i * SLOT + SLOT / 2,
            HEIGHT + 20,
            bar.label,
            bar.count
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

pub fn format_html(dashboard: &Dashboard) -> String {
    let mut output = String::new();

    output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    output.push_str("<title>News Sentiment Dashboard</title>\n");
    output.push_str(
        "<style>body{font-family:sans-serif;margin:2em}table{border-collapse:collapse;width:100%}\
         td,th{border:1px solid #ddd;padding:4px 8px;text-align:left}\
         .metrics{display:flex;gap:3em}.metric b{display:block;font-size:2em}\
         .error{color:#d62728}.warning{color:#b8860b}</style>\n",
    );
    output.push_str("</head>\n<body>\n<h1>Real-Time News Sentiment Dashboard</h1>\n");

    if let Some(ref diagnostic) = dashboard.diagnostic {
        let class = if diagnostic.is_error() { "error" } else { "warning" };
        output.push_str(&format!(
            "<p class=\"{}\">{}</p>\n",
            class,
            escape_html(&diagnostic.to_string())
        ));
    }

    output.push_str(&format!("<p>{}</p>\n", escape_html(&dashboard.status)));

    if dashboard.has_results() {
        output.push_str("<div class=\"metrics\">\n");
        output.push_str(&format!(
            "<div class=\"metric\">Total Articles<b>{}</b></div>\n",
            dashboard.counts.total
        ));
        output.push_str(&format!(
            "<div class=\"metric\">Positive<b>{}</b></div>\n",
            dashboard.counts.positive
        ));
        output.push_str(&format!(
            "<div class=\"metric\">Negative<b>{}</b></div>\n",
            dashboard.counts.negative
        ));
        output.push_str("</div>\n");

        output.push_str(&format!(
            "<h2>Sentiment Distribution</h2>\n<h3>{}</h3>\n",
            escape_html(&dashboard.chart_title)
        ));
        output.push_str(&svg_chart(dashboard));

        output.push_str("<h2>Analyzed Headlines</h2>\n<table>\n");
        output.push_str("<tr><th>Title</th><th>Source</th><th>Published</th><th>Score</th>");
        output.push_str("<th>Sentiment</th><th>Article Link</th></tr>\n");
        for analyzed in &dashboard.articles {
            let url = escape_html(&analyzed.article.url);
            output.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.3}</td>",
                escape_html(&analyzed.article.title),
                escape_html(&analyzed.article.source),
                published(analyzed),
                analyzed.sentiment_score
            ));
            output.push_str(&format!(
                "<td style=\"color:{}\">{}</td><td><a href=\"{}\">{}</a></td></tr>\n",
                analyzed.sentiment_label.color(),
                analyzed.sentiment_label,
                url,
                url
            ));
        }
        output.push_str("</table>\n");
    }

    output.push_str("</body>\n</html>\n");
    output
}
