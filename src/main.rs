use std::io::{IsTerminal, Write};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use newsdash::report::render;
use newsdash::{Config, Dashboard, GNewsClient, LexiconScorer, PipelineConfig, SentimentPipeline};

const FORMATS: &[&str] = &["text", "markdown", "md", "json", "html"];

#[derive(Parser, Debug)]
#[command(name = "newsdash")]
#[command(version = "0.1.0")]
#[command(about = "Fetch news for a topic and chart the sentiment of its headlines")]
struct Args {
    /// News topic to analyze (omit to start an interactive session)
    #[arg(short, long)]
    topic: Option<String>,

    /// GNews API key (defaults to GNEWS_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Output format (text, markdown, json, html)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Disable colors in text output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so reports on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("newsdash=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    if !FORMATS.contains(&args.format.as_str()) {
        anyhow::bail!(
            "Unknown output format {:?} (expected text, markdown, json or html)",
            args.format
        );
    }

    let config = Config::from_env()?;

    let credential = match args.api_key.clone().or_else(|| config.gnews_api_key.clone()) {
        Some(key) => key,
        None if std::io::stdin().is_terminal() => prompt_secret("Enter your GNews API Key: ")?,
        None => String::new(),
    };
    let credential = credential.trim().to_string();

    if credential.is_empty() {
        eprintln!(
            "Enter your GNews API key (--api-key or GNEWS_API_KEY) and a topic to fetch and analyze news."
        );
        return Ok(());
    }

    let news = GNewsClient::with_base_url(&config.gnews_base_url)?;
    let pipeline =
        SentimentPipeline::new(news, LexiconScorer::new(), PipelineConfig::from(&config));

    let colored = !args.no_color && args.output.is_none() && std::io::stdout().is_terminal();

    if let Some(ref topic) = args.topic {
        let dashboard = analyze(&pipeline, &credential, topic).await?;
        output_report(&dashboard, &args, colored)?;
        return Ok(());
    }

    // Interactive session: one topic per line until EOF
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("news topic> ");
        std::io::stderr().flush()?;

        let Some(topic) = lines.next_line().await? else {
            eprintln!();
            break;
        };

        let dashboard = analyze(&pipeline, &credential, &topic).await?;
        output_report(&dashboard, &args, colored)?;
    }

    Ok(())
}

async fn analyze(
    pipeline: &SentimentPipeline,
    credential: &str,
    topic: &str,
) -> anyhow::Result<Dashboard> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Fetching news and running analysis... Please wait.");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let run = pipeline.run(credential, topic).await;

    spinner.finish_and_clear();
    Ok(Dashboard::from_run(&run))
}

fn output_report(dashboard: &Dashboard, args: &Args, colored: bool) -> anyhow::Result<()> {
    let output = render(dashboard, &args.format, colored)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &output).with_context(|| format!("Failed to write {}", path))?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Reads a line from the terminal without echoing it.
fn prompt_secret(prompt: &str) -> anyhow::Result<String> {
    use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
    use crossterm::terminal;

    eprint!("{}", prompt);
    std::io::stderr().flush()?;

    terminal::enable_raw_mode()?;
    let mut secret = String::new();
    let result = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Enter => break Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    break Err(anyhow::anyhow!("Interrupted"));
                }
                KeyCode::Backspace => {
                    if secret.pop().is_some() {
                        eprint!("\u{8} \u{8}");
                    }
                }
                KeyCode::Char(c) => {
                    secret.push(c);
                    eprint!("*");
                }
                _ => {}
            },
            Ok(_) => {}
            Err(e) => break Err(e.into()),
        }
        let _ = std::io::stderr().flush();
    };
    terminal::disable_raw_mode()?;
    eprintln!();

    result.map(|_| secret)
}
