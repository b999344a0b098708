//! RoiYan CLI
//!
//! Usage:
//!   roiyan --text "aku senang banget"        # Single classification
//!   roiyan --interactive                     # Classify lines from stdin
//!   roiyan --serve [--bot]                   # HTTP + WebSocket server
//!   roiyan --text "text" --json              # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, Level};

use roiyan::core::{
    color_for_emotion, gradient_for_emotion, run_server, AppConfig, EmotionClassifier, KeywordTable,
};
use roiyan::types::{ChatMessage, EmotionResult, EmotionStats};
use roiyan::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "roiyan",
    version = VERSION,
    about = "RoiYan - team chat with heuristic emotion tagging",
    long_about = "RoiYan tags each chat message with an emotion label\n\
                  (senang, semangat, marah, sedih, takut, terkejut, netral)\n\
                  using a keyword table with negation handling.\n\n\
                  Modes:\n  \
                  --text         Classify one text\n  \
                  --interactive  Classify lines from stdin, 'stats' for a summary\n  \
                  --serve        HTTP + WebSocket chat relay"
)]
struct Args {
    /// Text to classify (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, env = "ROIYAN_ADDR", default_value = "127.0.0.1:4000")]
    addr: String,

    /// Alternate keyword table (JSON list of entries)
    #[arg(long, env = "ROIYAN_LEXICON")]
    lexicon: Option<PathBuf>,

    /// Start the bot participant with the server
    #[arg(long)]
    bot: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show style tokens and debug logging
    #[arg(long)]
    verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG.max(args.log_level) } else { args.log_level };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_ansi(!args.no_color)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let classifier = match load_classifier(&args) {
        Ok(classifier) => classifier,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if args.serve {
        run_serve(&args, classifier).await;
    } else if let Some(ref text) = args.text {
        run_single(text, &classifier, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&classifier, &args);
    }
}

/// Standard table unless --lexicon is given
fn load_classifier(args: &Args) -> Result<EmotionClassifier, roiyan::ChatError> {
    match &args.lexicon {
        Some(path) => {
            let table = KeywordTable::from_json_file(path)?;
            Ok(EmotionClassifier::with_table(Arc::new(table)))
        }
        None => Ok(EmotionClassifier::default()),
    }
}

/// Run single text classification
fn run_single(text: &str, classifier: &EmotionClassifier, args: &Args) {
    let result = classifier.classify(text);
    print_result(&result, args, true);
}

/// Run interactive mode
fn run_interactive(classifier: &EmotionClassifier, args: &Args) {
    print_header(args.no_color);
    println!("Type a message and press Enter. 'stats' for a summary, 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut history: Vec<ChatMessage> = Vec::new();

    loop {
        print!("{} ", ">".bold());
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().eq_ignore_ascii_case("quit") || line.trim().eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Messages: {}", history.len());
            break;
        }
        if line.trim().eq_ignore_ascii_case("stats") {
            print_stats(&EmotionStats::from_messages(&history), args.json);
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let result = classifier.classify(line);
        print_result(&result, args, false);

        history.push(ChatMessage {
            id: history.len() as u64 + 1,
            user_id: "you".to_string(),
            user_name: "you".to_string(),
            avatar: String::new(),
            content: line.to_string(),
            timestamp: chrono::Utc::now(),
            emotion: result,
        });
    }
}

fn print_result(result: &EmotionResult, args: &Args, pretty: bool) {
    if args.json {
        let json = if pretty {
            serde_json::to_string_pretty(result)
        } else {
            serde_json::to_string(result)
        };
        match json {
            Ok(json) => println!("{}", json),
            Err(e) => error!("failed to encode result: {}", e),
        }
    } else if args.no_color {
        println!("{}", result.to_parseable_string());
    } else {
        println!("{}", result.to_terminal_string());
    }

    if args.verbose && !args.json {
        let label = result.emotion.label();
        println!("  color:    {}", color_for_emotion(label));
        println!("  gradient: {}", gradient_for_emotion(label));
    }
}

fn print_stats(stats: &EmotionStats, json: bool) {
    if json {
        match serde_json::to_string(&stats.summary()) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("failed to encode stats: {}", e),
        }
        return;
    }

    if stats.is_empty() {
        println!("No messages yet.");
        return;
    }
    let dominant = stats.dominant();
    println!(
        "Dominant: {} {} | positivity={}% | avg confidence={}%",
        dominant.emoji(),
        dominant.label().color(dominant.terminal_color()).bold(),
        stats.positivity_ratio(),
        stats.average_confidence()
    );
    for (label, count) in stats.counts() {
        println!("  {:<9} {}", label, count);
    }
}

fn print_header(no_color: bool) {
    let title = format!("RoiYan v{} - emotion tagger", VERSION);
    if no_color {
        println!("========================================");
        println!("  {}", title);
        println!("========================================");
    } else {
        println!("{}", "════════════════════════════════════════".bold());
        println!("  {}", title.bold());
        println!("{}", "════════════════════════════════════════".bold());
    }
    println!();
}

/// Run HTTP API server
async fn run_serve(args: &Args, classifier: EmotionClassifier) {
    let config = AppConfig {
        addr: args.addr.clone(),
        bot: args.bot,
        classifier,
    };

    if let Err(e) = run_server(config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
