use clap::{Parser, Subcommand};
use kaiwa::prelude::*;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Author conversation flows and talk to the knowledge-base bot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to an engine config JSON file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chat with the bot interactively
    Chat {
        /// Knowledge base JSON file; the built-in sample is used when omitted
        #[arg(short, long)]
        knowledge_base: Option<PathBuf>,
        /// Seed for fallback replies
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Answer a single message and print the match as JSON
    Ask {
        /// The message to answer
        #[arg(required = true)]
        text: Vec<String>,
        #[arg(short, long)]
        knowledge_base: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        /// Also print every intent's score
        #[arg(long)]
        scores: bool,
    },
    /// Work with flow files
    #[command(subcommand)]
    Flow(FlowCommand),
}

#[derive(Subcommand, Debug)]
enum FlowCommand {
    /// Write the starter flow to a file
    Sample {
        #[arg(short, long, default_value = "current_flow.json")]
        output: PathBuf,
        /// Write the compact binary encoding instead of JSON
        #[arg(long)]
        binary: bool,
    },
    /// Load a flow file and print its nodes and connections
    Inspect { path: PathBuf },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Chat {
            knowledge_base,
            seed,
        } => run_chat(&config, knowledge_base.as_deref(), seed),
        Command::Ask {
            text,
            knowledge_base,
            seed,
            scores,
        } => run_ask(&config, &text.join(" "), knowledge_base.as_deref(), seed, scores),
        Command::Flow(FlowCommand::Sample { output, binary }) => {
            run_flow_sample(&config, &output, binary)
        }
        Command::Flow(FlowCommand::Inspect { path }) => run_flow_inspect(&path),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_knowledge_base(path: Option<&Path>) -> Arc<KnowledgeBase> {
    let knowledge_base = match path {
        Some(path) => KnowledgeBase::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load knowledge base: {}", e))),
        None => KnowledgeBase::sample(),
    };
    Arc::new(knowledge_base)
}

/// Runs an interactive chat loop on stdin until EOF or `/quit`.
fn run_chat(config: &EngineConfig, knowledge_base: Option<&Path>, seed: Option<u64>) {
    let knowledge_base = load_knowledge_base(knowledge_base);
    println!(
        "--- Kaiwa Chat ({} intents loaded) ---",
        knowledge_base.len()
    );
    println!("Commands: /history, /report, /quit");

    let mut session = config.session(knowledge_base, seed);
    let mut analytics = AnalyticsTracker::new();
    let stdin = io::stdin();

    loop {
        print!("you> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => exit_with_error(&format!("Failed to read input: {}", e)),
        }

        match line.trim() {
            "" => continue,
            "/quit" => break,
            "/history" => {
                for turn in session.history() {
                    println!(
                        "  [{}] you: {} | bot ({} {:.2}): {}",
                        turn.timestamp.format("%H:%M:%S"),
                        turn.user_text,
                        turn.intent,
                        turn.confidence,
                        turn.bot_text
                    );
                }
            }
            "/report" => print_report(&analytics.report()),
            text => {
                let started = Instant::now();
                let reply = session.submit(text);
                analytics.track_result(&reply, Some(started.elapsed()));
                println!("bot> {}", reply.response);
                println!("     ({} · {:.2})", reply.intent, reply.confidence);
            }
        }
    }
}

fn print_report(report: &AnalyticsReport) {
    println!("\n--- Conversation Report ---");
    println!("Total Conversations:   {}", report.total_conversations);
    println!("Avg Satisfaction:      {:.2}", report.average_satisfaction);
    println!("Avg Response Time:     {:.6}s", report.average_response_time);
    println!("Top Intents:");
    for summary in &report.top_intents {
        println!(
            "  - {} x{} (avg confidence {:.2})",
            summary.intent, summary.count, summary.average_confidence
        );
    }
    println!();
}

fn run_ask(
    config: &EngineConfig,
    text: &str,
    knowledge_base: Option<&Path>,
    seed: Option<u64>,
    scores: bool,
) {
    let knowledge_base = load_knowledge_base(knowledge_base);
    let mut session = config.session(knowledge_base, seed);

    if scores {
        for score in session.matcher().rank(text) {
            eprintln!(
                "  {:<28} {}/{} matched  score {:.4}",
                score.intent,
                score.matched_utterances,
                session
                    .matcher()
                    .knowledge_base()
                    .get(score.intent)
                    .map_or(0, |e| e.utterances.len()),
                score.score
            );
        }
    }

    let reply = session.submit(text);
    let json = serde_json::to_string_pretty(&reply)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode reply: {}", e)));
    println!("{}", json);
}

fn run_flow_sample(config: &EngineConfig, output: &Path, binary: bool) {
    let mut editor = FlowEditor::new(FlowGraphStore::with_sample_flow(config.canvas.bounds()));
    editor.set_flow_name("Sample Flow");

    if binary {
        let bytes = editor
            .export_snapshot()
            .to_bytes()
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode flow: {}", e)));
        fs::write(output, bytes).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Could not write to file '{}': {}",
                output.display(),
                e
            ))
        });
    } else {
        editor
            .save_to(&JsonFileRepository::new(output))
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save flow: {}", e)));
    }
    println!(
        "Wrote sample flow with {} nodes to '{}'",
        editor.store().list_nodes().len(),
        output.display()
    );
}

fn run_flow_inspect(path: &Path) {
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let snapshot = if is_json {
        JsonFileRepository::new(path)
            .load()
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load flow: {}", e)))
            .unwrap_or_else(|| exit_with_error(&format!("No flow at '{}'", path.display())))
    } else {
        let bytes = fs::read(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Could not read file '{}': {}", path.display(), e))
        });
        FlowSnapshot::from_bytes(&bytes)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to decode flow: {}", e)))
    };

    let mut editor = FlowEditor::default();
    editor
        .import_snapshot(snapshot.clone())
        .unwrap_or_else(|e| exit_with_error(&format!("Flow is not importable: {}", e)));

    println!("\n--- {} (v{}) ---", snapshot.metadata.name, snapshot.metadata.version);
    println!("Exported at: {}", snapshot.metadata.created_at.to_rfc3339());
    println!("\nNodes ({}):", snapshot.nodes.len());
    for node in &snapshot.nodes {
        println!(
            "  {:<10} {:<14} ({:>4}, {:>4})  {}",
            node.id, node.node_type, node.position.x, node.position.y, node.title
        );
        for (field, value) in &node.content {
            println!("  {:<10}   {} = {:?}", "", field, value);
        }
    }
    println!("\nConnections ({}):", snapshot.connections.len());
    for connection in &snapshot.connections {
        println!("  {} -> {}", connection.from_node_id, connection.to_node_id);
    }
    println!();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
