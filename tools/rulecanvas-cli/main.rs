use clap::{Parser, Subcommand};
use rulecanvas::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Converts badge-rule canvases to rule definitions and back
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log conversion details (equivalent to RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a canvas JSON file into a rule definition
    Compile {
        /// Path to the canvas JSON file
        canvas_path: String,
        /// Identifier of the produced rule
        #[arg(long)]
        id: String,
        /// Display name of the produced rule
        #[arg(long)]
        name: String,
        /// Optional rule description
        #[arg(long)]
        description: Option<String>,
        /// Where to write the rule JSON (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Expand a rule definition back into a canvas
    Expand {
        /// Path to the rule JSON file
        rule_path: String,
        /// Optional JSON file overriding the layout grid
        #[arg(long)]
        layout_config: Option<String>,
        /// Where to write the canvas JSON (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check a rule definition for structural problems
    Validate {
        /// Path to the rule JSON file
        rule_path: String,
    },
    /// Check whether one edge may be added to a canvas
    Connect {
        /// Path to the canvas JSON file
        canvas_path: String,
        /// Id of the producing node
        #[arg(long)]
        source: String,
        /// Id of the consuming node
        #[arg(long)]
        target: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Compile {
            canvas_path,
            id,
            name,
            description,
            output,
        } => run_compile(&canvas_path, &id, &name, description.as_deref(), output),
        Command::Expand {
            rule_path,
            layout_config,
            output,
        } => run_expand(&rule_path, layout_config, output),
        Command::Validate { rule_path } => run_validate(&rule_path),
        Command::Connect {
            canvas_path,
            source,
            target,
        } => run_connect(&canvas_path, &source, &target),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_compile(
    canvas_path: &str,
    id: &str,
    name: &str,
    description: Option<&str>,
    output: Option<String>,
) {
    let start = Instant::now();
    let canvas = Canvas::from_file(canvas_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load canvas: {}", e)));

    let mut builder = RuleCompiler::builder(&canvas);
    if let Some(description) = description {
        builder = builder.with_description(description);
    }
    let rule = builder.build().compile(id, name);
    let duration = start.elapsed();

    let report = validate_rule(&rule);
    if !report.valid {
        eprintln!("\nRule is not valid and should not be saved:");
        for error in &report.errors {
            eprintln!("  - {}", error);
        }
    }

    eprintln!(
        "Compiled {} node(s) into {} action(s) in {:?}",
        canvas.nodes.len(),
        rule.actions.len(),
        duration
    );
    eprintln!("{}", rule.describe());

    let text = rule
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode rule: {}", e)));
    write_output(output, &text);

    if !report.valid {
        std::process::exit(2);
    }
}

fn run_expand(rule_path: &str, layout_config: Option<String>, output: Option<String>) {
    let text = fs::read_to_string(rule_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read rule file '{}': {}", rule_path, e))
    });
    let rule = deserialize_rule(&text).unwrap_or_else(|| {
        exit_with_error(&format!("Could not load rule from '{}'", rule_path))
    });

    let layout = match layout_config {
        Some(path) => {
            let config_text = fs::read_to_string(&path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read layout config '{}': {}", path, e))
            });
            serde_json::from_str::<LayoutConfig>(&config_text).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to parse layout config: {}", e))
            })
        }
        None => LayoutConfig::default(),
    };

    let canvas = CanvasExpander::builder()
        .with_layout(layout)
        .build()
        .expand(&rule);
    eprintln!(
        "Expanded rule '{}' into {} node(s) and {} edge(s)",
        rule.name,
        canvas.nodes.len(),
        canvas.edges.len()
    );

    let text = serde_json::to_string_pretty(&canvas)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode canvas: {}", e)));
    write_output(output, &text);
}

fn run_validate(rule_path: &str) {
    let rule = RuleDefinition::from_file(rule_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load rule: {}", e)));
    let report = validate_rule(&rule);

    if report.valid {
        println!("Rule '{}' is valid.", rule.name);
        println!("{}", rule.describe());
    } else {
        println!("Rule '{}' has {} problem(s):", rule.id, report.errors.len());
        for error in &report.errors {
            println!("  - {}", error);
        }
        std::process::exit(2);
    }
}

fn run_connect(canvas_path: &str, source: &str, target: &str) {
    let canvas = Canvas::from_file(canvas_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load canvas: {}", e)));
    let check = validate_connection(&Connection::new(source, target), &canvas.nodes, &canvas.edges);

    match check.reason {
        None => println!("{} -> {}: allowed", source, target),
        Some(reason) => {
            println!("{} -> {}: refused ({})", source, target, reason);
            std::process::exit(2);
        }
    }
}

fn write_output(output: Option<String>, text: &str) {
    match output {
        Some(path) => {
            fs::write(&path, text).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path, e))
            });
            eprintln!("Wrote '{}'", path);
        }
        None => println!("{}", text),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
