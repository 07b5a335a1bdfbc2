use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rulecanvas::prelude::*;

/// A CLI tool to generate random, well-formed badge-rule canvases
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated canvas JSON file to
    #[arg(short, long, default_value = "generated_canvas.json")]
    output: String,

    /// Number of badge nodes to generate
    #[arg(long, default_value_t = 3)]
    badges: usize,

    /// Maximum nesting of logic nodes above each badge
    #[arg(long, default_value_t = 3)]
    max_depth: usize,

    /// Maximum number of inputs wired into each logic node
    #[arg(long, default_value_t = 3)]
    max_children: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

const FIELDS: [&str; 6] = [
    "amount",
    "order_count",
    "tier",
    "country",
    "days_active",
    "referrals",
];

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.max_children == 0 {
        eprintln!("Error: --max-children must be at least 1");
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating canvas ({} badge(s), depth up to {}, up to {} input(s) per logic node)...",
        cli.badges, cli.max_depth, cli.max_children
    );

    let mut generator = CanvasGenerator::new(&mut rng, cli.max_depth, cli.max_children);
    for i in 0..cli.badges {
        generator.add_badge(i);
    }
    let (canvas, refused) = generator.finish();

    println!(
        "-> {} node(s), {} edge(s), {} edge(s) refused by the validator.",
        canvas.nodes.len(),
        canvas.edges.len(),
        refused
    );

    canvas.save(&cli.output)?;
    println!("Successfully generated and saved canvas to '{}'", cli.output);

    Ok(())
}

/// Builds a canvas edge by edge, admitting only edges the validator accepts.
struct CanvasGenerator<'r> {
    rng: &'r mut StdRng,
    max_depth: usize,
    max_children: usize,
    nodes: Vec<CanvasNode>,
    edges: Vec<CanvasEdge>,
    refused: usize,
}

impl<'r> CanvasGenerator<'r> {
    fn new(rng: &'r mut StdRng, max_depth: usize, max_children: usize) -> Self {
        Self {
            rng,
            max_depth,
            max_children,
            nodes: Vec::new(),
            edges: Vec::new(),
            refused: 0,
        }
    }

    fn add_badge(&mut self, index: usize) {
        let id = format!("badge_{}", index);
        let quantity = self.rng.random_range(1..=3);
        let position = Position::new(1000.0, index as f64 * 200.0);
        let badge_id = format!("B{}", index + 1);
        let badge_name = format!("Badge {}", index + 1);
        self.nodes.push(CanvasNode::badge(
            &id,
            position,
            &badge_id,
            Some(badge_name.as_str()),
            quantity,
        ));

        let chains = self.rng.random_range(1..=2);
        for _ in 0..chains {
            let depth = self.rng.random_range(0..=self.max_depth);
            let producer = self.add_producer(depth);
            self.connect(&producer, &id);
        }
    }

    /// Adds a condition (depth 0) or a logic node with `depth` levels above its leaves.
    fn add_producer(&mut self, depth: usize) -> String {
        let id = format!("n{}", self.nodes.len());
        let x = 1000.0 - (depth as f64 + 1.0) * 250.0;
        let y = self.nodes.len() as f64 * 80.0;

        if depth == 0 {
            let field = FIELDS[self.rng.random_range(0..FIELDS.len())];
            let node = match field {
                "tier" => CanvasNode::condition(
                    &id,
                    Position::new(x, y),
                    field,
                    ConditionOperator::Equal,
                    "gold",
                ),
                "country" => CanvasNode::condition(
                    &id,
                    Position::new(x, y),
                    field,
                    ConditionOperator::In,
                    ["US", "DE", "JP"].into_iter().collect::<ConditionValue>(),
                ),
                _ => CanvasNode::condition(
                    &id,
                    Position::new(x, y),
                    field,
                    ConditionOperator::GreaterThanOrEqual,
                    self.rng.random_range(1..500i64),
                ),
            };
            self.nodes.push(node);
            return id;
        }

        let logic_type = if self.rng.random_bool(0.5) {
            LogicType::And
        } else {
            LogicType::Or
        };
        self.nodes
            .push(CanvasNode::logic(&id, Position::new(x, y), logic_type));

        let children = self.rng.random_range(1..=self.max_children);
        for _ in 0..children {
            let child_depth = self.rng.random_range(0..depth);
            let child = self.add_producer(child_depth);
            self.connect(&child, &id);
        }
        id
    }

    fn connect(&mut self, source: &str, target: &str) {
        let proposed = Connection::new(source, target);
        if is_valid_connection(&proposed, &self.nodes, &self.edges) {
            let id = format!("e{}", self.edges.len());
            self.edges.push(CanvasEdge::new(&id, source, target));
        } else {
            self.refused += 1;
        }
    }

    fn finish(self) -> (Canvas, usize) {
        (Canvas::new(self.nodes, self.edges), self.refused)
    }
}
