//! Synoptic pipeline runner
//!
//! Read Wikipedia page titles from a CSV file, distill each article into
//! ranked topic sentences with Gemini, and embed each sentence.
//!
//! Usage:
//!   cargo run --bin synoptic -- --input data/topviews.csv
//!   cargo run --bin synoptic -- --input pages.csv --column Title --limit 10
//!   cargo run --bin synoptic -- --model gemini-2.0-flash-lite --verbose

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use synoptic_core::{defaults, ArticleSource, EmbeddingBackend, GenerationBackend, InferenceBackend};
use synoptic_inference::GeminiBackend;
use synoptic_pipeline::{Pipeline, SubjectReader};
use synoptic_wiki::WikipediaClient;

#[derive(Debug)]
struct Args {
    input: PathBuf,
    column: String,
    limit: usize,
    model: Option<String>,
    verbose: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/topviews.csv"),
            column: defaults::SUBJECT_COLUMN.to_string(),
            limit: defaults::ROW_LIMIT,
            model: None,
            verbose: false,
        }
    }
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let mut result = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" | "-i" => {
                i += 1;
                if i < args.len() {
                    result.input = PathBuf::from(&args[i]);
                }
            }
            "--column" | "-c" => {
                i += 1;
                if i < args.len() {
                    result.column = args[i].clone();
                }
            }
            "--limit" | "-l" => {
                i += 1;
                if i < args.len() {
                    result.limit = match args[i].parse() {
                        Ok(n) => n,
                        Err(_) => {
                            eprintln!("Invalid limit: {}. Using default.", args[i]);
                            defaults::ROW_LIMIT
                        }
                    };
                }
            }
            "--model" | "-m" => {
                i += 1;
                if i < args.len() {
                    result.model = Some(args[i].clone());
                }
            }
            "--verbose" | "-v" => {
                result.verbose = true;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    result
}

fn print_help() {
    println!(
        r#"
Synoptic Pipeline Runner

Usage: cargo run --bin synoptic -- [OPTIONS]

Options:
  -i, --input <FILE>      CSV file with subject titles (default: data/topviews.csv)
  -c, --column <NAME>     Subject column name (default: Page)
  -l, --limit <N>         Row limit, also bounds embedding calls (default: 100)
  -m, --model <MODEL>     Generation model (default: gemini-2.0-flash)
  -v, --verbose           Verbose output
  -h, --help              Print help

Environment Variables:
  GEMINI_API_KEY      Gemini API key (required)
  GEMINI_BASE_URL     Gemini API base URL
  GEMINI_GEN_MODEL    Generation model (overridden by --model flag)
  GEMINI_EMBED_MODEL  Embedding model (default: text-embedding-004)
  GEMINI_EMBED_DIM    Embedding dimension (default: 768)
  SYNOPTIC_WIKI_API   MediaWiki Action API endpoint

Examples:
  cargo run --bin synoptic -- --input data/topviews.csv
  cargo run --bin synoptic -- --input pages.csv --column Title --limit 10
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let args = parse_args();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if args.verbose { "debug" } else { "info" })
    });
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("Synoptic Pipeline Runner");
    println!("═══════════════════════════════════════════════════════════════");
    println!("Input:  {}", args.input.display());
    println!("Column: {}  Limit: {}", args.column, args.limit);

    let mut gemini = GeminiBackend::from_env()?;
    if let Some(model) = args.model {
        gemini.set_gen_model(model);
    }
    println!(
        "Models: gen={}  embed={} ({}d)",
        GenerationBackend::model_name(&gemini),
        EmbeddingBackend::model_name(&gemini),
        gemini.dimension(),
    );
    println!();

    if !gemini.health_check().await.unwrap_or(false) {
        eprintln!("Warning: Gemini endpoint not reachable; the run will likely produce no topics.");
    }

    let gemini = Arc::new(gemini);
    let wiki: Arc<dyn ArticleSource> = Arc::new(WikipediaClient::from_env());
    let pipeline = Pipeline::new(
        wiki,
        gemini.clone() as Arc<dyn GenerationBackend>,
        gemini as Arc<dyn EmbeddingBackend>,
        args.limit,
    );

    let reader = SubjectReader::new(&args.input)
        .with_column(args.column)
        .with_limit(args.limit);

    let start = Instant::now();
    let run = pipeline.run(&reader).await?;

    println!("───────────────────────────────────────────────────────────────");
    println!("Subjects processed: {}", run.subjects.len());
    println!("Fetch failures:     {}", run.fetch_failures);
    println!("Topics extracted:   {}", run.topic_count);
    println!("Embeddings:         {}", run.embeddings.len());
    println!("Elapsed:            {:.1}s", start.elapsed().as_secs_f64());
    println!("───────────────────────────────────────────────────────────────");

    for (i, embedding) in run.embeddings.iter().enumerate() {
        let preview: String = embedding.sentence.chars().take(72).collect();
        println!("{:>4}  [{}d]  {}", i + 1, embedding.vector.len(), preview);
    }

    Ok(())
}
