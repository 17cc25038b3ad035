use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lse_core::{build_or_default, Index};
use tracing_subscriber::{fmt, EnvFilter};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lse-indexer")]
#[command(about = "Build a keyword index over a list of documents and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Inputs {
    /// File listing the documents to index, whitespace separated
    #[arg(long)]
    docs: PathBuf,
    /// File listing noise words; the built-in English list is used when omitted
    #[arg(long)]
    noise: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and print a summary
    Build {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Top five documents containing either word
    Query {
        #[command(flatten)]
        inputs: Inputs,
        word1: String,
        word2: String,
        /// Print the result as a JSON array (null when nothing matches)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print occurrence lists, one keyword per line
    Dump {
        #[command(flatten)]
        inputs: Inputs,
        /// Only print this word's list
        #[arg(long)]
        keyword: Option<String>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { inputs } => {
            let index = load(&inputs)?;
            println!("documents: {}", index.documents().len());
            println!("keywords: {}", index.len());
            Ok(())
        }
        Commands::Query { inputs, word1, word2, json } => {
            let index = load(&inputs)?;
            query(&index, &word1, &word2, json)
        }
        Commands::Dump { inputs, keyword } => {
            let index = load(&inputs)?;
            dump(&index, keyword.as_deref());
            Ok(())
        }
    }
}

fn load(inputs: &Inputs) -> Result<Index> {
    build_or_default(&inputs.docs, inputs.noise.as_deref())
        .with_context(|| format!("failed to index documents listed in {}", inputs.docs.display()))
}

fn query(index: &Index, word1: &str, word2: &str, json: bool) -> Result<()> {
    let kw1 = index.keyword(word1);
    let kw2 = index.keyword(word2);
    tracing::debug!(?kw1, ?kw2, "normalized query words");
    let results = index.top5_search(kw1.as_deref().unwrap_or(""), kw2.as_deref().unwrap_or(""));
    if json {
        println!("{}", serde_json::to_string(&results)?);
        return Ok(());
    }
    match results {
        Some(docs) => {
            for doc in docs {
                println!("{doc}");
            }
        }
        None => println!("no matching documents"),
    }
    Ok(())
}

fn dump(index: &Index, keyword: Option<&str>) {
    let selected: Vec<String> = match keyword {
        Some(word) => index.keyword(word).into_iter().collect(),
        None => index.keywords().into_iter().map(str::to_owned).collect(),
    };
    for kw in selected {
        let Some(occs) = index.occurrences(&kw) else { continue };
        let list: Vec<String> = occs.iter().map(ToString::to_string).collect();
        println!("{kw}: [{}]", list.join(", "));
    }
}
