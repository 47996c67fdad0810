// Interactive question search CLI

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use question_search::{
    default_query, render, Config, OpenAIEmbedder, QuestionStore, SearchError, SearchRequest,
    SearchService, SkillTaxonomy,
};

/// Search a pre-embedded question bank by category, skill and free text.
#[derive(Parser, Debug)]
#[command(name = "question-search", version)]
struct Cli {
    /// Skill taxonomy JSON file
    #[arg(long)]
    taxonomy: Option<PathBuf>,

    /// Question bank JSON file (with embeddings)
    #[arg(long)]
    questions: Option<PathBuf>,

    /// Number of results per search
    #[arg(long)]
    top_k: Option<usize>,

    /// Run a single search for this category and exit
    #[arg(long, requires = "query")]
    category: Option<String>,

    /// Skill to match (repeatable); used with --category
    #[arg(long = "skill", requires = "category")]
    skills: Vec<String>,

    /// Query text; used with --category
    #[arg(long, requires = "category")]
    query: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(path) = cli.taxonomy {
        config.taxonomy_path = path;
    }
    if let Some(path) = cli.questions {
        config.questions_path = path;
    }
    if let Some(top_k) = cli.top_k {
        if top_k == 0 {
            bail!("--top-k must be at least 1");
        }
        config.top_k = top_k;
    }

    // Load data once for the whole session
    let taxonomy = SkillTaxonomy::load(&config.taxonomy_path)
        .context("Failed to load skill taxonomy")?;
    let store = QuestionStore::load(&config.questions_path)
        .context("Failed to load question bank")?;

    let embedder = OpenAIEmbedder::from_config(&config.embedding);
    let service = SearchService::new(store, embedder)
        .with_top_k(config.top_k)
        .with_empty_skill_policy(config.empty_skills);

    if let (Some(category), Some(query)) = (cli.category, cli.query) {
        let request = SearchRequest::new(category, cli.skills, query);
        return run_once(&service, &request).await;
    }

    run_interactive(&service, &taxonomy).await
}

async fn run_once(service: &SearchService<OpenAIEmbedder>, request: &SearchRequest) -> Result<()> {
    let outcome = service.search(request).await.context("Search failed")?;
    print!("{}", render::format_outcome(&outcome));
    Ok(())
}

async fn run_interactive(
    service: &SearchService<OpenAIEmbedder>,
    taxonomy: &SkillTaxonomy,
) -> Result<()> {
    let term = Term::stdout();
    let theme = ColorfulTheme::default();

    if taxonomy.is_empty() {
        bail!("Skill taxonomy has no categories");
    }
    let categories = taxonomy.categories();

    print_banner(&term, service)?;

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("Select category")
            .items(&categories)
            .default(0)
            .interact_on(&term)?;
        let category = categories[selection];

        let available = taxonomy.skills_for(category);
        let skills: Vec<String> = if available.is_empty() {
            println!("{}", "This category has no skills to choose from.".dimmed());
            Vec::new()
        } else {
            MultiSelect::with_theme(&theme)
                .with_prompt("Select skills (space to toggle, enter to confirm)")
                .items(available)
                .interact_on(&term)?
                .into_iter()
                .map(|idx| available[idx].clone())
                .collect()
        };

        let query: String = Input::with_theme(&theme)
            .with_prompt("Enter your query")
            .with_initial_text(default_query(service.top_k(), category, &skills))
            .allow_empty(true)
            .interact_text_on(&term)?;

        let request = SearchRequest::new(category, skills, query);
        search_and_print(service, &request).await;

        println!();
        let again = Confirm::with_theme(&theme)
            .with_prompt("Search again?")
            .default(true)
            .interact_on(&term)?;
        if !again {
            println!("{}", "👋 Goodbye!".bright_blue());
            break;
        }
    }

    Ok(())
}

/// Run one search and print the outcome; failures end the request, not the session.
async fn search_and_print(service: &SearchService<OpenAIEmbedder>, request: &SearchRequest) {
    if !request.query.trim().is_empty() {
        println!("Processing query: {}", request.query.trim().bold());
        println!();
    }

    match service.search(request).await {
        Ok(outcome) => print!("{}", render::format_outcome(&outcome)),
        Err(SearchError::InvalidQuery { .. }) => {
            println!("{}", "⚠️  Please enter a query to perform the search.".yellow());
        }
        Err(e @ SearchError::EmbeddingService(_)) => {
            tracing::warn!(error = %e, "Search failed");
            println!("{} {}", "❌ Unable to create embeddings for the query:".bright_red(), e);
        }
        Err(e) => {
            tracing::error!(error = %e, "Search failed");
            println!("{} {}", "❌ Search failed:".bright_red(), e);
        }
    }
}

fn print_banner(term: &Term, service: &SearchService<OpenAIEmbedder>) -> Result<()> {
    term.clear_screen()?;
    println!(
        "{}",
        "╔════════════════════════════════════════╗".bright_cyan()
    );
    println!(
        "{}",
        "║   Search Questions by Category/Skill   ║".bright_cyan()
    );
    println!(
        "{}",
        "╚════════════════════════════════════════╝".bright_cyan()
    );
    println!(
        "{}",
        format!(
            "{} questions loaded from {} · model {}",
            service.store().len(),
            service.store().source().display(),
            service.embedder().model()
        )
        .dimmed()
    );
    println!();
    Ok(())
}
