//! CLI binary for medevidence.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use medevidence::{
    AppConfig, BackendClient, DateRange, ScoredArticle, SearchConfig, SearchFilters,
    Source, StudyTypeFilter,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// medevidence: evidence-graded answers from PubMed and Europe PMC.
#[derive(Parser)]
#[command(name = "medevidence", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file.
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search the literature and print ranked, evidence-graded articles.
    Search {
        #[command(flatten)]
        query: QueryArgs,

        /// Print the ranked articles as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search, then ask the backend for an answer grounded in the results.
    Ask {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Check whether the backend is reachable.
    Health,

    /// Write a default configuration file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// A clinical question and the filters to search it with.
#[derive(Args)]
struct QueryArgs {
    /// The clinical question.
    #[arg(required = true)]
    query: Vec<String>,

    /// Publication window: all, 1year, 5years or 10years.
    #[arg(long)]
    date_range: Option<DateRange>,

    /// Study design: all, rct, meta, review, clinical or guideline.
    #[arg(long)]
    study_type: Option<StudyTypeFilter>,

    /// Restrict to one or more sources (pubmed, europepmc).
    #[arg(long = "source")]
    sources: Vec<Source>,
}

impl QueryArgs {
    fn text(&self) -> String {
        self.query.join(" ")
    }

    fn filters(&self, config: &AppConfig) -> SearchFilters {
        let defaults = config.filters();
        SearchFilters {
            date_range: self.date_range.unwrap_or(defaults.date_range),
            study_type: self.study_type.unwrap_or(defaults.study_type),
        }
    }

    fn search_config(&self, config: &AppConfig) -> SearchConfig {
        let mut search = config.search_config();
        if !self.sources.is_empty() {
            search.sources = self.sources.clone();
        }
        search
    }
}

const NO_RESULTS_HINT: &str =
    "No relevant articles found. Try rephrasing the question or broadening the filters.";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so `--json` output on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("medevidence=info,evidence_search=info")),
        )
        .init();

    let cli = Cli::parse();

    // init-config writes a fresh file, so it never reads one.
    let mut config = match cli.command {
        Command::InitConfig { .. } => AppConfig::default(),
        _ => load_config(cli.config.as_ref())?,
    };
    if let Some(url) = cli.backend_url {
        config.backend.base_url = url;
    }

    match cli.command {
        Command::Search { query, json } => run_search(&config, &query, json).await,
        Command::Ask { query } => run_ask(&config, &query).await,
        Command::Health => run_health(&config).await,
        Command::InitConfig { force } => init_config(cli.config, &config, force),
    }
}

/// An explicit path must exist; the default path is optional.
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    if let Some(path) = path {
        return Ok(AppConfig::from_file(path)?);
    }
    let default_path = AppConfig::default_config_path();
    if default_path.exists() {
        info!(path = %default_path.display(), "loading config");
        Ok(AppConfig::from_file(&default_path)?)
    } else {
        Ok(AppConfig::default())
    }
}

async fn run_search(config: &AppConfig, args: &QueryArgs, json: bool) -> anyhow::Result<ExitCode> {
    let query = args.text();
    let report =
        medevidence::search_with_report(&query, &args.filters(config), &args.search_config(config))
            .await?;

    for failure in &report.failures {
        eprintln!("note: {} unavailable ({})", failure.source, failure.error);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report.articles)?);
        return Ok(ExitCode::SUCCESS);
    }

    if report.articles.is_empty() {
        println!("{NO_RESULTS_HINT}");
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} articles ({} found, {} after dedup)\n",
        report.stats.returned, report.stats.total_found, report.stats.after_dedup
    );
    print_articles(&report.articles);
    Ok(ExitCode::SUCCESS)
}

async fn run_ask(config: &AppConfig, args: &QueryArgs) -> anyhow::Result<ExitCode> {
    let query = args.text();
    let search_config = args.search_config(config);
    let articles =
        medevidence::search_multiple_sources(&query, &args.filters(config), &search_config).await?;

    if articles.is_empty() {
        println!("{NO_RESULTS_HINT}");
        return Ok(ExitCode::SUCCESS);
    }

    let backend = BackendClient::new(&search_config)?;
    let answer = backend.generate_response(&query, &articles, &[]).await?;

    println!("{}\n", answer.response.trim());

    if !answer.follow_up_questions.is_empty() {
        println!("Follow-up questions:");
        for question in &answer.follow_up_questions {
            println!("  - {question}");
        }
        println!();
    }

    println!("Sources:\n");
    print_articles(&articles);
    Ok(ExitCode::SUCCESS)
}

async fn run_health(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let backend = BackendClient::new(&config.search_config())?;
    if backend.health().await {
        println!("backend at {} is healthy", config.backend.base_url);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("backend at {} is unreachable", config.backend.base_url);
        Ok(ExitCode::FAILURE)
    }
}

fn init_config(path: Option<PathBuf>, config: &AppConfig, force: bool) -> anyhow::Result<ExitCode> {
    let path = path.unwrap_or_else(AppConfig::default_config_path);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    config.save_to_file(&path)?;
    println!("wrote {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn print_articles(articles: &[ScoredArticle]) {
    for (i, scored) in articles.iter().enumerate() {
        println!("{}", format_article(i + 1, scored));
    }
}

fn format_article(number: usize, scored: &ScoredArticle) -> String {
    let article = &scored.article;
    let mut out = format!("{number}. {}\n", article.title);

    let mut citation = Vec::new();
    if let Some(authors) = &article.authors {
        citation.push(authors.clone());
    }
    if let Some(journal) = &article.journal {
        citation.push(journal.clone());
    }
    if let Some(year) = article.publication_year {
        citation.push(year.to_string());
    }
    if !citation.is_empty() {
        out.push_str(&format!("   {}\n", citation.join(" · ")));
    }

    let strength = &scored.evidence_strength;
    let design = article
        .study_type
        .as_ref()
        .map_or("unspecified design", |st| st.label());
    out.push_str(&format!(
        "   Evidence: level {} ({}), {design} · relevance {}\n",
        strength.level, strength.strength, scored.relevance_score
    ));

    if !scored.quality_tags.is_empty() {
        let tags: Vec<String> = scored
            .quality_tags
            .iter()
            .map(|t| format!("{} {}", t.icon, t.label))
            .collect();
        out.push_str(&format!("   {}\n", tags.join("  ")));
    }

    if let Some(url) = &article.url {
        out.push_str(&format!("   {url}\n"));
    }
    out
}
