//! Lead Finder - command line entry point
//!
//! Logs go to stderr; stdout carries only command output so it can be piped.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lead_finder::pipeline::{best_index, validate_all};
use lead_finder::storage::write_rows;
use lead_finder::{
    normalize, BatchRequest, Config, DnsValidator, DomainDiscovery, Enricher,
    HeadcountEstimator, HickoryLookup, Metrics, ParallelEnricher, SearchClient, SearchFilters,
    SearchSource, SearchTarget, SeenUrls,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lead-finder", version, about = "Find leads and infer their email addresses")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for people or companies, then enrich and export the results
    Search(SearchArgs),
    /// Find a company's website domain
    Discover {
        /// Company name
        company: String,
    },
    /// Generate and validate candidate addresses for a person
    Guess {
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
        #[arg(long)]
        domain: String,
    },
    /// Validate one email address against DNS
    Validate {
        email: String,
    },
    /// Print the registrable domain of a URL or host
    Normalize {
        input: String,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Role or job title (repeatable)
    #[arg(long = "role")]
    roles: Vec<String>,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    state: String,
    #[arg(long, default_value = "")]
    zip: String,
    #[arg(long, default_value = "")]
    area_code: String,
    #[arg(long, default_value = "")]
    country: String,
    #[arg(long, default_value = "")]
    industry: String,

    /// people or companies
    #[arg(long, default_value = "people")]
    target: SearchTarget,

    /// linkedin, general or both
    #[arg(long, default_value = "linkedin")]
    source: SearchSource,

    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(10..=50))]
    per_page: u16,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Keep results already in the seen-URL ledger
    #[arg(long)]
    no_skip_seen: bool,

    /// Do not add this run's URLs to the ledger
    #[arg(long)]
    no_remember_seen: bool,

    #[arg(long, default_value = "seen_urls.csv")]
    seen_file: PathBuf,

    #[arg(long, default_value = "eval_leads.csv")]
    output: PathBuf,

    /// People enriched concurrently (defaults to WORKER_COUNT)
    #[arg(long)]
    workers: Option<usize>,

    /// Skip fetching company pages for headcount
    #[arg(long)]
    no_headcount: bool,
}

impl SearchArgs {
    fn to_request(&self) -> BatchRequest {
        BatchRequest {
            filters: SearchFilters {
                roles: self.roles.clone(),
                city: self.city.clone(),
                state: self.state.clone(),
                zip: self.zip.clone(),
                area_code: self.area_code.clone(),
                country: self.country.clone(),
                industry: self.industry.clone(),
            },
            target: self.target,
            source: self.source,
            per_page: usize::from(self.per_page),
            page: self.page as usize,
            skip_seen: !self.no_skip_seen,
            remember_seen: !self.no_remember_seen,
            with_headcount: !self.no_headcount,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration comes first so LOG_LEVEL (from the env or .env) sets the filter
    let config = Config::from_env().context("Failed to load configuration")?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let metrics = Metrics::new();

    match cli.command {
        Command::Search(args) => run_search(&config, &metrics, args).await?,
        Command::Discover { company } => {
            config.require_search_credentials()?;
            let discovery = build_discovery(&config, &metrics)?;
            match discovery.discover(&company) {
                Some(domain) => println!("{}", domain),
                None => println!("No domain found for {:?}", company),
            }
        }
        Command::Guess { first, last, domain } => {
            let validator = build_validator(&config, &metrics)?;
            let domain = normalize(&domain);
            let scored = validate_all(&validator, &first, &last, &domain);
            if scored.is_empty() {
                println!("No candidates for {} {} at {:?}", first, last, domain);
            }
            let best = best_index(&scored);
            for (i, s) in scored.iter().enumerate() {
                let marker = if Some(i) == best { "*" } else { " " };
                println!(
                    "{} {:<40} {:<12} {:<8} {:<18} {}",
                    marker,
                    s.result.email,
                    s.candidate.convention,
                    s.result.status,
                    s.result.reason,
                    s.result.mx_hosts_joined()
                );
            }
        }
        Command::Validate { email } => {
            let validator = build_validator(&config, &metrics)?;
            let result = validator.validate(email.trim());
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Normalize { input } => {
            println!("{}", normalize(&input));
        }
    }

    let summary = metrics.summary();
    info!(
        "Done - searches: {}, http requests: {} ({} errors, avg {:.0}ms), dns lookups: {} ({} failed, {} cache hits), candidates: {}, validated: {}",
        summary.searches_total,
        summary.http_requests_total,
        summary.http_errors_total,
        summary.http_duration_avg_ms,
        summary.dns_lookups_total,
        summary.dns_failures_total,
        summary.dns_cache_hits_total,
        summary.candidates_generated_total,
        summary.emails_validated_total
    );

    Ok(())
}

fn build_validator(config: &Config, metrics: &Metrics) -> Result<DnsValidator> {
    let lookup = HickoryLookup::new(config.dns_timeout())
        .context("Failed to initialize DNS resolver")?;
    Ok(DnsValidator::new(Arc::new(lookup), config.dns_cache_ttl_secs)
        .with_distinguished_failures(config.distinguish_dns_failures)
        .with_metrics(metrics.clone()))
}

fn build_discovery(config: &Config, metrics: &Metrics) -> Result<DomainDiscovery> {
    let client = SearchClient::from_config(config, config.discovery_timeout(), metrics.clone())?;
    Ok(DomainDiscovery::new(Arc::new(client), config.dns_cache_ttl_secs))
}

async fn run_search(config: &Config, metrics: &Metrics, args: SearchArgs) -> Result<()> {
    // Credentials are checked before any query runs
    config.require_search_credentials()?;

    let request = args.to_request();
    let search = SearchClient::from_config(config, config.request_timeout(), metrics.clone())?;
    info!("Search providers: {}", search.provider_names().join(" -> "));

    let mut enricher = Enricher::new(
        Arc::new(search),
        build_discovery(config, metrics)?,
        build_validator(config, metrics)?,
    );
    if request.with_headcount {
        enricher =
            enricher.with_headcount(HeadcountEstimator::new(config.fetch_timeout(), metrics.clone()));
    }

    let seen = if request.skip_seen || request.remember_seen {
        SeenUrls::load(&args.seen_file)
            .with_context(|| format!("Failed to read ledger {}", args.seen_file.display()))?
    } else {
        SeenUrls::new()
    };

    let workers = args.workers.unwrap_or(config.worker_count);
    let outcome = ParallelEnricher::new(enricher, workers)
        .run_batch(&request, seen)
        .await;

    for run in &outcome.queries {
        println!("[{}] {} ({} results)", run.label, run.query, run.results.len());
    }
    println!("{} unique URLs after dedupe", outcome.unique.len());

    if request.remember_seen {
        // Rows are still exported if the ledger cannot be written
        if let Err(e) = outcome.seen.save(&args.seen_file) {
            warn!("Failed to save ledger {}: {}", args.seen_file.display(), e);
        }
    }

    write_rows(&args.output, &outcome.rows)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Wrote {} rows to {}", outcome.rows.len(), args.output.display());

    Ok(())
}
