//! # splitdns
//!
//! Resolves domains over DNS-over-HTTPS, following CNAME chains, and reports
//! whether the final name falls under a configured domain-suffix rule.

mod bootstrap;
mod di;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use splitdns_application::ports::{ResolutionEvent, ResolutionEventSink};
use splitdns_domain::rule::DOMAIN_SUFFIX_PREFIX;
use splitdns_domain::{AliasedResolution, CliOverrides, Config, RuleSet};
use splitdns_infrastructure::dns::{
    CacheMetrics, ChannelEventSink, FanoutEventSink, ResolutionMetrics, TracingEventSink,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use bootstrap::{init_logging, load_config};
use di::Services;

#[derive(Parser)]
#[command(name = "splitdns")]
#[command(version)]
#[command(about = "Split-routing DNS resolver with domain-suffix rules")]
struct Cli {
    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, global = true)]
    log_level: Option<String>,

    /// DNS-over-HTTPS endpoint
    #[arg(long, global = true)]
    doh_url: Option<String>,

    /// Rule file with DOMAIN-SUFFIX entries
    #[arg(short = 'r', long, global = true)]
    rules: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve domains and report their rule match
    Resolve(ResolveArgs),

    /// Check domains against the rules without resolving them
    Match {
        #[arg(required = true)]
        domains: Vec<String>,
    },

    /// Print the loaded rules
    Rules,
}

#[derive(Args)]
struct ResolveArgs {
    #[arg(required = true)]
    domains: Vec<String>,

    /// One JSON object per line instead of text
    #[arg(long)]
    json: bool,

    /// Print each resolution's event trail
    #[arg(long)]
    trace: bool,

    /// Print resolution and cache counters at the end
    #[arg(long)]
    stats: bool,
}

#[derive(Serialize)]
struct ResolveOutput<'a> {
    domain: &'a str,
    matched: bool,
    answer: Option<&'a str>,
    cname: Option<&'a str>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        doh_url: cli.doh_url.clone(),
        rules_path: cli.rules.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = load_config(cli.config.as_deref(), overrides)?;
    init_logging(&config);

    match cli.command {
        Command::Resolve(args) => run_resolve(&config, args).await,
        Command::Match { domains } => {
            let services = Services::build(&config, Arc::new(TracingEventSink));
            let rules = services.load_rules.execute().await?;
            for domain in &domains {
                println!("{} matched={}", domain, rules.matches(domain));
            }
            Ok(())
        }
        Command::Rules => {
            let services = Services::build(&config, Arc::new(TracingEventSink));
            let rules = services.load_rules.execute().await?;
            for rule in rules.iter() {
                println!("{}{}", DOMAIN_SUFFIX_PREFIX, rule.suffix);
            }
            Ok(())
        }
    }
}

async fn run_resolve(config: &Config, args: ResolveArgs) -> anyhow::Result<()> {
    let metrics = ResolutionMetrics::new();
    let mut events = FanoutEventSink::new().with(Arc::new(TracingEventSink));
    let mut trail = None;

    if args.trace {
        let (sink, rx) = ChannelEventSink::new_enabled();
        events = events.with(Arc::new(sink));
        trail = Some(rx);
    }
    if args.stats {
        events = events.with(Arc::new(metrics.clone()));
    }

    let events: Arc<dyn ResolutionEventSink> = Arc::new(events);
    let services = Services::build(config, events);
    let rules = Arc::new(services.load_rules.execute().await?);

    let results = resolve_all(&services, &rules, &args.domains).await?;

    for (domain, result) in args.domains.iter().zip(&results) {
        print_result(domain, result, args.json)?;
    }

    if let Some(mut rx) = trail {
        print_trail(&mut rx);
    }

    if args.stats {
        print_stats(&metrics, &services.cache_metrics);
    }

    Ok(())
}

/// Resolves every domain concurrently against the shared cache and returns
/// results in input order.
async fn resolve_all(
    services: &Services,
    rules: &Arc<RuleSet>,
    domains: &[String],
) -> anyhow::Result<Vec<AliasedResolution>> {
    let mut tasks = JoinSet::new();

    for (index, domain) in domains.iter().enumerate() {
        let resolve = Arc::clone(&services.resolve);
        let rules = Arc::clone(rules);
        let domain = domain.clone();
        tasks.spawn(async move { (index, resolve.execute_with_alias(&domain, &rules).await) });
    }

    let mut results = vec![AliasedResolution::negative(); domains.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined?;
        results[index] = result;
    }

    Ok(results)
}

fn print_result(domain: &str, result: &AliasedResolution, json: bool) -> anyhow::Result<()> {
    let resolution = &result.resolution;

    if json {
        let output = ResolveOutput {
            domain,
            matched: resolution.matched,
            answer: resolution.answer.as_deref(),
            cname: result.last_cname.as_deref(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "{} matched={} answer={} cname={}",
            domain,
            resolution.matched,
            resolution.answer.as_deref().unwrap_or("-"),
            result.last_cname.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

fn print_trail(rx: &mut mpsc::UnboundedReceiver<ResolutionEvent>) {
    while let Ok(event) = rx.try_recv() {
        let line = match event {
            ResolutionEvent::CacheHit { domain, answer } => {
                format!("cache-hit {} -> {}", domain, answer)
            }
            ResolutionEvent::Answer {
                domain,
                record_type,
                answer,
            } => format!("answer {} {} -> {}", domain, record_type, answer),
            ResolutionEvent::CnameFollowed { from, to } => format!("cname {} -> {}", from, to),
            ResolutionEvent::BackendError {
                domain,
                record_type,
                error,
            } => format!("error {} {}: {}", domain, record_type, error),
            ResolutionEvent::Terminated {
                requested,
                position,
                termination,
                hops,
            } => format!(
                "done {} at {} ({}, {} hops)",
                requested, position, termination, hops
            ),
        };
        println!("  {}", line);
    }
}

fn print_stats(metrics: &ResolutionMetrics, cache: &CacheMetrics) {
    println!(
        "resolutions={} successful={} failed={} avg_hops={:.2} cnames={} backend_errors={}",
        metrics.resolutions(),
        metrics.successful(),
        metrics.failed(),
        metrics.avg_hops(),
        metrics.cnames_followed(),
        metrics.backend_errors(),
    );
    println!(
        "cache hits={} misses={} insertions={} evictions={} hit_rate={:.1}%",
        cache.hits(),
        cache.misses(),
        cache.insertions(),
        cache.evictions(),
        cache.hit_rate(),
    );
}
