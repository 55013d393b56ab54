use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use underwriting::config::AppConfig;
use underwriting::error::AppError;
use underwriting::{
    apply_relevance, feed, telemetry, PortfolioView, ScoredPolicy, SubmissionPipeline,
};

#[derive(Parser, Debug)]
#[command(
    name = "Appetite Engine",
    about = "Score underwriting submissions against carrier risk appetite",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify, score, and aggregate a submission feed
    Score(ScoreArgs),
    /// Split a submission feed into in/out of appetite
    Filter(FilterArgs),
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Submission feed (integration envelope or bare JSON array)
    #[arg(long)]
    input: PathBuf,
    /// Where to write the aggregated account graph
    #[arg(long)]
    output: Option<PathBuf>,
    /// Which guideline revision to apply
    #[arg(long, value_enum, default_value_t = Ruleset::Strict)]
    ruleset: Ruleset,
    /// Optional reranker relevance sidecar (JSON array of {index, relevance_score})
    #[arg(long)]
    relevance: Option<PathBuf>,
    /// How many top-scored policies to list
    #[arg(long, default_value_t = 5)]
    top: usize,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long, value_enum, default_value_t = Ruleset::Strict)]
    ruleset: Ruleset,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Ruleset {
    /// Broad property intake: graded scores, frame exclusion
    Strict,
    /// Target segment: gated scores, fixed state set, premium band
    Target,
}

impl Ruleset {
    fn pipeline(self, config: &AppConfig) -> SubmissionPipeline {
        match self {
            Ruleset::Strict => SubmissionPipeline::strict(&config.underwriting),
            Ruleset::Target => SubmissionPipeline::target_segment(&config.underwriting),
        }
    }
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Score(args) => run_score(args, &config),
        Command::Filter(args) => run_filter(args, &config),
    }
}

fn run_score(args: ScoreArgs, config: &AppConfig) -> Result<(), AppError> {
    let records = feed::load_records(&args.input)?;
    info!(count = records.len(), input = %args.input.display(), "loaded submissions");

    let pipeline = args.ruleset.pipeline(config);
    let mut scored = pipeline.annotate(&records);

    if let Some(path) = &args.relevance {
        let annotations = feed::load_relevance(path)?;
        apply_relevance(&mut scored, &annotations);
        info!(count = annotations.len(), "attached reranker relevance");
    }

    render_top_policies(&scored, args.top);

    let view = underwriting::aggregate_accounts(scored);
    render_account_summary(&view);

    if let Some(path) = &args.output {
        feed::write_portfolio(path, &view)?;
        info!(output = %path.display(), "wrote account graph");
    }

    Ok(())
}

fn run_filter(args: FilterArgs, config: &AppConfig) -> Result<(), AppError> {
    let records = feed::load_records(&args.input)?;
    let pipeline = args.ruleset.pipeline(config);
    let scored = pipeline.annotate(&records);

    let eligible = scored.iter().filter(|policy| policy.eligible).count();
    println!("In-Appetite: {eligible} policies");
    println!("Out-of-Appetite: {} policies", scored.len() - eligible);

    let mut shown = 0;
    for policy in scored.iter().filter(|policy| !policy.eligible) {
        if shown == 5 {
            break;
        }
        if let Some(reason) = &policy.reason {
            let id = policy
                .record
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "?".to_string());
            println!("- ID {id} | {} | {reason}", policy.record.account_name());
            shown += 1;
        }
    }

    Ok(())
}

/// Top policies by appetite score, descending; ties keep feed order.
fn rank_by_appetite(scored: &[ScoredPolicy], limit: usize) -> Vec<&ScoredPolicy> {
    let mut ranked: Vec<&ScoredPolicy> = scored.iter().collect();
    ranked.sort_by(|a, b| {
        b.appetite_score
            .partial_cmp(&a.appetite_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

fn render_top_policies(scored: &[ScoredPolicy], limit: usize) {
    if limit == 0 {
        return;
    }
    println!("Top policies by appetite score");
    for policy in rank_by_appetite(scored, limit) {
        let id = policy
            .record
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "?".to_string());
        let marker = if policy.eligible { "in" } else { "out" };
        println!(
            "- ID {id} | appetite {:.2} | risk {:.2} | {marker} | {}",
            policy.appetite_score,
            policy.risk_score,
            policy.record.account_name()
        );
    }
}

fn render_account_summary(view: &PortfolioView) {
    println!(
        "\nAccounts: {} ({} policies)",
        view.accounts.len(),
        view.policy_count()
    );
    for (name, account) in &view.accounts {
        match account.weighted_score {
            Some(weighted) => println!(
                "- {name}: weighted relevance {weighted:.3}, weighted risk {:.2}, {} policies",
                account.weighted_risk_score,
                account.policies.len()
            ),
            None => println!(
                "- {name}: weighted risk {:.2}, {} policies",
                account.weighted_risk_score,
                account.policies.len()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use underwriting::config::UnderwritingConfig;
    use underwriting::PolicyRecord;

    fn scored_with_appetite(id: &str, appetite_score: f64) -> ScoredPolicy {
        ScoredPolicy {
            record: PolicyRecord {
                id: Some(underwriting::PolicyId(id.to_string())),
                ..PolicyRecord::default()
            },
            appetite_score,
            risk_score: 0.0,
            eligible: true,
            reason: None,
            relevance_score: None,
            score: None,
            justification_points: Vec::new(),
            references: Vec::new(),
        }
    }

    #[test]
    fn ranking_orders_by_appetite_descending() {
        let scored = vec![
            scored_with_appetite("a", 40.0),
            scored_with_appetite("b", 90.0),
            scored_with_appetite("c", 61.5),
        ];

        let ranked = rank_by_appetite(&scored, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].appetite_score, 90.0);
        assert_eq!(ranked[1].appetite_score, 61.5);
    }

    #[test]
    fn ruleset_selects_matching_pipeline() {
        let config = AppConfig {
            environment: underwriting::config::AppEnvironment::Test,
            telemetry: underwriting::config::TelemetryConfig {
                log_level: "info".to_string(),
            },
            underwriting: UnderwritingConfig::default(),
        };

        // A renewal scores under the graded ruleset but gates to zero
        // under the target ruleset.
        let record: PolicyRecord = serde_json::from_str(
            r#"{
                "line_of_business": "COMMERCIAL PROPERTY",
                "renewal_or_new_business": "RENEWAL",
                "tiv": 20000000,
                "total_premium": 100000,
                "construction_type": "Fire Resistive",
                "oldest_building": 2012
            }"#,
        )
        .expect("record parses");

        let graded = Ruleset::Strict.pipeline(&config).annotate(&[record.clone()]);
        let gated = Ruleset::Target.pipeline(&config).annotate(&[record]);

        assert!(graded[0].appetite_score > 0.0);
        assert_eq!(gated[0].appetite_score, 0.0);
    }
}
