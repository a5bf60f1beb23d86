//! churnlens: churn service CLI
//!
//! Renders the three dashboard views as text.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use churnlens::{
    ChurnLens, ChurnLensError, Command, Config, CustomerForm, Dispatch, Metric, Orchestrator,
    Outcome, View, ViewState, adapt_roc_curve, build_leaderboard, derive_aggregate_stats,
    derive_confusion, summarize_prediction,
};

/// ChurnLens CLI client
#[derive(Parser)]
#[command(name = "churnlens")]
#[command(version)]
#[command(about = "Churn prediction and analytics client")]
struct Args {
    /// Config file (default: ~/.churnlens/config.toml, then /etc/churnlens/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Service base URL (overrides the config file)
    #[arg(short, long, env = "CHURNLENS_API_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Score one customer profile
    Predict {
        #[arg(long, default_value = "France")]
        geography: String,
        #[arg(long, default_value = "Male")]
        gender: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        tenure: String,
        #[arg(long)]
        balance: String,
        #[arg(long)]
        num_of_products: String,
        #[arg(long)]
        credit_score: String,
        #[arg(long)]
        estimated_salary: String,
        /// Customer has no credit card
        #[arg(long)]
        no_credit_card: bool,
        /// Customer is not an active member
        #[arg(long)]
        inactive: bool,
    },

    /// Show population churn analytics
    Analytics,

    /// Show model comparison and evaluation
    Performance,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?.with_api_url_override(args.base_url);
    let orchestrator = ChurnLens::builder().config(config).build()?;

    match args.command {
        CliCommand::Predict {
            geography,
            gender,
            age,
            tenure,
            balance,
            num_of_products,
            credit_score,
            estimated_salary,
            no_credit_card,
            inactive,
        } => {
            let form = CustomerForm::new()
                .geography(geography)
                .gender(gender)
                .age(age)
                .tenure(tenure)
                .balance(balance)
                .num_of_products(num_of_products)
                .credit_score(credit_score)
                .estimated_salary(estimated_salary)
                .has_credit_card(!no_credit_card)
                .is_active_member(!inactive);
            run(&orchestrator, Command::Submit(form)).await?;
            print_prediction(&orchestrator)?;
        }

        CliCommand::Analytics => {
            run(&orchestrator, Command::Activate(View::Analytics)).await?;
            print_analytics(&orchestrator)?;
        }

        CliCommand::Performance => {
            run(&orchestrator, Command::Activate(View::ModelPerformance)).await?;
            print_performance(&orchestrator)?;
        }
    }

    Ok(())
}

/// Dispatch one command and wait for its outcome.
async fn run(orchestrator: &Orchestrator, command: Command) -> Result<(), ChurnLensError> {
    match orchestrator.dispatch(command) {
        Dispatch::Started(handle) => match handle.await.outcome {
            Outcome::Failed(err) => Err(err),
            Outcome::Loaded | Outcome::Superseded => Ok(()),
        },
        Dispatch::Rejected(err) => Err(err),
        Dispatch::AlreadyPending(_) | Dispatch::Cached | Dispatch::Ignored => Ok(()),
    }
}

/// Snapshot of a view that has settled.
///
/// Idle or pending views yield a plain message, not a [`ChurnLensError`].
fn loaded<T>(view: View, state: ViewState<T>) -> Result<std::sync::Arc<T>, Box<dyn Error>> {
    match state {
        ViewState::Loaded(snapshot) => Ok(snapshot),
        ViewState::Failed(err) => Err(err.into()),
        ViewState::Idle | ViewState::Pending(_) => {
            Err(format!("{view} view did not finish loading").into())
        }
    }
}

fn print_prediction(orchestrator: &Orchestrator) -> Result<(), Box<dyn Error>> {
    let result = loaded(View::Predict, orchestrator.predict_state())?;
    let summary = summarize_prediction(&result);

    println!("prediction:  {}", summary.label);
    println!("probability: {}", summary.probability_display());
    println!("risk:        {}", summary.risk.label());

    if summary.attributions.is_empty() {
        println!("\nno feature attributions");
        return Ok(());
    }
    println!("\nincreasing churn risk:");
    for driver in &summary.attributions.increasing {
        println!("  {:<24} {:>8}", driver.label(), driver.impact_display());
    }
    println!("\nreducing churn risk:");
    for driver in &summary.attributions.reducing {
        println!("  {:<24} {:>8}", driver.label(), driver.impact_display());
    }
    Ok(())
}

fn print_analytics(orchestrator: &Orchestrator) -> Result<(), Box<dyn Error>> {
    let snapshot = loaded(View::Analytics, orchestrator.analytics_state())?;
    let stats = derive_aggregate_stats(&snapshot);

    println!("overall churn rate: {}", stats.overall_churn_display());
    println!(
        "customers:          {} ({} churned, {} retained)",
        stats.total_customers, stats.churned_customers, stats.retained_customers
    );
    if let Some(geo) = stats.highest_churn_geography() {
        println!("highest churn:      {} ({})", geo.name, geo.display());
    }

    for (title, series) in [
        ("by geography", &stats.geography),
        ("by gender", &stats.gender),
        ("by activity", &stats.activity),
    ] {
        if series.is_empty() {
            continue;
        }
        println!("\n{title}:");
        for point in series.points() {
            println!("  {:<16} {:>7}", point.name, point.display());
        }
    }
    Ok(())
}

fn print_performance(orchestrator: &Orchestrator) -> Result<(), Box<dyn Error>> {
    let performance = loaded(View::ModelPerformance, orchestrator.model_performance_state())?;
    let leaderboard = build_leaderboard(&performance);

    println!(
        "{:<24} {:>9} {:>9} {:>7}",
        "model", "accuracy", "recall", "auc"
    );
    for row in &leaderboard.rows {
        let marker = if row.selected { " *" } else { "" };
        println!(
            "{:<24} {:>9} {:>9} {:>7}{marker}",
            row.row.model,
            row.accuracy_display(),
            row.recall_display(),
            row.auc_display()
        );
    }
    if let Some(best) = leaderboard.best_by(Metric::Recall) {
        println!("\nbest recall: {}", best.row.model);
    }
    if !leaderboard.selection_reason.is_empty() {
        println!("selection: {}", leaderboard.selection_reason);
    }

    // A bad matrix or curve must not hide the rest of the view.
    match derive_confusion(&performance.confusion_matrix) {
        Ok(cm) => {
            println!("\nconfusion matrix ({} samples):", cm.total);
            println!(
                "  TN {:>6} ({})   FP {:>6} ({})",
                cm.true_negative.count,
                cm.true_negative.display(),
                cm.false_positive.count,
                cm.false_positive.display()
            );
            println!(
                "  FN {:>6} ({})   TP {:>6} ({})",
                cm.false_negative.count,
                cm.false_negative.display(),
                cm.true_positive.count,
                cm.true_positive.display()
            );
        }
        Err(err) => println!("\nconfusion matrix unavailable: {err}"),
    }

    match adapt_roc_curve(&performance.roc_curve) {
        Ok(roc) => println!("\nROC: {} points, {}", roc.points.len(), roc.auc_display()),
        Err(err) => println!("\nROC unavailable: {err}"),
    }
    Ok(())
}
