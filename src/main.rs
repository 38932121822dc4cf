use clap::{Args, Parser, Subcommand};
use receipt_rewards::{
    ComparisonReport, Evaluator, ProgramEarnings, ProgramId, Settings, SpendCategory, UsageInput,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "receipt-rewards")]
#[clap(about = "Project and compare receipt-scanning reward earnings", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Projection horizon in years
    #[clap(long, default_value = "1")]
    years: u32,

    /// Receipts scanned per day, before program caps
    #[clap(long, default_value = "3")]
    receipts_per_day: u32,

    /// Spend category: mixed, groceries, restaurants, coffee, apparel, standard
    #[clap(long, default_value = "mixed")]
    category: String,

    /// Amount held in the program (Crinkl holdings tiers)
    #[clap(long, default_value = "0")]
    holdings: u64,

    /// Friends referred
    #[clap(long, default_value = "0")]
    referrals: u32,

    /// Streak consistency as a percentage, 0-100
    #[clap(long, default_value = "0")]
    streak: u32,
}

impl InputArgs {
    fn to_usage_input(&self) -> anyhow::Result<UsageInput> {
        let category = SpendCategory::from_str(&self.category)
            .ok_or_else(|| anyhow::anyhow!("Unknown category: {}", self.category))?;

        Ok(UsageInput {
            years: self.years,
            receipts_per_day: self.receipts_per_day,
            category,
            holdings_amount: self.holdings,
            referral_count: self.referrals,
            streak_consistency: self.streak as f64 / 100.0,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Project earnings for a single program
    Project {
        /// Program: crinkl, fetch, receiptpal
        #[clap(short, long)]
        program: String,

        #[clap(flatten)]
        input: InputArgs,

        /// Emit JSON instead of the breakdown
        #[clap(long)]
        json: bool,
    },

    /// Rank all programs and compare one against the best alternative
    Compare {
        /// Program to position against the field
        #[clap(short, long, default_value = "crinkl")]
        program: String,

        #[clap(flatten)]
        input: InputArgs,

        /// Emit JSON instead of the ranking
        #[clap(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let settings = Settings::new().unwrap_or_else(|_| {
        info!("Using default settings");
        Settings::default()
    });

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    let evaluator = Evaluator::new(&settings)?;

    match cli.command {
        Commands::Project { program, input, json } => {
            let program = parse_program(&program)?;
            let input = input.to_usage_input()?;
            let earnings = evaluator.evaluate(program, &input)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&earnings)?);
            } else {
                print_earnings(&settings, program, &earnings);
            }
        }

        Commands::Compare { program, input, json } => {
            let program = parse_program(&program)?;
            let input = input.to_usage_input()?;
            let results = evaluator.evaluate_all(&input)?;
            let report = evaluator.compare(program, &results)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&settings, &report);
            }
        }
    }

    Ok(())
}

fn parse_program(s: &str) -> anyhow::Result<ProgramId> {
    ProgramId::from_str(s).ok_or_else(|| anyhow::anyhow!("Unknown program: {}", s))
}

fn print_earnings(settings: &Settings, program: ProgramId, earnings: &ProgramEarnings) {
    let config = settings.programs.get(program);

    println!("\n=== {} Projection ===", config.name);
    println!(
        "Total: ${} ({} points)",
        earnings.total_usd.round_dp(2),
        earnings.total_points
    );
    println!(
        "Monthly: ${}   Yearly: ${}",
        earnings.monthly_usd.round_dp(2),
        earnings.yearly_usd.round_dp(2)
    );

    println!("\nBreakdown:");
    println!(
        "  Receipts: {} scanned -> {} points{}",
        earnings.total_receipts,
        earnings.receipt_points,
        if earnings.receipt_rate_capped {
            " (rate capped)"
        } else {
            ""
        }
    );
    if config.has_streaks() {
        println!(
            "  Streaks: {} days -> {} points",
            earnings.streak_days, earnings.streak_points
        );
    }
    if config.has_weekly_bonus() {
        println!(
            "  Weekly bonus: {} weeks -> {} points",
            earnings.qualifying_weeks, earnings.weekly_points
        );
    }
    println!(
        "  Referrals: {} friends -> {} points",
        earnings.referral_count, earnings.referral_points
    );
    if config.has_holdings() {
        println!(
            "  Holdings: {} ({}x)",
            earnings.holdings_tier, earnings.holdings_multiplier
        );
    }
}

fn print_report(settings: &Settings, report: &ComparisonReport) {
    println!("\n=== Program Comparison ===");
    for row in &report.ranking {
        let name = &settings.programs.get(row.program).name;
        let marker = if row.program == report.current {
            "  <- current"
        } else {
            ""
        };
        println!("#{} {}: ${}{}", row.rank, name, row.total_usd.round_dp(2), marker);
    }

    let current_name = &settings.programs.get(report.current).name;
    let best_name = &settings.programs.get(report.best_alternative).name;
    if report.current_leads() {
        println!(
            "\n{} earns ${} more than {}",
            current_name,
            report.difference_usd.round_dp(2),
            best_name
        );
    } else {
        println!(
            "\n{} earns ${} less than {}",
            current_name,
            (-report.difference_usd).round_dp(2),
            best_name
        );
    }
}
