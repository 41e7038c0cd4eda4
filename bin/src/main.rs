//! CLI for the dupont quality factor panel engine.
//!
//! Provides introspection of the engine's vocabulary and horizons, plus a
//! self-contained demonstration run of the full pipeline on a synthetic
//! universe (data acquisition lives outside this crate).

use chrono::{Duration, NaiveDate};
use clap::{Parser, Subcommand};
use dupont::statements::{EQUITY_LABELS, NET_INCOME, TOTAL_ASSETS, TOTAL_REVENUE};
use dupont::{EntityData, Horizon, LineItemTable, Panel, PriceSeries, analysis, build_panel};

#[derive(Parser)]
#[command(name = "dupont")]
#[command(about = "DuPont quality factor panel engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the forward measurement horizons
    Horizons,
    /// Show the fundamental line-item vocabulary
    Labels,
    /// Run the pipeline on a synthetic universe and print the analyses
    Demo {
        /// Emit the scored panel as JSON instead of the analysis summary
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Horizons => list_horizons(),
        Commands::Labels => list_labels(),
        Commands::Demo { json } => run_demo(json),
    }
}

fn list_horizons() {
    println!("Forward horizons (calendar days, end snapped to next trading date):");
    for horizon in Horizon::ALL {
        println!("  {} - {} days", horizon, horizon.days());
    }
}

fn list_labels() {
    println!("Income statement:");
    println!("  {NET_INCOME}");
    println!("  {TOTAL_REVENUE}");
    println!("Balance sheet:");
    println!("  {TOTAL_ASSETS}");
    println!("  equity, first label with data wins:");
    for label in EQUITY_LABELS {
        println!("    {label}");
    }
}

/// Build the panel for a small synthetic universe and print every analysis.
fn run_demo(json: bool) {
    let benchmark = demo_series(0.06, 1.5);
    let entities = demo_universe();

    let panel = build_panel(&entities, &benchmark).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });

    if json {
        let rendered = serde_json::to_string_pretty(&panel).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        });
        println!("{rendered}");
        return;
    }

    println!("Panel: {} scored records\n", panel.len());
    print_rankings(&panel);
    print_hit_rate(&panel);
    print_quintiles(&panel);
    print_matrix(&panel);
}

fn print_rankings(panel: &Panel) {
    println!("Latest records by quality score:");
    for record in analysis::latest_rankings(panel) {
        println!(
            "  {:<6} {}  score {:>7.3}  1Y alpha {}",
            record.record.entity,
            record.record.period_end,
            record.quality_score.unwrap_or(f64::NAN),
            format_pct(record.fwd_1y.alpha),
        );
    }
    println!();
}

fn print_hit_rate(panel: &Panel) {
    let hit_rate = analysis::hit_rate(panel);
    println!(
        "Hit rate: {} of {} quality improvers also improved 1Y alpha ({})",
        hit_rate.hits,
        hit_rate.improvers,
        format_pct(hit_rate.ratio()),
    );
    println!();
}

fn print_quintiles(panel: &Panel) {
    println!("Mean 1Y alpha by quality quintile (Q1 lowest score):");
    for stat in analysis::quintile_mean_alpha(panel) {
        println!(
            "  Q{} (n={:>2}): {}",
            stat.quintile,
            stat.count,
            format_pct(stat.mean_alpha)
        );
    }
    println!();
}

fn print_matrix(panel: &Panel) {
    let Some(matrix) = analysis::quality_matrix(panel) else {
        println!("ROE vs. quality matrix: no scoreable records");
        return;
    };
    println!("ROE vs. quality matrix (mean 1Y alpha):");
    println!(
        "  high quality: high ROE {}, low ROE {}",
        format_pct(matrix.high_quality_high_roe.mean_alpha),
        format_pct(matrix.high_quality_low_roe.mean_alpha),
    );
    println!(
        "  low quality:  high ROE {}, low ROE {}",
        format_pct(matrix.low_quality_high_roe.mean_alpha),
        format_pct(matrix.low_quality_low_roe.mean_alpha),
    );
}

fn format_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v * 100.0))
}

/// Daily close series from 2021-01-04: exponential drift per year plus a
/// deterministic wobble.
fn demo_series(drift: f64, wobble: f64) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2021, 1, 4).expect("valid date");
    PriceSeries::new((0..1400).map(|i| {
        let t = f64::from(i);
        let close = 100.0 * (drift * t / 365.0).exp() + wobble * (t / 17.0).sin();
        (start + Duration::days(i64::from(i)), close)
    }))
    .expect("synthetic dates are strictly increasing")
}

/// Six synthetic entities with three fiscal years each; one reports equity
/// under the synonym label and one reports no equity at all (and is
/// skipped by the factor builder).
fn demo_universe() -> Vec<EntityData> {
    let fiscal_years = [
        NaiveDate::from_ymd_opt(2021, 3, 31).expect("valid date"),
        NaiveDate::from_ymd_opt(2022, 3, 31).expect("valid date"),
        NaiveDate::from_ymd_opt(2023, 3, 31).expect("valid date"),
    ];

    // (name, drift, wobble, margin trend, leverage trend)
    let profiles: [(&str, f64, f64, f64, f64); 6] = [
        ("LEAN", 0.16, 2.0, 0.015, -0.10),
        ("GROW", 0.12, 3.0, 0.010, 0.05),
        ("FLAT", 0.05, 1.0, 0.000, 0.00),
        ("DEBT", 0.09, 4.0, -0.005, 0.60),
        ("SLIM", 0.02, 2.5, -0.010, 0.20),
        ("BARE", 0.07, 1.5, 0.005, 0.10),
    ];

    profiles
        .iter()
        .enumerate()
        .map(|(index, &(name, drift, wobble, margin_trend, leverage_trend))| {
            let mut income = LineItemTable::new();
            let mut balance = LineItemTable::new();
            for (year, &period) in fiscal_years.iter().enumerate() {
                let t = year as f64;
                let revenue = 100.0 + 10.0 * t + 5.0 * index as f64;
                let margin = 0.08 + 0.01 * index as f64 + margin_trend * t;
                let assets = 300.0 + 20.0 * t;
                let leverage = 2.0 + leverage_trend * t;

                income.insert(NET_INCOME, period, margin * revenue);
                income.insert(TOTAL_REVENUE, period, revenue);
                balance.insert(TOTAL_ASSETS, period, assets);
                match name {
                    // BARE never reports equity; SLIM uses the synonym label
                    "BARE" => {}
                    "SLIM" => balance.insert(EQUITY_LABELS[1], period, assets / leverage),
                    _ => balance.insert(EQUITY_LABELS[0], period, assets / leverage),
                }
            }
            EntityData {
                entity: name.to_string(),
                income,
                balance,
                prices: demo_series(drift, wobble),
            }
        })
        .collect()
}
