use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use super::analyze_request;
use crate::core::{
    AnalysisRequest, AnalysisResult, Capital, DEFAULT_LONGEVITY, Demographics, EngineConfig,
    FilingStatus, IncomeSources, RothAnalyzer,
};
use crate::error::{AdvisorError, Result};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliFilingStatus {
    Single,
    MarriedJointly,
    MarriedSeparately,
    HeadOfHousehold,
}

impl From<CliFilingStatus> for FilingStatus {
    fn from(value: CliFilingStatus) -> Self {
        match value {
            CliFilingStatus::Single => FilingStatus::Single,
            CliFilingStatus::MarriedJointly => FilingStatus::MarriedJointly,
            CliFilingStatus::MarriedSeparately => FilingStatus::MarriedSeparately,
            CliFilingStatus::HeadOfHousehold => FilingStatus::HeadOfHousehold,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "roth",
    about = "Roth conversion advisor (tax brackets + RMD schedule + scenario projection)",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the analysis HTTP API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
        #[arg(long, help = "JSON engine config overriding tax and RMD tables")]
        config: Option<PathBuf>,
    },
    /// Analyze one household and print the result as JSON
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(long, help = "JSON engine config overriding tax and RMD tables")]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        help = "Read the full household profile from a JSON file instead of flags"
    )]
    pub request: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = CliFilingStatus::Single)]
    pub filing_status: CliFilingStatus,
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub age_person2: Option<u32>,
    #[arg(long, default_value_t = DEFAULT_LONGEVITY)]
    pub longevity: u32,
    #[arg(long)]
    pub longevity_person2: Option<u32>,
    #[arg(long)]
    pub retirement_year: Option<u32>,
    #[arg(long)]
    pub retirement_year_person2: Option<u32>,
    #[arg(long, help = "Household taxable income")]
    pub taxable_income: Option<f64>,

    #[arg(long, default_value_t = 0.0)]
    pub traditional_balance: f64,
    #[arg(long)]
    pub traditional_balance_person2: Option<f64>,
    #[arg(
        long,
        default_value_t = 8.0,
        help = "Expected annual traditional IRA return in percent, e.g. 8"
    )]
    pub traditional_return: f64,
    #[arg(long, help = "Person 2 traditional IRA return in percent")]
    pub traditional_return_person2: Option<f64>,

    #[arg(long, default_value_t = 0.0)]
    pub roth_balance: f64,
    #[arg(long)]
    pub roth_balance_person2: Option<f64>,
    #[arg(
        long,
        default_value_t = 8.0,
        help = "Expected annual Roth return in percent, e.g. 8"
    )]
    pub roth_return: f64,
    #[arg(long, help = "Person 2 Roth return in percent")]
    pub roth_return_person2: Option<f64>,
}

pub fn load_analyzer(config: Option<&Path>) -> Result<RothAnalyzer> {
    match config {
        Some(path) => RothAnalyzer::new(&EngineConfig::load(path)?),
        None => Ok(RothAnalyzer::default()),
    }
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalysisResult> {
    let analyzer = load_analyzer(args.config.as_deref())?;
    let request = match &args.request {
        Some(path) => read_request(path)?,
        None => build_request(args)?,
    };
    analyze_request(&analyzer, &request)
}

fn read_request(path: &Path) -> Result<AnalysisRequest> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn build_request(args: &AnalyzeArgs) -> Result<AnalysisRequest> {
    let age = required(args.age, "--age")?;
    let retirement_year = required(args.retirement_year, "--retirement-year")?;
    let taxable_income = required(args.taxable_income, "--taxable-income")?;

    Ok(AnalysisRequest {
        demographics: Demographics {
            filing_status: args.filing_status.into(),
            age_person1: age,
            age_person2: args.age_person2,
            longevity_person1: args.longevity,
            longevity_person2: args.longevity_person2,
            retirement_year_person1: retirement_year,
            retirement_year_person2: args.retirement_year_person2,
            taxable_income,
        },
        income: IncomeSources::default(),
        capital: Capital {
            before_tax_ira_person1: args.traditional_balance,
            before_tax_ira_person2: args.traditional_balance_person2,
            return_traditional_person1: args.traditional_return / 100.0,
            return_traditional_person2: args.traditional_return_person2.map(|r| r / 100.0),
            roth_person1: args.roth_balance,
            roth_person2: args.roth_balance_person2,
            return_roth_person1: args.roth_return / 100.0,
            return_roth_person2: args.roth_return_person2.map(|r| r / 100.0),
            ..Capital::default()
        },
    })
}

fn required<T>(value: Option<T>, flag: &str) -> Result<T> {
    value.ok_or_else(|| {
        AdvisorError::Validation(format!("{flag} is required unless --request is given"))
    })
}
