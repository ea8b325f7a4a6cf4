mod breakeven;
mod config;
mod engine;
mod projection;
mod rmd;
mod tax;
mod types;

pub use breakeven::{BREAKEVEN_SEARCH_YEARS, NO_BREAKEVEN, breakeven_years};
pub use config::{BracketSpec, EngineConfig, FilingStatusMap, RmdConfig, TableKey, TaxConfig};
pub use engine::{
    DecisionInputs, HouseholdAccounts, RothAnalyzer, classify, format_dollars, key_factors,
    planning_longevity, summary,
};
pub use projection::{TraditionalProjection, project_taxfree, project_traditional};
pub use rmd::RmdModel;
pub use tax::{BracketTable, TaxModel};
pub use types::{
    AnalysisRequest, AnalysisResult, Capital, DEFAULT_LONGEVITY, DEFAULT_RETURN,
    DEFAULT_STOCK_ALLOCATION, Demographics, FilingStatus, IncomeSources, Inheritance,
    Recommendation,
};
