pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod normalize;
pub mod types;

pub use config::{CandidateConfig, Config, SummaryConfig};
pub use error::{NormalizerError, Result};
pub use normalize::{normalize_price, summarize_promotions, NormalizationFacade};
pub use types::{
    CurrencyCode, InstallmentOffer, NormalizedPrice, PromotionSignals, RawPriceInput, RefineInput,
    Refinement,
};
