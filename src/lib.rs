pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod loader;
pub mod models;
pub mod report;
pub mod scanner;
pub mod utils;

pub use error::ProfitError;
pub use models::{PriceRecord, ProfitResult};
pub use scanner::{compute_max_profit, try_compute_max_profit};
