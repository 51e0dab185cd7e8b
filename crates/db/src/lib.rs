pub mod connection;
pub mod fixtures;
pub mod migrations;
pub mod repositories;
pub mod service;

pub use connection::{connect, connect_pool, DbPool};
pub use fixtures::{SeedDataset, SeedResult, SeedVerification};
pub use repositories::{RepositoryError, SqlCatalogRepository};
pub use service::{
    BoardTree, CatalogImportRequest, CreateQuoteRequest, QuoteTree, QuotingService,
    ReconcileSummary, ServiceError,
};
