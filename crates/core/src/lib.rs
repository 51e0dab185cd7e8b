pub mod classify;
pub mod config;
pub mod domain;
pub mod errors;
pub mod merge;
pub mod numbering;
pub mod policy;
pub mod reconcile;
pub mod refresh;
pub mod synth;
pub mod totals;

pub use classify::{classify, Classification, ClassifierInput};
pub use domain::board::{
    normalize_name, Board, BoardConfig, BoardId, BoardType, EnclosureType, Material, WcMeterType,
    MAX_WC_QUANTITY,
};
pub use domain::catalog::{CatalogEntry, CatalogEntryId, MeterType};
pub use domain::item::{line_cost, Item, ItemId, ItemIdentity, ProposedItem};
pub use domain::quote::{Quote, QuoteId, QuoteNumber, QuoteStatus};
pub use domain::settings::{Settings, SettingsSnapshot};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use merge::{fold_proposals, resolve, MergeOutcome};
pub use numbering::{next_quote_number, parse_quote_number};
pub use policy::{PolicyRule, PolicyTable};
pub use reconcile::{reconcile, ChangeSet};
pub use refresh::refresh_item_prices;
pub use synth::{synthesize, LinePrice, PriceBook};
pub use totals::{compute_totals, QuoteTotals};
