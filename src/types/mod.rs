//! A subset of the Stellar XDR schema: keys, assets, memos, claim
//! predicates, transactions and envelopes, ledger entries, bucket entries
//! and operation results.

mod asset;
mod claim;
mod ledger;
mod memo;
mod primitives;
mod results;
mod transaction;

pub use asset::*;
pub use claim::*;
pub use ledger::*;
pub use memo::*;
pub use primitives::*;
pub use results::*;
pub use transaction::*;
