//! cumulus-core: Inventory synthesis pipeline
//!
//! Turns the raw server listing of a cloud account into a host/group/variable
//! graph for automation tooling: fetch -> filter -> resolve connection
//! address -> project variables -> apply constructed grouping rules.
//!
//! The cloud API is consumed through the [`CloudApi`](cumulus_client::CloudApi)
//! trait and the templating language used by constructed rules through
//! [`ExpressionEvaluator`]; both are injected, never ambient.

pub mod address;
pub mod assembler;
pub mod config;
pub mod constructed;
pub mod error;
pub mod filter;
pub mod inventory;
pub mod labels;
pub mod project;

pub use address::{AddressBook, resolve_address};
pub use assembler::{InventoryAssembler, TOP_GROUP};
pub use config::{AuthConfig, ConnectWith, FilterCriteria, InventoryConfig, KeyedGroup};
pub use constructed::{EvalError, ExpressionEvaluator};
pub use error::{InventoryError, ResolveError};
pub use filter::{FilterChain, FilterOutcome};
pub use inventory::{Host, Inventory};
pub use project::{HostRecord, InstanceProjector};
