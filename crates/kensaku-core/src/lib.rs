pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod images;
pub mod lookup;
pub mod outcome;
pub mod query;

pub use controller::{LookupController, Snapshot};
pub use error::KensakuError;
pub use lookup::{Command, Event, LookupSettings, LookupState, RequestId, StalePolicy, TimerToken};
pub use outcome::{FetchError, LookupFailure, Outcome};
