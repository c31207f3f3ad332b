//! Alerts module - session alert store, submission pipeline, and persistence backends.

mod alerts_hook;
mod alerts_model;
mod alerts_persistence;
mod alerts_store;
mod alerts_submission;
mod alerts_traits;


pub use alerts_hook::{NoOpAlertHook, RecordingAlertHook};
pub use alerts_model::{Alert, AlertType, NewAlert};
pub use alerts_persistence::{HttpAlertPersistence, SimulatedAlertPersistence};
pub use alerts_store::AlertStore;
pub use alerts_submission::{
    parse_target_price, AlertSubmissionPipeline, SubmissionError, SubmissionErrorKind,
};
pub use alerts_traits::{AlertCreatedHook, AlertPersistence, AlertStoreTrait};
