pub mod actions;
pub mod bus;
pub mod error;
pub mod event;
pub mod facade;
pub mod ledger;
pub mod lesson;
pub mod log;
pub mod manager;
pub mod payment;
pub mod pricing;
pub mod scenario;
pub mod subscribers;
pub mod tutor;

pub use error::{BookingError, Result};
