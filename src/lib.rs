pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod file;
pub mod preview;
pub mod runtime;
pub mod selection;
pub mod view;

pub use config::Opts;
pub use controller::{Command, Controller, Event, SearchState};
pub use runtime::{App, Subscription};
