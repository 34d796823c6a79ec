#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
#[cfg(feature = "std")]
pub mod cli;
mod combat;
mod common;
pub mod config;
mod events;
mod fleet;
mod grid;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
mod ship;
mod turn;
#[cfg(feature = "std")]
pub mod ui;

pub use ai::*;
pub use combat::*;
pub use common::*;
pub use events::*;
pub use fleet::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use ship::*;
pub use turn::*;
