#[macro_use]
extern crate tracing;

pub mod block;
pub mod cli;
pub mod layout;
pub mod props;
pub mod store;
pub mod utils;
