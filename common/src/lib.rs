pub mod bus;
pub mod cli;
pub mod config;
pub mod notification;
pub mod notifier;
pub mod protocol;
pub mod utils;

#[cfg(test)]
mod testing;
