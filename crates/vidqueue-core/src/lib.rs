pub mod actions;
pub mod api;
pub mod channel;
pub mod config;
pub mod dto;
pub mod error;
pub mod event;
pub mod fetch;
pub mod files;
pub mod reconcile;
pub mod routes;
pub mod table;
pub mod upload;

#[cfg(test)]
mod testing;

pub use api::{
  DashboardApi,
  Prompter
};
pub use error::ApiError;
