mod actor;
mod error;
