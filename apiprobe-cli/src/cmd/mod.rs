pub mod candidates;
pub mod config;
pub mod discover;
pub mod endpoints;
pub mod run;
