// github module: the forge implementation backed by the GitHub REST API

pub mod auth;
pub mod client;
pub(crate) mod rate_limit;

pub use client::GitHubClient;
