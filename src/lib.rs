// Pedantic: suppress noise for internal crate code.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod github;
pub mod relay;
pub mod render;
pub mod targets;
pub mod types;
pub mod util;
pub mod window;

/// Install the rustls `CryptoProvider` before any TLS client is constructed.
///
/// Safe to call more than once; later calls are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}
