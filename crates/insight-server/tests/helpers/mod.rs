//! Test helpers para insight-server.

#![allow(dead_code, unused_imports)]

pub mod chain;
pub mod client;

pub use chain::{BEST_HASH, GENESIS_HASH, MockChain};
pub use client::{TestClient, TestResponse, client, client_with, state_with};
