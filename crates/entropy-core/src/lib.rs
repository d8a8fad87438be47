//! Core of the Entropy wallet bot: per-participant conversation flow,
//! session storage, and the leaf collaborators (price oracle, QR
//! renderer, wallet generator).
//!
//! The transport (Telegram polling, keyboard rendering) lives in
//! `entropy-bot`; this crate never depends on it.

pub mod config;
pub mod flow;
pub mod oracle;
pub mod qr;
pub mod wallet;
