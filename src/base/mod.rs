//! Base types and error handling.
//!
//! Provides foundational types shared by the client and the relay:
//! - [`ChatError`](chaterror::ChatError): every failure the crate reports
//! - [`ClientState`](clientstate::ClientState): the client lifecycle

pub mod chaterror;
pub mod clientstate;
pub mod context;
