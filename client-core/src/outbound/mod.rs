//! Outbound adapters: storage media, local repositories, the remote API
//! client, and the remote-first fallback gateway.

pub mod gateway;
pub mod persistence;
pub mod remote;
pub mod storage;
