//! DifyASR Library
//!
//! Speech recognition adapter for a digital-human application: forwards
//! recorded audio to a Dify workflow API, retrieves the transcript, and
//! applies a per-session wake-word gate before handing text downstream.

pub mod asr;
pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
