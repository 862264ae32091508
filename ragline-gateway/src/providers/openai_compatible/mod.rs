//! OpenAI-compatible provider implementation (Ark, OpenAI, local servers).

pub mod client;

pub use client::OpenAiCompatibleClient;
