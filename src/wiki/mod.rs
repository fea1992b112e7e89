// src/wiki/mod.rs
// =============================================================================
// This module is the Wikipedia collaborator: everything that talks to the
// remote site lives here, behind the search engine's LinkSource trait.
//
// Submodules:
// - client: fetches article HTML and extracts qualifying article links
// - limiter: enforces minimum spacing between outbound requests
//
// The search engine in src/search/ never imports reqwest or scraper; it
// only sees fetch_links(title) -> set of titles. That keeps the engine
// testable against in-memory graphs.
// =============================================================================

mod client;
mod limiter;

// Re-export the public surface
pub use client::WikiClient;
