//! Search provider clients.

mod serpapi;

pub use serpapi::SerpApiClient;
