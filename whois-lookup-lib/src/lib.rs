//! # WHOIS Lookup Library
//!
//! Query a WHOIS lookup API for one domain and turn the loosely structured
//! answer into fixed-shape domain and contact records, filtered for display.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use whois_lookup_lib::{DisplayMode, LookupConfig, LookupSession, WhoisXmlClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LookupConfig::default().with_api_key(std::env::var("WL_API_KEY")?);
//!     let mut session = LookupSession::with_mode(WhoisXmlClient::new(&config)?, DisplayMode::Both);
//!
//!     session.set_input("example.com");
//!     session.submit().await;
//!
//!     for table in session.view().tables() {
//!         println!("{}", table.title);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Placeholder records**: every field is present, "Not available" when missing
//! - **Display filtering**: domain, contact, or both tables
//! - **Latest-wins**: only the most recently issued request updates the display

// Re-export main public API types and functions
pub use client::{WhoisSource, WhoisXmlClient};
pub use config::{
    env_config_from, load_env_config, parse_timeout_string, ApiConfig, ConfigManager,
    DisplayConfig, EnvConfig, FileConfig,
};
pub use error::LookupError;
pub use mapper::{field_or_placeholder, map_response};
pub use render::{
    render, summarize_hostnames, Table, View, HOSTNAME_DISPLAY_LIMIT, NO_RECORDS_MESSAGE,
};
pub use session::{LookupSession, Phase, RequestTicket, SearchState, SubmitOutcome};
pub use types::{
    ContactRecord, DisplayMode, DomainRecord, LookupConfig, LookupRecord, DEFAULT_ENDPOINT,
    PLACEHOLDER,
};

mod client;
mod config;
mod error;
mod mapper;
mod render;
mod session;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, LookupError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
