//! Synchronous client for the Trello REST API.
//!
//! # Overview
//! Fetches members, and the boards, cards and organizations they belong
//! to. Every fetched entity keeps a handle to the `Client` that produced it,
//! so it can issue its own follow-up calls (`board.get_members(..)`,
//! `member.get_boards(..)`).
//!
//! # Design
//! - `Client` is a shared handle; cloning it is cheap and every clone talks
//!   to the same transport with the same credentials.
//! - Each GET is split into `build_get` (produces an `HttpRequest`), a
//!   `Transport` round-trip, and `parse_response`, so tests can replace the
//!   network with a scripted transport.
//! - Query options are passed as one `Arguments` value; combine several with
//!   `Arguments::flatten` (last set wins per key).
//! - All failures surface as `ApiError`; nothing is retried.

pub mod arguments;
pub mod board;
pub mod card;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod member;
pub mod organization;

#[cfg(any(test, feature = "test-utils"))]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
pub mod mock;

pub use arguments::Arguments;
pub use board::Board;
pub use card::Card;
pub use client::Client;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse, Transport, UreqTransport};
pub use member::Member;
pub use organization::Organization;
