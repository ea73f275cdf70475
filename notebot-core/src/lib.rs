//! # notebot-core
//!
//! Core types and traits for the capture bot: [`Bot`], [`Handler`], message and
//! content types, error enums, and tracing initialization. Transport-agnostic;
//! used by the notebot binary and its handlers.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{HandlerError, NotebotError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, MessageContent, User};
