//! Protocol Module
//!
//! Defines the line protocol for client-server communication.
//!
//! ## Request Format
//! One command per line, fields separated by whitespace, verb case-insensitive:
//! ```text
//! WRITE-TABLE SHOP:ITEMS name:-s-p-a-c-e-pen-n-e-w-l-i-n-e-price:-s-p-a-c-e-5\n
//! ```
//!
//! ## Response Format
//! The payload byte length on its own line, then the payload bytes:
//! ```text
//! ┌──────────────────┬─────────────────────────────┐
//! │ "<len>\n"        │         Payload             │
//! └──────────────────┴─────────────────────────────┘
//! ```
//! Success and error payloads are framed identically.
//!
//! ## Content Encoding
//! Multi-line documents travel inside a single request line with spaces and
//! newlines replaced by sentinel tokens (see [`encode_content`]).

mod command;
mod response;
mod codec;

pub use command::{Arity, Command, Verb};
pub use response::Response;
pub use codec::{
    decode_content, encode_content, encode_response, read_command, read_response,
    write_command, write_response, MAX_LINE_SIZE, MAX_PAYLOAD_SIZE, NEWLINE_TOKEN, SPACE_TOKEN,
};
