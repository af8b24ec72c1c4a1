//! Client
//!
//! Connection to a YamlDB server plus the client-side session: the current
//! database, qualification of table names, and preparation of WRITE-TABLE
//! payloads from document files.

use std::fs;
use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};
use std::path::Path;

use crate::document::parse_record;
use crate::error::Result;
use crate::protocol::{encode_content, read_response, write_command, Verb};
use crate::storage::{INVALID_DATA_SENTINEL, NAMESPACE_SEPARATOR, NO_DATA_SENTINEL};

/// A connection to a YamlDB server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        let read_stream = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Send one command line and wait for its response payload
    pub fn send(&mut self, line: &str) -> Result<String> {
        write_command(&mut self.writer, line)?;
        read_response(&mut self.reader)
    }
}

/// What to do with a line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    /// Send this line to the server
    Send(String),
    /// Show this message without contacting the server
    Local(String),
}

/// Client-side session state
#[derive(Debug, Default)]
pub struct Session {
    current_db: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_db(&self) -> Option<&str> {
        self.current_db.as_deref()
    }

    /// Rewrite a user line into the command to send
    ///
    /// - table names without a database get the current one prepended
    /// - `LIST-TABLES` without an argument lists the current database
    /// - `WRITE-TABLE <table> <file>` sends the encoded file content
    pub fn prepare(&self, line: &str) -> Prepared {
        let mut fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if fields.is_empty() {
            return Prepared::Local("No input provided".to_string());
        }

        let verb = match Verb::from_name(&fields[0]) {
            Some(verb) => verb,
            // Let the server report unknown verbs
            None => return Prepared::Send(fields.join(" ")),
        };

        if verb.is_table_verb() {
            let needs_db = match verb {
                Verb::ListTables => fields.len() == 1,
                _ => fields.len() > 1 && !fields[1].contains(NAMESPACE_SEPARATOR),
            };
            if needs_db {
                let db = match &self.current_db {
                    Some(db) => db,
                    None => {
                        return Prepared::Local(
                            "OPEN A DATABASE FIRST: 'use-db <db-name>'".to_string(),
                        )
                    }
                };
                if verb == Verb::ListTables {
                    fields.push(db.clone());
                } else {
                    fields[1] = format!("{}{}{}", db, NAMESPACE_SEPARATOR, fields[1]);
                }
            }
        }

        if verb == Verb::WriteTable && fields.len() == 3 {
            tracing::info!("Writing data from file: {} to table: {}", fields[2], fields[1]);
            fields[2] = prepare_write_payload(Path::new(&fields[2]));
        }

        Prepared::Send(fields.join(" "))
    }

    /// Update the session from the server's answer to `sent`
    ///
    /// A `USE-DB` answer equal to the requested name (normalized) switches the
    /// current database; anything else is an error message.
    pub fn observe(&mut self, sent: &str, response: &str) -> Option<String> {
        let mut fields = sent.split_whitespace();
        let is_use = fields
            .next()
            .and_then(Verb::from_name)
            .map_or(false, |verb| verb == Verb::UseDb);
        if !is_use {
            return None;
        }

        let requested = fields.next()?.to_uppercase();
        if response == requested {
            self.current_db = Some(requested);
            Some(format!("DEFAULT DB SET TO: {}", response))
        } else {
            None
        }
    }
}

/// Read a document file and encode it for a WRITE-TABLE line
///
/// Returns [`NO_DATA_SENTINEL`] when the file cannot be read and
/// [`INVALID_DATA_SENTINEL`] when it is not a valid record or cannot be
/// carried on one request line. CRLF line endings are normalized to LF.
pub fn prepare_write_payload(path: &Path) -> String {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Cannot read {}: {}", path.display(), e);
            return NO_DATA_SENTINEL.to_string();
        }
    };

    let text = match String::from_utf8(content) {
        Ok(text) => text.replace("\r\n", "\n"),
        Err(_) => {
            tracing::warn!("{} is not valid UTF-8", path.display());
            return INVALID_DATA_SENTINEL.to_string();
        }
    };

    // Only spaces and newlines are encoded; any other whitespace would
    // split the request line
    if text.chars().any(|c| c.is_whitespace() && c != ' ' && c != '\n') {
        tracing::warn!("{} contains tabs or other unencodable whitespace", path.display());
        return INVALID_DATA_SENTINEL.to_string();
    }

    // An empty document would encode to an empty argument
    if text.trim().is_empty() || parse_record(text.as_bytes()).is_err() {
        tracing::warn!("{} is not a valid record document", path.display());
        return INVALID_DATA_SENTINEL.to_string();
    }

    encode_content(&text)
}
