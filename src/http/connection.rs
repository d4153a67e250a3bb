use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use crate::http::parser::{self, BadRequest, MAX_REQUEST_LENGTH};
use crate::http::request::Request;
use crate::http::resolver::{FileResolver, ResolveError};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// How long a closing connection keeps reading leftover request bytes.
const DRAIN_TIMEOUT: Duration = Duration::from_millis(250);
/// Leftover bytes discarded at most before giving up and closing anyway.
const DRAIN_LIMIT: usize = 64 * 1024;

/// A client stream a [`Connection`] can serve.
pub trait Transport: Read + Write {
    /// Runs once the response has been written, just before the stream is
    /// dropped.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for TcpStream {
    /// Half-closes, then discards unread request bytes so the close is a FIN
    /// and not an RST.
    fn finish(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Write)?;
        self.set_read_timeout(Some(DRAIN_TIMEOUT))?;

        let mut buf = [0u8; 4096];
        let mut drained = 0;
        while drained < DRAIN_LIMIT {
            match self.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => drained += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }

        Ok(())
    }
}

/// One accepted client stream and the single request it carries.
///
/// The stream is owned for the connection's whole life and closed when the
/// connection is dropped. [`Connection::process`] consumes the connection, so
/// every path through it (answered, unparsable, unreadable) closes the
/// stream exactly once.
pub struct Connection<S = TcpStream> {
    stream: S,
    resolver: Arc<FileResolver>,
    request_str: Option<String>,
    headers: Option<HashMap<String, String>>,
}

pub enum ConnectionState {
    Reading,
    Parsed(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S: Transport> Connection<S> {
    pub fn new(stream: S, resolver: Arc<FileResolver>) -> Self {
        Self {
            stream,
            resolver,
            request_str: None,
            headers: None,
        }
    }

    /// Reads, answers and closes. No keep-alive: one request per connection.
    pub fn process(mut self) {
        let mut state = ConnectionState::Reading;

        loop {
            state = match state {
                ConnectionState::Reading => match self.parse_request() {
                    Ok(request) => ConnectionState::Parsed(request),
                    Err(e) => {
                        // Nothing is written when the read itself fails.
                        tracing::debug!(error = %e, "Failed to read request");
                        ConnectionState::Closed
                    }
                },

                ConnectionState::Parsed(request) => {
                    let response = self.handle_request(&request);
                    ConnectionState::Writing(ResponseWriter::new(&response))
                }

                ConnectionState::Writing(mut writer) => {
                    if let Err(e) = writer.write_to_stream(&mut self.stream) {
                        tracing::warn!(
                            error = %e,
                            written = writer.written(),
                            "Failed to write response"
                        );
                    } else if let Err(e) = self.stream.finish() {
                        tracing::debug!(error = %e, "Failed to close stream cleanly");
                    }
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }
    }

    /// The raw request text, read from the stream on first use only.
    pub fn request_str(&mut self) -> io::Result<&str> {
        if self.request_str.is_none() {
            let mut buf = [0u8; MAX_REQUEST_LENGTH];
            let n = loop {
                match self.stream.read(&mut buf) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            self.request_str = Some(String::from_utf8_lossy(&buf[..n]).into_owned());
        }

        Ok(self.request_str.as_deref().unwrap_or_default())
    }

    /// The header map, parsed from the request text on first use only.
    ///
    /// The request must already have been read via [`Connection::request_str`].
    pub fn headers(&mut self) -> Result<&HashMap<String, String>, BadRequest> {
        if self.headers.is_none() {
            let raw = self.request_str.as_deref().ok_or(BadRequest::Empty)?;
            self.headers = Some(parser::parse_headers(raw)?);
        }

        self.headers.as_ref().ok_or(BadRequest::Empty)
    }

    /// Parses the request, collapsing any malformed input into
    /// [`Request::invalid`].
    ///
    /// Only an I/O failure on the read is returned as an error.
    pub fn parse_request(&mut self) -> io::Result<Request> {
        self.request_str()?;

        match self.try_parse() {
            Ok(request) => Ok(request),
            Err(e) => {
                tracing::debug!(error = %e, "Bad request");
                Ok(Request::invalid())
            }
        }
    }

    fn try_parse(&mut self) -> Result<Request, BadRequest> {
        let raw = self.request_str.as_deref().unwrap_or_default();
        if raw.is_empty() {
            return Err(BadRequest::Empty);
        }

        let (method, path) = parser::parse_request_line(parser::request_line(raw))?;
        let headers = self.headers()?;
        let host = parser::host_from_headers(headers)?;

        Ok(Request {
            method,
            host,
            path,
            headers: headers.clone(),
        })
    }

    fn handle_request(&self, request: &Request) -> Response {
        if !request.is_valid() {
            return Response::bad_request();
        }

        match self.resolver.load(request) {
            Ok(body) => {
                tracing::debug!(host = %request.host, path = %request.path, bytes = body.len(), "Serving file");
                Response::ok(body)
            }
            Err(ResolveError::NotFound(path)) => {
                tracing::debug!(path = %path.display(), "File not found");
                Response::not_found()
            }
            Err(e) => {
                tracing::error!(error = %e, host = %request.host, path = %request.path, "Failed to load file");
                Response::internal_error()
            }
        }
    }
}
