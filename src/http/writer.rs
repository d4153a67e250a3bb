use std::io::{self, Write};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a response as `HTTP/1.1 <code> <reason>\r\n\r\n<body>`.
///
/// No headers are emitted; the connection is closed after the body.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );

    let mut buf = Vec::with_capacity(status_line.len() + 2 + resp.body.len());
    buf.extend_from_slice(status_line.as_bytes());

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf.extend_from_slice(&resp.body);

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write_to_stream<W: Write>(&mut self, stream: &mut W) -> io::Result<()> {
        while self.written < self.buffer.len() {
            let n = match stream.write(&self.buffer[self.written..]) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if n == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "connection closed while writing",
                ));
            }

            self.written += n;
        }

        stream.flush()
    }
}
