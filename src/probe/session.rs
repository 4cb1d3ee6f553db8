use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use super::error::ProbeError;
use super::types::SmtpReply;

/// One SMTP dialogue over a plain TCP stream. The stream is closed when the
/// session is dropped, whatever state the dialogue was left in.
pub(crate) struct SmtpSession {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
}

impl SmtpSession {
    pub(crate) fn connect(
        host: &str,
        addrs: &[SocketAddr],
        connect_timeout: Duration,
        command_timeout: Duration,
    ) -> Result<Self, ProbeError> {
        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(addr, connect_timeout) {
                Ok(stream) => {
                    stream
                        .set_read_timeout(Some(command_timeout))
                        .map_err(ProbeError::io)?;
                    stream
                        .set_write_timeout(Some(command_timeout))
                        .map_err(ProbeError::io)?;
                    let reader = BufReader::new(stream.try_clone().map_err(ProbeError::io)?);
                    return Ok(Self { stream, reader });
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(match last_err {
            Some(source) => ProbeError::Connect {
                host: host.to_string(),
                source,
            },
            None => ProbeError::NoAddresses {
                host: host.to_string(),
            },
        })
    }

    /// Send one command line and read the server's reply.
    pub(crate) fn send_command(&mut self, command: &str) -> Result<SmtpReply, ProbeError> {
        let mut line = command.as_bytes().to_vec();
        line.extend_from_slice(b"\r\n");
        self.stream.write_all(&line).map_err(ProbeError::io)?;
        self.stream.flush().map_err(ProbeError::io)?;
        self.read_reply()
    }

    /// Read a (possibly multi-line) SMTP reply. Continuation lines use a `-`
    /// after the code and must all carry the same code.
    pub(crate) fn read_reply(&mut self) -> Result<SmtpReply, ProbeError> {
        let mut code = None;
        let mut message_lines = Vec::new();
        loop {
            let mut raw = String::new();
            let bytes = self.reader.read_line(&mut raw).map_err(ProbeError::io)?;
            if bytes == 0 {
                return Err(ProbeError::io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed while reading reply",
                )));
            }
            while raw.ends_with('\n') || raw.ends_with('\r') {
                raw.pop();
            }

            let head = raw.as_bytes();
            if head.len() < 3 || !head[..3].iter().all(u8::is_ascii_digit) {
                return Err(ProbeError::Protocol(format!("malformed reply: '{raw}'")));
            }
            let parsed_code = raw[..3]
                .parse::<u16>()
                .map_err(|_| ProbeError::Protocol(format!("invalid status code in '{raw}'")))?;
            if let Some(existing) = code {
                if existing != parsed_code {
                    return Err(ProbeError::Protocol(format!(
                        "inconsistent reply codes: {existing} vs {parsed_code}"
                    )));
                }
            } else {
                code = Some(parsed_code);
            }

            let continuation = head.get(3).copied() == Some(b'-');
            let text = raw.get(4..).unwrap_or("").to_string();
            message_lines.push(text);
            if !continuation {
                break;
            }
        }
        Ok(SmtpReply {
            code: code.unwrap_or(0),
            message: message_lines.join("\n"),
        })
    }

    /// Best-effort session teardown; the TCP stream itself is released on
    /// drop regardless.
    pub(crate) fn quit(&mut self) -> Result<(), ProbeError> {
        self.stream.write_all(b"QUIT\r\n").map_err(ProbeError::io)?;
        self.stream.flush().map_err(ProbeError::io)?;
        self.read_reply().map(|_| ())
    }
}
