use std::io::{self, BufRead, BufReader, ErrorKind, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;

use rectangles::Response;
use tracing::{debug, info, warn};

use crate::{Config, Participant, Seat, Session};

/// Longest request line the judge reads, newline included.
const MAX_LINE_LEN: u64 = 64 * 1024;

/// Everything a session reacts to, funneled through a single channel so that
/// it is processed in arrival order.
#[derive(Debug)]
pub enum SessionEvent {
    Message(Seat, String),
    /// A line longer than the judge is willing to read. Its content was discarded.
    Oversized(Seat),
    Closed(Seat),
}

/// A client that has connected but may not be seated yet.
struct Connection {
    name: String,
    stream: TcpStream,
}

impl Connection {
    fn new(stream: TcpStream) -> Self {
        let name = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| String::from("unknown"));
        Self { name, stream }
    }

    /// Did the client hang up while waiting for an opponent?
    fn is_closed(&self) -> bool {
        if self.stream.set_nonblocking(true).is_err() {
            return true;
        }
        let mut buf = [0u8; 1];
        let closed = match self.stream.peek(&mut buf) {
            Ok(0) => true,
            Ok(_) => false,
            Err(err) => err.kind() != ErrorKind::WouldBlock,
        };
        closed || self.stream.set_nonblocking(false).is_err()
    }
}

/// Accepts clients forever, seating them in pairs in the order they connect.
///
/// Every pair gets its own session running on its own thread.
pub fn serve(listener: TcpListener, config: Config) -> anyhow::Result<()> {
    let mut waiting: Option<Connection> = None;
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(err) => {
                warn!(%err, "Cannot establish connection");
                continue;
            }
        };
        let connection = Connection::new(stream);
        info!(participant = &connection.name, "Client connected");

        waiting = match waiting.take() {
            Some(first) if !first.is_closed() => {
                if let Err(err) = spawn_session(&config, first, connection) {
                    warn!(%err, "Could not start session");
                }
                None
            }
            Some(first) => {
                info!(participant = &first.name, "Client left before getting an opponent");
                Some(connection)
            }
            None => Some(connection),
        };
    }
    anyhow::bail!("Unexpected end of incoming connections")
}

fn spawn_session(config: &Config, first: Connection, second: Connection) -> anyhow::Result<()> {
    let id: u64 = rand::random();
    info!(session = id, first = &first.name, second = &second.name, "Players paired");

    let (events_tx, events_rx) = mpsc::channel();
    let first = connect_participant(Seat::First, first, events_tx.clone())?;
    let second = connect_participant(Seat::Second, second, events_tx)?;

    let config = config.clone();
    thread::spawn(move || {
        let mut session = Session::new(id, &config, first, second);
        session.start();
        for event in events_rx {
            match event {
                SessionEvent::Message(seat, payload) => session.handle_message(seat, &payload),
                SessionEvent::Oversized(seat) => session.handle_oversized_message(seat),
                SessionEvent::Closed(seat) => {
                    session.teardown(Some(seat));
                    break;
                }
            }
        }
        session.teardown(None);
        debug!(session = id, "Session thread finished");
    });
    Ok(())
}

/// Starts the threads that move lines between the connection and the session.
fn connect_participant(
    seat: Seat,
    connection: Connection,
    events_tx: mpsc::Sender<SessionEvent>,
) -> anyhow::Result<Participant> {
    let Connection { name, stream } = connection;
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;
    let (outbox_tx, outbox_rx) = mpsc::channel::<Response>();

    let reader_name = name.clone();
    thread::spawn(move || {
        loop {
            let event = match read_line(&mut reader) {
                Ok(Line::Complete(line)) => SessionEvent::Message(seat, line),
                Ok(Line::TooLong) => SessionEvent::Oversized(seat),
                Ok(Line::Eof) => break,
                Err(err) => {
                    debug!(participant = &reader_name, %err, "Could not read from connection");
                    break;
                }
            };
            if events_tx.send(event).is_err() {
                return;
            }
        }
        // The session may already be gone, which is fine.
        let _ = events_tx.send(SessionEvent::Closed(seat));
    });

    let writer_name = name.clone();
    thread::spawn(move || {
        for response in outbox_rx {
            if let Err(err) = write_response(&mut writer, &response) {
                warn!(participant = &writer_name, %err, "Could not write to connection");
                break;
            }
        }
        // Closing the socket also ends the reader thread of this connection.
        let _ = writer.shutdown(Shutdown::Both);
    });

    Ok(Participant::new(&name, outbox_tx))
}

#[derive(Debug, PartialEq, Eq)]
enum Line {
    /// The line without its terminator. Invalid UTF-8 is replaced, so that
    /// the session can reject it like any other malformed payload.
    Complete(String),
    TooLong,
    Eof,
}

/// Reads one line, holding at most [`MAX_LINE_LEN`] bytes in memory.
fn read_line(reader: &mut impl BufRead) -> io::Result<Line> {
    let mut buf = Vec::new();
    let num_bytes_read = reader.by_ref().take(MAX_LINE_LEN).read_until(b'\n', &mut buf)?;
    if num_bytes_read == 0 {
        return Ok(Line::Eof);
    }
    let terminated = buf.last() == Some(&b'\n');
    if !terminated && num_bytes_read as u64 == MAX_LINE_LEN {
        // Skip to the end of the line
        loop {
            buf.clear();
            let num_bytes_read = reader.by_ref().take(MAX_LINE_LEN).read_until(b'\n', &mut buf)?;
            if num_bytes_read == 0 || buf.last() == Some(&b'\n') {
                return Ok(Line::TooLong);
            }
        }
    }
    if terminated {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Line::Complete(String::from_utf8_lossy(&buf).into_owned()))
}

/// Writes one response as a single line of JSON.
pub fn write_response(writer: &mut impl Write, response: &Response) -> anyhow::Result<()> {
    let mut json = serde_json::to_string(response)?;
    json.push('\n');
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}
