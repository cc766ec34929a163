use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use judge::{serve, Config};
use rectangles::{Cell, Color, Response};

struct Client {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl Client {
    fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(10)))
            .unwrap();
        Self {
            reader: BufReader::new(stream.try_clone().unwrap()),
            writer: stream,
        }
    }

    fn send(&mut self, line: &str) {
        writeln!(self.writer, "{}", line).unwrap();
        self.writer.flush().unwrap();
    }

    fn send_bytes(&mut self, bytes: &[u8]) {
        self.writer.write_all(bytes).unwrap();
        self.writer.flush().unwrap();
    }

    fn receive(&mut self) -> Response {
        let mut buf = String::new();
        self.reader.read_line(&mut buf).unwrap();
        serde_json::from_str(buf.trim_end()).unwrap()
    }

    /// Number of bytes left before the judge closed the connection.
    fn read_to_end(&mut self) -> usize {
        let mut buf = String::new();
        let mut total = 0;
        loop {
            buf.clear();
            match self.reader.read_line(&mut buf).unwrap() {
                0 => break total,
                n => total += n,
            }
        }
    }
}

fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || serve(listener, Config::default()));
    addr
}

#[test]
fn pair_play_and_disconnect() {
    let addr = start_server();
    let mut first = Client::connect(addr);
    // Make sure the first client is accepted before the second one connects
    thread::sleep(Duration::from_millis(100));
    let mut second = Client::connect(addr);

    match first.receive() {
        Response::GameStarted {
            my_turn,
            color,
            sum,
            ..
        } => {
            assert!(my_turn);
            assert_eq!(color, Color::A);
            assert_eq!(sum, 0);
        }
        other => panic!("Unexpected response {:?}", other),
    }
    assert!(matches!(
        second.receive(),
        Response::GameStarted {
            my_turn: false,
            color: Color::B,
            ..
        }
    ));

    first.send("hello");
    assert!(matches!(first.receive(), Response::IncorrectRequest { .. }));

    first.send(
        r#"{"type":"playerMove","move":{"from":{"row":0,"col":0},"to":{"row":2,"col":1},"color":"A","dices":[3,3]}}"#,
    );
    for (client, expected_turn) in [(&mut first, false), (&mut second, true)] {
        match client.receive() {
            Response::ChangePlayer { my_turn, field, .. } => {
                assert_eq!(my_turn, expected_turn);
                assert_eq!(field[2][1], Cell::A);
                assert_eq!(field[2][2], Cell::Empty);
            }
            other => panic!("Unexpected response {:?}", other),
        }
    }

    drop(second);
    assert_eq!(first.receive(), Response::GameAborted);
    assert_eq!(first.read_to_end(), 0);
}

#[test]
fn server_keeps_pairing_after_a_session_ends() {
    let addr = start_server();
    for _ in 0..2 {
        let mut first = Client::connect(addr);
        thread::sleep(Duration::from_millis(100));
        let mut second = Client::connect(addr);
        assert!(matches!(
            first.receive(),
            Response::GameStarted { my_turn: true, .. }
        ));
        assert!(matches!(
            second.receive(),
            Response::GameStarted { my_turn: false, .. }
        ));
        drop(first);
        assert_eq!(second.receive(), Response::GameAborted);
    }
}

#[test]
fn invalid_utf8_is_an_incorrect_request() {
    let addr = start_server();
    let mut first = Client::connect(addr);
    thread::sleep(Duration::from_millis(100));
    let mut second = Client::connect(addr);
    assert!(matches!(first.receive(), Response::GameStarted { .. }));
    assert!(matches!(second.receive(), Response::GameStarted { .. }));

    first.send_bytes(b"\xff\xfe garbage\n");
    assert!(matches!(first.receive(), Response::IncorrectRequest { .. }));

    // The game goes on, and the opponent heard nothing of it
    first.send(
        r#"{"type":"playerMove","move":{"from":{"row":0,"col":0},"to":{"row":0,"col":2},"color":"A","dices":[1,2]}}"#,
    );
    assert!(matches!(first.receive(), Response::ChangePlayer { my_turn: false, .. }));
    assert!(matches!(second.receive(), Response::ChangePlayer { my_turn: true, .. }));
}
