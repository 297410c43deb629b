use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::{Duration, Instant};

/// What the mock target received, one slot per connection in accept order.
pub type Received = Arc<Mutex<Vec<Option<String>>>>;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
    received: Received,
}

impl ServerHandle {
    /// Payloads in accept order, once `expected` connections were accepted
    /// and read, or after `SETTLE_TIMEOUT`.
    #[must_use]
    pub fn received(&self, expected: usize) -> Vec<String> {
        let started = Instant::now();
        loop {
            let slots = self
                .received
                .lock()
                .map(|received| received.clone())
                .unwrap_or_default();
            let settled = slots.len() >= expected && slots.iter().all(Option::is_some);
            if settled || started.elapsed() >= SETTLE_TIMEOUT {
                return slots.into_iter().flatten().collect();
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

#[derive(Clone, Copy)]
pub enum Mode {
    /// Reads one HTTP request and records its form body.
    Http,
    /// Reads until the client closes and records the raw line.
    Tcp,
}

/// Spawn a lightweight target server for tests.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_server(mode: Mode) -> Result<(u16, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let port = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?
        .port();
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let Some(slot) = reserve_slot(&sink) else {
                        break;
                    };
                    let sink = Arc::clone(&sink);
                    thread::spawn(move || handle_client(stream, mode, &sink, slot));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        port,
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
            received,
        },
    ))
}

/// Spawn a test server or skip when socket permissions are unavailable.
///
/// # Errors
///
/// Returns an error if the server fails for reasons other than insufficient
/// socket permissions.
pub fn spawn_server_or_skip(mode: Mode) -> Result<Option<(u16, ServerHandle)>, String> {
    match spawn_server(mode) {
        Ok(result) => Ok(Some(result)),
        Err(err) if err.contains("Operation not permitted") => {
            eprintln!("Skipping e2e test: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn reserve_slot(sink: &Received) -> Option<usize> {
    let mut received = sink.lock().ok()?;
    received.push(None);
    Some(received.len().saturating_sub(1))
}

fn handle_client(mut stream: TcpStream, mode: Mode, sink: &Received, slot: usize) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let payload = match mode {
        Mode::Tcp => read_to_close(&mut stream),
        Mode::Http => read_form_body(&mut stream),
    };
    if let Ok(mut received) = sink.lock()
        && let Some(entry) = received.get_mut(slot)
    {
        *entry = Some(payload.unwrap_or_default());
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn read_to_close(stream: &mut TcpStream) -> Option<String> {
    let mut line = String::new();
    stream.read_to_string(&mut line).ok()?;
    Some(line)
}

fn read_form_body(stream: &mut TcpStream) -> Option<String> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let text = String::from_utf8_lossy(&buffer).into_owned();
        if let Some((head, body)) = text.split_once("\r\n\r\n")
            && body.len() >= content_length(head)
        {
            let reply = b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK";
            stream.write_all(reply).ok()?;
            stream.flush().ok()?;
            return Some(body.to_owned());
        }
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            return None;
        }
        buffer.extend_from_slice(chunk.get(..read)?);
    }
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Run the `workgen` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_workgen<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = workgen_bin()?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("WORKGEN_LOG")
        .env("NO_COLOR", "1")
        .output()
        .map_err(|err| format!("run workgen failed: {}", err))
}

fn workgen_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_workgen").map_or_else(
        || Err("CARGO_BIN_EXE_workgen missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
