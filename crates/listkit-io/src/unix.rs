use std::collections::VecDeque;
use std::io;
use std::os::unix::io::AsRawFd;
use std::sync::{Mutex, MutexGuard};

use listkit_core::{ClearType, KeyEvent, KeyParser};

use crate::{
    cursor_move_sequence, cursor_visibility_sequence, ConsoleError, ConsoleInput, ConsoleOutput,
    ConsoleResult, RawModeGuard,
};

/// Poll interval while waiting without a deadline. A lone ESC is flushed
/// as the Escape key after one quiet interval.
const BLOCKING_POLL_MS: u32 = 100;

fn lock<T>(mutex: &Mutex<T>) -> ConsoleResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| ConsoleError::TerminalError("console state lock poisoned".to_string()))
}

struct TermiosState {
    stdin_fd: i32,
    original_termios: libc::termios,
    original_flags: i32,
}

impl TermiosState {
    fn restore(&self) {
        unsafe {
            let _ = libc::tcsetattr(self.stdin_fd, libc::TCSANOW, &self.original_termios);
            let _ = libc::fcntl(self.stdin_fd, libc::F_SETFL, self.original_flags);
        }
    }
}

/// Keyboard input read from stdin.
pub struct UnixConsoleInput {
    stdin_fd: i32,
    key_parser: Mutex<KeyParser>,
    pending: Mutex<VecDeque<KeyEvent>>,
}

impl UnixConsoleInput {
    pub fn new() -> io::Result<Self> {
        let stdin_fd = io::stdin().as_raw_fd();
        if unsafe { libc::isatty(stdin_fd) } == 0 {
            return Err(io::Error::other("stdin is not a TTY"));
        }
        Ok(Self {
            stdin_fd,
            key_parser: Mutex::new(KeyParser::new()),
            pending: Mutex::new(VecDeque::new()),
        })
    }

    fn enter_raw_mode(fd: i32) -> io::Result<TermiosState> {
        let mut original_termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut original_termios) } != 0 {
            return Err(io::Error::last_os_error());
        }
        let mut raw = original_termios;
        raw.c_lflag &= !(libc::ICANON
            | libc::ECHO
            | libc::ECHOE
            | libc::ECHOK
            | libc::ECHONL
            | libc::ISIG
            | libc::IEXTEN);
        raw.c_iflag &= !(libc::IXON
            | libc::IXOFF
            | libc::ICRNL
            | libc::INLCR
            | libc::IGNCR
            | libc::BRKINT
            | libc::PARMRK
            | libc::ISTRIP);
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag &= !libc::CSIZE;
        raw.c_cflag |= libc::CS8;
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 0;
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
            return Err(io::Error::last_os_error());
        }
        let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
        if flags == -1 {
            return Err(io::Error::last_os_error());
        }
        if unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) } == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(TermiosState {
            stdin_fd: fd,
            original_termios,
            original_flags: flags,
        })
    }

    /// Read whatever is available and queue the parsed events.
    ///
    /// Returns the number of bytes read; zero means no data right now.
    fn fill_pending(&self) -> ConsoleResult<usize> {
        let mut buffer = [0u8; 64];
        let result = unsafe {
            libc::read(
                self.stdin_fd,
                buffer.as_mut_ptr() as *mut libc::c_void,
                buffer.len(),
            )
        };

        if result == -1 {
            let error = io::Error::last_os_error();
            return match error.kind() {
                io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => Ok(0),
                _ => Err(ConsoleError::IoError(format!("Read error: {error}"))),
            };
        }

        let count = result as usize;
        if count > 0 {
            let events = lock(&self.key_parser)?.feed(&buffer[..count]);
            lock(&self.pending)?.extend(events);
        }
        Ok(count)
    }

    fn pop_pending(&self) -> ConsoleResult<Option<KeyEvent>> {
        Ok(lock(&self.pending)?.pop_front())
    }
}

impl ConsoleInput for UnixConsoleInput {
    fn enable_raw_mode(&self) -> ConsoleResult<RawModeGuard> {
        let state = Self::enter_raw_mode(self.stdin_fd).map_err(crate::io_error_to_console_error)?;
        log::debug!("raw mode enabled on fd {}", self.stdin_fd);
        Ok(RawModeGuard::new(move || state.restore(), "Unix VT".to_string()))
    }

    fn get_window_size(&self) -> ConsoleResult<(u16, u16)> {
        query_window_size(self.stdin_fd).map_err(crate::io_error_to_console_error)
    }

    fn try_read_key(&self) -> ConsoleResult<Option<KeyEvent>> {
        if let Some(event) = self.pop_pending()? {
            return Ok(Some(event));
        }
        self.fill_pending()?;
        self.pop_pending()
    }

    fn read_key_timeout(&self, timeout_ms: Option<u32>) -> ConsoleResult<Option<KeyEvent>> {
        if let Some(event) = self.pop_pending()? {
            return Ok(Some(event));
        }

        match timeout_ms {
            Some(0) => self.try_read_key(),
            Some(ms) => {
                let mut poll_fd = libc::pollfd {
                    fd: self.stdin_fd,
                    events: libc::POLLIN,
                    revents: 0,
                };
                let poll_result = unsafe { libc::poll(&mut poll_fd, 1, ms as i32) };

                if poll_result == -1 {
                    let error = io::Error::last_os_error();
                    if error.kind() == io::ErrorKind::Interrupted {
                        return Ok(None);
                    }
                    return Err(ConsoleError::IoError(format!("Poll error: {error}")));
                }
                if poll_result == 0 {
                    // Quiet period: complete any partial escape sequence
                    let events = lock(&self.key_parser)?.flush();
                    lock(&self.pending)?.extend(events);
                    return self.pop_pending();
                }
                if self.fill_pending()? == 0 {
                    // Readable but empty: the terminal hung up
                    return Err(ConsoleError::InputClosed);
                }
                self.pop_pending()
            }
            None => loop {
                if let Some(event) = self.read_key_timeout(Some(BLOCKING_POLL_MS))? {
                    return Ok(Some(event));
                }
            },
        }
    }
}

fn query_window_size(fd: i32) -> io::Result<(u16, u16)> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    if unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok((ws.ws_col, ws.ws_row))
}

/// Terminal output using ANSI escape sequences.
///
/// Writes are buffered until [`ConsoleOutput::flush`], so a whole repaint
/// reaches the terminal in one write.
pub struct UnixConsoleOutput {
    fd: i32,
    buffer: Mutex<Vec<u8>>,
}

impl UnixConsoleOutput {
    /// Output on stdout
    pub fn new() -> ConsoleResult<Self> {
        Self::with_fd(libc::STDOUT_FILENO)
    }

    /// Output on stderr
    pub fn stderr() -> ConsoleResult<Self> {
        Self::with_fd(libc::STDERR_FILENO)
    }

    fn with_fd(fd: i32) -> ConsoleResult<Self> {
        if unsafe { libc::isatty(fd) } == 0 {
            return Err(ConsoleError::TerminalError(format!(
                "file descriptor {fd} is not a TTY"
            )));
        }
        Ok(Self {
            fd,
            buffer: Mutex::new(Vec::new()),
        })
    }

    /// Terminal size as seen from the output side (columns, rows)
    pub fn window_size(&self) -> ConsoleResult<(u16, u16)> {
        query_window_size(self.fd).map_err(crate::io_error_to_console_error)
    }

    fn write_bytes(&self, bytes: &[u8]) -> ConsoleResult<()> {
        lock(&self.buffer)?.extend_from_slice(bytes);
        Ok(())
    }

    fn write_bytes_direct(&self, bytes: &[u8]) -> ConsoleResult<()> {
        let mut written = 0;
        while written < bytes.len() {
            let result = unsafe {
                libc::write(
                    self.fd,
                    bytes[written..].as_ptr() as *const libc::c_void,
                    bytes.len() - written,
                )
            };

            if result == -1 {
                let error = io::Error::last_os_error();
                match error.raw_os_error() {
                    Some(libc::EINTR) | Some(libc::EAGAIN) => continue,
                    _ => return Err(ConsoleError::IoError(format!("Write failed: {error}"))),
                }
            }
            written += result as usize;
        }
        Ok(())
    }
}

impl ConsoleOutput for UnixConsoleOutput {
    fn write_text(&self, text: &str) -> ConsoleResult<()> {
        self.write_bytes(text.as_bytes())
    }

    fn move_cursor_relative(&self, row_delta: i16, col_delta: i16) -> ConsoleResult<()> {
        self.write_bytes(cursor_move_sequence(row_delta, col_delta).as_bytes())
    }

    fn clear(&self, clear_type: ClearType) -> ConsoleResult<()> {
        self.write_bytes(clear_type.to_ansi().as_bytes())
    }

    fn set_cursor_visible(&self, visible: bool) -> ConsoleResult<()> {
        self.write_bytes(cursor_visibility_sequence(visible).as_bytes())
    }

    fn flush(&self) -> ConsoleResult<()> {
        let pending = std::mem::take(&mut *lock(&self.buffer)?);
        if pending.is_empty() {
            return Ok(());
        }
        self.write_bytes_direct(&pending)
    }
}

impl Drop for UnixConsoleOutput {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
