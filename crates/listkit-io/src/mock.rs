//! Mock console implementations for testing
//!
//! Both mocks are cheap handles over shared state: clone one, hand the
//! clone to the prompt, and inspect the original afterwards.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use listkit_core::{ClearType, Key, KeyEvent, KeyParser};

use crate::{
    cursor_move_sequence, cursor_visibility_sequence, ConsoleError, ConsoleInput, ConsoleOutput,
    ConsoleResult, RawModeGuard,
};

fn lock<T>(mutex: &Mutex<T>) -> ConsoleResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| ConsoleError::TerminalError("mock console lock poisoned".to_string()))
}

/// Mock console input for testing
#[derive(Clone)]
pub struct MockConsoleInput {
    input_queue: Arc<Mutex<VecDeque<KeyEvent>>>,
    window_size: Arc<Mutex<(u16, u16)>>,
    raw_mode_active: Arc<AtomicBool>,
    raw_mode_count: Arc<AtomicUsize>,
}

impl Default for MockConsoleInput {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConsoleInput {
    pub fn new() -> Self {
        Self {
            input_queue: Arc::new(Mutex::new(VecDeque::new())),
            window_size: Arc::new(Mutex::new((80, 24))),
            raw_mode_active: Arc::new(AtomicBool::new(false)),
            raw_mode_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queue a key event for testing
    pub fn queue_key_event(&self, event: KeyEvent) {
        if let Ok(mut queue) = self.input_queue.lock() {
            queue.push_back(event);
        }
    }

    /// Queue a key without text
    pub fn queue_key(&self, key: Key) {
        self.queue_key_event(KeyEvent::simple(key, Vec::new()));
    }

    /// Queue text input as a sequence of character key events
    pub fn queue_text_input(&self, text: &str) {
        if let Ok(mut queue) = self.input_queue.lock() {
            queue.extend(text.chars().map(KeyEvent::char));
        }
    }

    /// Queue raw terminal bytes, parsed the way a real terminal's would be
    pub fn queue_bytes(&self, bytes: &[u8]) {
        let mut parser = KeyParser::new();
        let mut events = parser.feed(bytes);
        events.extend(parser.flush());
        if let Ok(mut queue) = self.input_queue.lock() {
            queue.extend(events);
        }
    }

    /// Queue multiple key events at once
    pub fn queue_key_events(&self, events: &[KeyEvent]) {
        if let Ok(mut queue) = self.input_queue.lock() {
            queue.extend(events.iter().cloned());
        }
    }

    /// Get the number of queued events
    pub fn queued_event_count(&self) -> usize {
        self.input_queue.lock().map(|q| q.len()).unwrap_or(0)
    }

    /// Clear all queued events
    pub fn clear_queue(&self) {
        if let Ok(mut queue) = self.input_queue.lock() {
            queue.clear();
        }
    }

    pub fn set_window_size(&self, cols: u16, rows: u16) {
        if let Ok(mut size) = self.window_size.lock() {
            *size = (cols, rows);
        }
    }

    /// True while a guard returned by `enable_raw_mode` is alive
    pub fn is_raw_mode_active(&self) -> bool {
        self.raw_mode_active.load(Ordering::SeqCst)
    }

    /// How many times raw mode was entered
    pub fn raw_mode_count(&self) -> usize {
        self.raw_mode_count.load(Ordering::SeqCst)
    }
}

impl ConsoleInput for MockConsoleInput {
    fn enable_raw_mode(&self) -> ConsoleResult<RawModeGuard> {
        self.raw_mode_active.store(true, Ordering::SeqCst);
        self.raw_mode_count.fetch_add(1, Ordering::SeqCst);
        let active = Arc::clone(&self.raw_mode_active);
        Ok(RawModeGuard::new(
            move || active.store(false, Ordering::SeqCst),
            "Mock".to_string(),
        ))
    }

    fn get_window_size(&self) -> ConsoleResult<(u16, u16)> {
        Ok(*lock(&self.window_size)?)
    }

    fn try_read_key(&self) -> ConsoleResult<Option<KeyEvent>> {
        Ok(lock(&self.input_queue)?.pop_front())
    }

    /// An empty queue means the input has ended when waiting forever, and
    /// a timeout otherwise.
    fn read_key_timeout(&self, timeout_ms: Option<u32>) -> ConsoleResult<Option<KeyEvent>> {
        match (lock(&self.input_queue)?.pop_front(), timeout_ms) {
            (Some(event), _) => Ok(Some(event)),
            (None, Some(_)) => Ok(None),
            (None, None) => Err(ConsoleError::InputClosed),
        }
    }
}

/// Mock console output for testing
#[derive(Clone)]
pub struct MockConsoleOutput {
    output_buffer: Arc<Mutex<Vec<u8>>>,
    text_writes: Arc<Mutex<Vec<String>>>,
    cursor_row: Arc<Mutex<i32>>,
    cursor_visible: Arc<AtomicBool>,
    visibility_changes: Arc<Mutex<Vec<bool>>>,
    flush_count: Arc<AtomicUsize>,
}

impl Default for MockConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConsoleOutput {
    pub fn new() -> Self {
        Self {
            output_buffer: Arc::new(Mutex::new(Vec::new())),
            text_writes: Arc::new(Mutex::new(Vec::new())),
            cursor_row: Arc::new(Mutex::new(0)),
            cursor_visible: Arc::new(AtomicBool::new(true)),
            visibility_changes: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Everything written, control sequences included
    pub fn get_output(&self) -> Vec<u8> {
        self.output_buffer
            .lock()
            .map(|b| b.clone())
            .unwrap_or_default()
    }

    /// Get output as string for testing
    pub fn get_output_string(&self) -> String {
        String::from_utf8_lossy(&self.get_output()).to_string()
    }

    /// Arguments of every `write_text` call, in order
    pub fn text_writes(&self) -> Vec<String> {
        self.text_writes
            .lock()
            .map(|w| w.clone())
            .unwrap_or_default()
    }

    /// Clear captured output
    pub fn clear_output(&self) {
        if let Ok(mut buffer) = self.output_buffer.lock() {
            buffer.clear();
        }
        if let Ok(mut writes) = self.text_writes.lock() {
            writes.clear();
        }
    }

    /// Net vertical cursor movement from explicit cursor moves
    pub fn cursor_row(&self) -> i32 {
        self.cursor_row.lock().map(|r| *r).unwrap_or_default()
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible.load(Ordering::SeqCst)
    }

    /// Every `set_cursor_visible` argument, in order
    pub fn visibility_changes(&self) -> Vec<bool> {
        self.visibility_changes
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    pub fn flush_count(&self) -> usize {
        self.flush_count.load(Ordering::SeqCst)
    }

    fn record(&self, bytes: &[u8]) -> ConsoleResult<()> {
        lock(&self.output_buffer)?.extend_from_slice(bytes);
        Ok(())
    }
}

impl ConsoleOutput for MockConsoleOutput {
    fn write_text(&self, text: &str) -> ConsoleResult<()> {
        lock(&self.text_writes)?.push(text.to_string());
        self.record(text.as_bytes())
    }

    fn move_cursor_relative(&self, row_delta: i16, col_delta: i16) -> ConsoleResult<()> {
        *lock(&self.cursor_row)? += i32::from(row_delta);
        self.record(cursor_move_sequence(row_delta, col_delta).as_bytes())
    }

    fn clear(&self, clear_type: ClearType) -> ConsoleResult<()> {
        self.record(clear_type.to_ansi().as_bytes())
    }

    fn set_cursor_visible(&self, visible: bool) -> ConsoleResult<()> {
        self.cursor_visible.store(visible, Ordering::SeqCst);
        lock(&self.visibility_changes)?.push(visible);
        self.record(cursor_visibility_sequence(visible).as_bytes())
    }

    fn flush(&self) -> ConsoleResult<()> {
        self.flush_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
