//! Text I/O device used by the menu controller and the prompts
//!
//! Everything the menus render or read goes through [`Console`]. The
//! terminal implementation talks to stdin/stdout; [`ScriptedConsole`]
//! replays canned input and records output for tests.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

/// A single keystroke: the character typed (if any) plus modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key_char: Option<char>,
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    pub fn char(c: char) -> Self {
        Self {
            key_char: Some(c),
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A key that produces no character (arrows, function keys, ...)
    pub fn other() -> Self {
        Self {
            key_char: None,
            modifiers: KeyModifiers::NONE,
        }
    }
}

pub trait Console: Send + Sync {
    fn clear_screen(&self) -> io::Result<()>;

    fn write(&self, text: &str) -> io::Result<()>;

    fn write_line(&self, text: &str) -> io::Result<()>;

    /// Read one line without its line terminator. `Ok(None)` means the device
    /// produced no value for this read.
    fn read_line(&self) -> io::Result<Option<String>>;

    /// Read one keystroke. Devices that echo the key also finish the line.
    fn read_key(&self) -> io::Result<KeyPress>;
}

/// Console backed by the process' stdin/stdout.
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        Self
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Console for TerminalConsole {
    fn clear_screen(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }

    fn write(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn write_line(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", text)?;
        stdout.flush()
    }

    fn read_line(&self) -> io::Result<Option<String>> {
        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "standard input was closed",
            ));
        }

        let line = input.trim_end_matches(['\r', '\n']).to_string();
        Ok(Some(line))
    }

    fn read_key(&self) -> io::Result<KeyPress> {
        let key = {
            let _raw = RawModeGuard::enable()?;
            loop {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        break key;
                    }
                }
            }
        };

        // Raw mode swallows Ctrl+C, so surface it as an interruption.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
        }

        let key_char = match key.code {
            KeyCode::Char(c) => Some(c),
            _ => None,
        };

        // Echo the key and end the line so later output starts on a fresh one.
        match key_char {
            Some(c) => self.write_line(&c.to_string())?,
            None => self.write_line("")?,
        }

        Ok(KeyPress {
            key_char,
            modifiers: key.modifiers,
        })
    }
}

/// One recorded call against a [`ScriptedConsole`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    Clear,
    Write(String),
    WriteLine(String),
}

#[derive(Debug, Default)]
struct ScriptState {
    lines: VecDeque<Option<String>>,
    keys: VecDeque<KeyPress>,
    events: Vec<ConsoleEvent>,
    lines_read: usize,
    keys_read: usize,
}

/// In-memory console that replays queued input and records every output call.
///
/// Reading past the end of the script fails with `UnexpectedEof` so a runaway
/// loop ends the test instead of hanging it.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    state: Mutex<ScriptState>,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue lines to be returned by `read_line`, in order.
    pub fn with_lines<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            self.push_line(Some(line.into()));
        }
        self
    }

    /// Queue keystrokes for `read_key`, one per character.
    pub fn with_keys(self, keys: &str) -> Self {
        for c in keys.chars() {
            self.push_key(KeyPress::char(c));
        }
        self
    }

    /// Queue a single line; `None` simulates a read that produced no value.
    pub fn push_line(&self, line: Option<String>) {
        self.lock().lines.push_back(line);
    }

    pub fn push_key(&self, key: KeyPress) {
        self.lock().keys.push_back(key);
    }

    pub fn events(&self) -> Vec<ConsoleEvent> {
        self.lock().events.clone()
    }

    /// Every `write_line` text in call order.
    pub fn lines_written(&self) -> Vec<String> {
        self.lock()
            .events
            .iter()
            .filter_map(|e| match e {
                ConsoleEvent::WriteLine(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// How many times exactly `text` was passed to `write_line`.
    pub fn count_line(&self, text: &str) -> usize {
        self.lock()
            .events
            .iter()
            .filter(|e| matches!(e, ConsoleEvent::WriteLine(t) if t == text))
            .count()
    }

    pub fn clear_count(&self) -> usize {
        self.lock()
            .events
            .iter()
            .filter(|e| **e == ConsoleEvent::Clear)
            .count()
    }

    pub fn lines_read(&self) -> usize {
        self.lock().lines_read
    }

    pub fn keys_read(&self) -> usize {
        self.lock().keys_read
    }

    pub fn remaining_lines(&self) -> usize {
        self.lock().lines.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptState> {
        // A panicking test thread must not hide the recorded output from the others.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Console for ScriptedConsole {
    fn clear_screen(&self) -> io::Result<()> {
        self.lock().events.push(ConsoleEvent::Clear);
        Ok(())
    }

    fn write(&self, text: &str) -> io::Result<()> {
        self.lock().events.push(ConsoleEvent::Write(text.to_string()));
        Ok(())
    }

    fn write_line(&self, text: &str) -> io::Result<()> {
        self.lock()
            .events
            .push(ConsoleEvent::WriteLine(text.to_string()));
        Ok(())
    }

    fn read_line(&self) -> io::Result<Option<String>> {
        let mut state = self.lock();
        match state.lines.pop_front() {
            Some(line) => {
                state.lines_read += 1;
                Ok(line)
            }
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "scripted input exhausted",
            )),
        }
    }

    fn read_key(&self) -> io::Result<KeyPress> {
        let mut state = self.lock();
        match state.keys.pop_front() {
            Some(key) => {
                state.keys_read += 1;
                Ok(key)
            }
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "scripted keys exhausted",
            )),
        }
    }
}
