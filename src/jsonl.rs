//! Line streaming over plain or zstd-compressed JSONL inputs.
//!
//! The archive distributes both raw and `.zst` dumps; both are read through
//! the same callback interface. Decode errors propagate — structural
//! problems halt the run rather than being silently skipped.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use zstd::stream::read::Decoder;

use crate::util::open_with_backoff;

fn is_zst(path: &Path) -> bool {
    path.extension().map_or(false, |e| e.eq_ignore_ascii_case("zst"))
}

/// Stream a JSONL file line-by-line. `on_line(line_no, line)` receives
/// 1-based line numbers with trailing `\r?\n` stripped; empty lines are
/// skipped. Compressed (on-disk) byte progress is reported after each line
/// via `on_progress(delta)`.
pub fn for_each_line_with_progress(
    path: &Path,
    read_buf_bytes: usize,
    mut on_progress: impl FnMut(u64),
    on_line: &mut impl FnMut(u64, &str) -> Result<()>,
) -> Result<()> {
    let file = open_with_backoff(path, 16, 50).with_context(|| format!("open {}", path.display()))?;
    let counter = ByteCounter::default();

    if is_zst(path) {
        let counting = CountingReader { inner: file, counter: counter.clone() };
        let mut decoder = Decoder::new(counting)?;
        // Large frames occur in the monthly dumps; raise the window cap up front.
        decoder.window_log_max(31)?;
        let reader = BufReader::with_capacity(read_buf_bytes.max(8 * 1024), decoder);
        read_lines(reader, path, &counter, &mut on_progress, on_line)
    } else {
        let counting = CountingReader { inner: file, counter: counter.clone() };
        let reader = BufReader::with_capacity(read_buf_bytes.max(8 * 1024), counting);
        read_lines(reader, path, &counter, &mut on_progress, on_line)
    }
}

fn read_lines<R: BufRead>(
    mut reader: R,
    path: &Path,
    counter: &ByteCounter,
    on_progress: &mut impl FnMut(u64),
    on_line: &mut impl FnMut(u64, &str) -> Result<()>,
) -> Result<()> {
    let mut buf = String::with_capacity(16 * 1024);
    let mut line_no = 0u64;
    let mut last = 0u64;
    loop {
        buf.clear();
        let n = reader
            .read_line(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            let cur = counter.get();
            if cur > last {
                on_progress(cur - last);
            }
            break;
        }
        line_no += 1;
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        let cur = counter.get();
        if cur > last {
            on_progress(cur - last);
            last = cur;
        }
        if buf.is_empty() {
            continue;
        }
        on_line(line_no, &buf)?;
    }
    Ok(())
}

/// Shared byte counter: the reader side increments, the streaming loop polls.
#[derive(Clone, Default)]
struct ByteCounter(std::rc::Rc<std::cell::Cell<u64>>);

impl ByteCounter {
    fn add(&self, n: u64) {
        self.0.set(self.0.get() + n);
    }
    fn get(&self) -> u64 {
        self.0.get()
    }
}

/// A `Read` wrapper that counts raw bytes read from the underlying file.
struct CountingReader<R: Read> {
    inner: R,
    counter: ByteCounter,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.counter.add(n as u64);
        Ok(n)
    }
}
