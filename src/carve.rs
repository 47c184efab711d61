//! Recovering bookmark documents from arbitrary byte streams.
//!
//! The scanner walks the source exactly once, byte by byte, matching the
//! opening literal of a bookmark file. The literal's first byte never
//! recurs later in the literal, so a failed partial match can resume at
//! the very next byte with no backtracking state — the scan is linear in
//! the source length no matter how many false starts the input contains.
//! Candidates that survive a cheap second-marker filter are structurally
//! parsed into a bounded buffer, then strictly decoded and checksum
//! verified; only documents passing every stage are reported.

use std::io::{self, BufReader, Read};
use std::ops::ControlFlow;

use serde::de::IgnoredAny;

use crate::codec;
use crate::source::{read_full_at, ReadAt, Section};
use crate::tree::Document;

/// Opening bytes of a bookmark file, through the checksum key literal.
/// Its first byte (`{`) must not reappear in the remainder — the
/// no-backtracking scan depends on that property. Re-verify it before
/// ever changing this constant.
const PREFIX: &[u8] = b"{\n   \"checksum\": \"";

/// Second fixed literal a genuine document must contain shortly after the
/// prefix. Most coincidental prefix matches in binary data die here,
/// before any JSON parsing is paid for.
const CONFIRM: &[u8] = b"   \"roots\": {\n      \"bookmark_bar\": {";

/// Read-ahead for the sequential cursor. Amortizes positional reads
/// without a large memory commitment.
const READ_BUF: usize = 8 * 1024;

/// Bytes of lookahead searched for [`CONFIRM`].
const LOOKAHEAD: usize = 1024;

/// Hard cap on a candidate document, prefix included. Large enough for
/// realistic bookmark stores; bounds memory under corrupt input. A real
/// document bigger than this is discarded, accepted trade-off.
const MAX_DOCUMENT: usize = 20 * 1024 * 1024;

/// One verified document recovered from the source.
#[derive(Debug)]
pub struct CarveMatch {
    /// Offset of the document's first byte within the scanned source.
    pub offset: u64,
    /// The exact recovered bytes.
    pub bytes: Vec<u8>,
    /// The strictly decoded, checksum-valid document.
    pub document: Document,
}

impl CarveMatch {
    /// Length of the recovered byte range.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Iterator over verified documents embedded in a byte source, in
/// ascending offset order. I/O errors are fatal: the iterator yields the
/// error once and then fuses.
pub struct Carver<R> {
    source: R,
    buf: Vec<u8>,
    cursor: usize,
    filled: usize,
    /// Absolute offset of the next byte the sequential cursor will yield.
    abs: u64,
    done: bool,
}

impl<R: ReadAt> Carver<R> {
    pub fn new(source: R) -> Carver<R> {
        Carver {
            source,
            buf: vec![0u8; READ_BUF],
            cursor: 0,
            filled: 0,
            abs: 0,
            done: false,
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if self.cursor == self.filled {
            let n = self.source.read_at(self.abs, &mut self.buf)?;
            if n == 0 {
                return Ok(None);
            }
            self.cursor = 0;
            self.filled = n;
        }
        let b = self.buf[self.cursor];
        self.cursor += 1;
        self.abs += 1;
        Ok(Some(b))
    }

    /// Advances the sequential cursor without inspecting the bytes.
    fn skip(&mut self, n: u64) {
        let buffered = (self.filled - self.cursor) as u64;
        if n <= buffered {
            self.cursor += n as usize;
        } else {
            self.cursor = 0;
            self.filled = 0;
        }
        self.abs += n;
    }

    fn scan(&mut self) -> io::Result<Option<CarveMatch>> {
        'scan: loop {
            // Prefix match with zero backtracking. Because the first byte
            // never recurs inside the literal, no match can start within
            // bytes already matched; the only byte worth keeping on a
            // mismatch is the mismatching byte itself, and only when it
            // equals the opening byte.
            let mut matched = 0;
            while matched < PREFIX.len() {
                match self.next_byte()? {
                    None => return Ok(None),
                    Some(b) if b == PREFIX[matched] => matched += 1,
                    Some(b) if b == PREFIX[0] => matched = 1,
                    Some(_) => matched = 0,
                }
            }
            let body = self.abs;
            let start = body - PREFIX.len() as u64;

            // Cheap negative filter before paying for a parse. A short
            // lookahead (prefix near end of source) is an ordinary reject.
            let mut look = vec![0u8; LOOKAHEAD];
            let n = read_full_at(&self.source, body, &mut look)?;
            look.truncate(n);
            if !contains(&look, CONFIRM) {
                continue 'scan;
            }
            tracing::debug!(offset = start, "candidate passed marker filter");

            // Bounded structural parse; finds where the document ends.
            let bytes = match self.read_candidate(body, &look)? {
                Some(bytes) => bytes,
                None => {
                    tracing::debug!(offset = start, "candidate is not a JSON value");
                    continue 'scan;
                }
            };

            // Strict decode plus checksum agreement, or it never happened.
            let document = match codec::decode(&bytes) {
                Ok((document, true)) => document,
                Ok((_, false)) => {
                    tracing::debug!(offset = start, "candidate failed checksum");
                    continue 'scan;
                }
                Err(err) => {
                    tracing::debug!(offset = start, error = %err, "candidate rejected");
                    continue 'scan;
                }
            };

            // Jump past the consumed document; matches cannot overlap.
            self.skip(bytes.len() as u64 - PREFIX.len() as u64);
            tracing::debug!(
                offset = start,
                length = bytes.len(),
                checksum = %document.checksum,
                "recovered document"
            );
            return Ok(Some(CarveMatch {
                offset: start,
                bytes,
                document,
            }));
        }
    }

    /// Reads one JSON value starting at the prefix, capped at
    /// [`MAX_DOCUMENT`], capturing its exact bytes. Returns `None` when the
    /// window holds no complete JSON value; propagates only I/O errors.
    fn read_candidate(&self, body: u64, look: &[u8]) -> io::Result<Option<Vec<u8>>> {
        let rest = Section::new(
            &self.source,
            body + look.len() as u64,
            (MAX_DOCUMENT - PREFIX.len() - look.len()) as u64,
        );
        let reader = PREFIX
            .chain(look)
            .chain(BufReader::with_capacity(READ_BUF, rest));

        let mut seen = Vec::new();
        let end = {
            let tee = Tee {
                inner: reader,
                seen: &mut seen,
            };
            let mut stream = serde_json::Deserializer::from_reader(tee).into_iter::<IgnoredAny>();
            match stream.next() {
                Some(Ok(IgnoredAny)) => stream.byte_offset(),
                Some(Err(err)) if err.is_io() => return Err(err.into()),
                Some(Err(_)) | None => return Ok(None),
            }
        };
        seen.truncate(end);
        Ok(Some(seen))
    }
}

impl<R: ReadAt> Iterator for Carver<R> {
    type Item = io::Result<CarveMatch>;

    fn next(&mut self) -> Option<io::Result<CarveMatch>> {
        if self.done {
            return None;
        }
        match self.scan() {
            Ok(Some(m)) => Some(Ok(m)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Scans `source` and feeds every verified match to `sink`, in ascending
/// offset order, until the source is exhausted or the sink breaks.
///
/// `ControlFlow::Break` stops the scan without error; any sink error
/// aborts and propagates, as do I/O errors from the source. Candidate
/// rejections are silent — not finding a match in arbitrary bytes is the
/// normal outcome of carving, never an error.
pub fn carve<R, F, E>(source: R, mut sink: F) -> Result<(), E>
where
    R: ReadAt,
    F: FnMut(CarveMatch) -> Result<ControlFlow<()>, E>,
    E: From<io::Error>,
{
    for item in Carver::new(source) {
        let m = item?;
        if let ControlFlow::Break(()) = sink(m)? {
            break;
        }
    }
    Ok(())
}

/// Records everything read through it. The JSON reader may look one byte
/// past the value it parses, so callers truncate to the parser's reported
/// end offset afterwards.
struct Tee<'a, R> {
    inner: R,
    seen: &'a mut Vec<u8>,
}

impl<R: Read> Read for Tee<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.seen.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack.windows(needle.len()).any(|w| w == needle)
}
