//! Measure-then-render message formatting.
//!
//! Every message is measured with a dry run first. Messages that fit the fixed
//! buffer are rendered on the stack without touching the allocator; longer
//! ones go to an exactly-sized heap buffer when the allocation policy allows
//! it and are truncated otherwise.

use std::fmt::{self, Write};

/// Size of the fixed message buffer. One byte stays reserved, so a message
/// renders verbatim when it is at most `MESSAGE_SIZE - 1` bytes long.
pub const MESSAGE_SIZE: usize = 2048;

const FIXED_CAPACITY: usize = MESSAGE_SIZE - 1;

#[derive(Default)]
struct Counter(usize);

impl Write for Counter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// Rendered length of `args` in bytes.
pub fn measure(args: fmt::Arguments<'_>) -> usize {
    let mut counter = Counter::default();
    // Counter never fails; an error here can only come from a Display impl.
    let _ = counter.write_fmt(args);
    counter.0
}

/// Stack buffer that silently drops whatever does not fit, cutting on a
/// UTF-8 boundary.
pub struct FixedBuffer {
    buf: [u8; FIXED_CAPACITY],
    len: usize,
    truncated: bool,
}

impl FixedBuffer {
    pub fn new() -> Self {
        Self {
            buf: [0; FIXED_CAPACITY],
            len: 0,
            truncated: false,
        }
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl Default for FixedBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for FixedBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = FIXED_CAPACITY - self.len;
        let mut take = s.len().min(room);
        if take < s.len() {
            self.truncated = true;
            while !s.is_char_boundary(take) {
                take -= 1;
            }
        }
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

pub enum Rendered {
    Fixed(FixedBuffer),
    Heap(String),
}

impl Rendered {
    pub fn as_str(&self) -> &str {
        match self {
            Rendered::Fixed(buf) => buf.as_str(),
            Rendered::Heap(text) => text,
        }
    }
}

/// What happened while rendering, beyond the text itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    /// Length measured by the dry run.
    pub required: usize,
    /// The heap buffer could not be reserved.
    pub allocation_failed: bool,
    /// Output was cut to the fixed capacity.
    pub truncated: bool,
}

/// Renders `args`, choosing the buffer from the measured length and
/// `allow_heap`.
pub fn render(args: fmt::Arguments<'_>, allow_heap: bool) -> (Rendered, RenderReport) {
    render_with(args, allow_heap, |text, size| text.try_reserve_exact(size).is_ok())
}

/// [`render`] with the heap reservation supplied by the caller; `reserve`
/// returns whether `size` bytes could be reserved.
pub(crate) fn render_with(
    args: fmt::Arguments<'_>,
    allow_heap: bool,
    reserve: impl FnOnce(&mut String, usize) -> bool,
) -> (Rendered, RenderReport) {
    let required = measure(args);
    let mut report = RenderReport {
        required,
        ..RenderReport::default()
    };

    if required > FIXED_CAPACITY && allow_heap {
        let mut text = String::new();
        if reserve(&mut text, required) {
            let _ = text.write_fmt(args);
            return (Rendered::Heap(text), report);
        }
        report.allocation_failed = true;
    }

    let mut fixed = FixedBuffer::new();
    let _ = fixed.write_fmt(args);
    report.truncated = fixed.is_truncated();
    (Rendered::Fixed(fixed), report)
}

/// Largest message the fixed buffer holds verbatim.
pub const fn fixed_capacity() -> usize {
    FIXED_CAPACITY
}
