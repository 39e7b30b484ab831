//! Stack Trace - Structured call trace carried by every error
//!
//! A [`Trace`] is an ordered list of [`Frame`]s, innermost first. The
//! normalizer records its own frame while an error is being constructed and
//! removes it again with [`Trace::drop_own_frame`], so the trace handed back
//! to callers starts in their own code.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

/// Function name recorded for the normalizer's own frame.
pub const NORMALIZER_FRAME: &str = "errs::Errs::create";

/// Placeholder rendered for frames without a function name or location.
const ANONYMOUS: &str = "<anonymous>";

// ============================================================================
// SourceLocation
// ============================================================================

/// Position in a source file (`file:line:column`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: Cow<'static, str>,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    #[inline]
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Parse `file:line:column`
    ///
    /// The file part may itself contain colons (e.g. Windows drive letters).
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.trim().rsplitn(3, ':');
        let column = parts.next()?.parse().ok()?;
        let line = parts.next()?.parse().ok()?;
        let file = parts.next().filter(|file| !file.is_empty())?;
        Some(Self::new(file.to_owned(), line, column))
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line(), location.column())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

// ============================================================================
// Frame
// ============================================================================

/// One entry of a [`Trace`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    function: Option<Cow<'static, str>>,
    location: Option<SourceLocation>,
}

impl Frame {
    /// Frame for a named function without a known location
    #[inline]
    pub fn function(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            function: Some(name.into()),
            location: None,
        }
    }

    /// Frame for a bare source location
    #[inline]
    pub fn at(location: impl Into<SourceLocation>) -> Self {
        Self {
            function: None,
            location: Some(location.into()),
        }
    }

    #[inline]
    pub fn with_location(mut self, location: impl Into<SourceLocation>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.function.as_deref()
    }

    #[inline]
    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Whether this frame belongs to the normalizer itself
    #[inline]
    pub fn is_own_frame(&self) -> bool {
        self.name() == Some(NORMALIZER_FRAME)
    }

    /// Parse one rendered `at …` line
    ///
    /// Accepts `at function (file:line:col)`, `at file:line:col` and
    /// `at function`. Returns `None` for lines that are not frames.
    pub fn parse(line: &str) -> Option<Self> {
        let body = line.trim().strip_prefix("at ")?.trim();

        if let Some((function, rest)) = body.split_once(" (") {
            if let Some(location) = rest.strip_suffix(')').and_then(SourceLocation::parse) {
                return Some(Self::from_function_text(function).with_location(location));
            }
        }
        if let Some(location) = SourceLocation::parse(body) {
            return Some(Self::at(location));
        }
        Some(Self::from_function_text(body))
    }

    fn from_function_text(function: &str) -> Self {
        let function = function.trim();
        if function.is_empty() || function == ANONYMOUS {
            Self::default()
        } else {
            Self::function(function.to_owned())
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.function, &self.location) {
            (Some(name), Some(location)) => write!(f, "at {name} ({location})"),
            (Some(name), None) => write!(f, "at {name}"),
            (None, Some(location)) => write!(f, "at {location}"),
            (None, None) => write!(f, "at {ANONYMOUS}"),
        }
    }
}

// ============================================================================
// Trace
// ============================================================================

/// Ordered call trace, innermost frame first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    frames: Vec<Frame>,
}

impl Trace {
    #[inline]
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Single-frame trace starting at `location`
    pub fn rooted_at(location: impl Into<SourceLocation>) -> Self {
        Self::new(vec![Frame::at(location)])
    }

    /// Single-frame trace starting at the caller of this function
    #[track_caller]
    pub fn capture() -> Self {
        Self::rooted_at(Location::caller())
    }

    /// Trace handed to a constructor invoked by the normalizer for `caller`
    ///
    /// The innermost frame is the normalizer's own; it is removed again once
    /// construction is complete.
    pub fn for_construction(caller: impl Into<SourceLocation>) -> Self {
        Self::new(vec![Frame::function(NORMALIZER_FRAME), Frame::at(caller)])
    }

    /// Parse a rendered trace, ignoring non-frame lines such as a header
    pub fn parse(text: &str) -> Self {
        Self::new(text.lines().filter_map(Frame::parse).collect())
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Remove the normalizer's own frame
    ///
    /// Only the first matching frame is removed; the remaining frames keep
    /// their order. Returns `false` if the trace holds no such frame.
    pub fn drop_own_frame(&mut self) -> bool {
        match self.frames.iter().position(Frame::is_own_frame) {
            Some(index) => {
                self.frames.remove(index);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "    {frame}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_caller() {
        let trace = Trace::capture();
        assert_eq!(trace.len(), 1);
        let location = trace.frames()[0].location().unwrap();
        assert!(location.file.ends_with("trace.rs"));
    }

    #[test]
    fn test_drop_own_frame() {
        let mut trace = Trace::for_construction(SourceLocation::new("src/main.rs", 10, 5));
        assert_eq!(trace.len(), 2);

        assert!(trace.drop_own_frame());
        assert_eq!(trace.frames(), &[Frame::at(SourceLocation::new("src/main.rs", 10, 5))]);

        assert!(!trace.drop_own_frame());
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn test_drop_own_frame_keeps_order() {
        let mut trace = Trace::new(vec![
            Frame::function("inner"),
            Frame::function(NORMALIZER_FRAME),
            Frame::function("middle"),
            Frame::function(NORMALIZER_FRAME),
            Frame::function("outer"),
        ]);
        assert!(trace.drop_own_frame());

        let names: Vec<_> = trace.frames().iter().map(|f| f.name().unwrap()).collect();
        assert_eq!(names, ["inner", "middle", NORMALIZER_FRAME, "outer"]);
    }

    #[test]
    fn test_display() {
        let trace = Trace::new(vec![
            Frame::function("app::run").with_location(SourceLocation::new("src/app.rs", 3, 9)),
            Frame::at(SourceLocation::new("src/main.rs", 10, 5)),
            Frame::function("main"),
            Frame::default(),
        ]);
        assert_eq!(
            trace.to_string(),
            "    at app::run (src/app.rs:3:9)\n    at src/main.rs:10:5\n    at main\n    at <anonymous>"
        );
    }

    #[test]
    fn test_parse_rendered_trace() {
        let trace = Trace::new(vec![
            Frame::function("app::run").with_location(SourceLocation::new("src/app.rs", 3, 9)),
            Frame::at(SourceLocation::new("src/main.rs", 10, 5)),
            Frame::function("main"),
            Frame::default(),
        ]);
        let text = format!("Error: boom\n{trace}");
        assert_eq!(Trace::parse(&text), trace);
    }

    #[test]
    fn test_source_location_parse() {
        assert_eq!(
            SourceLocation::parse("C:\\src\\lib.rs:7:1"),
            Some(SourceLocation::new("C:\\src\\lib.rs", 7, 1))
        );
        assert_eq!(SourceLocation::parse("lib.rs:7"), None);
        assert_eq!(SourceLocation::parse(":7:1"), None);
        assert_eq!(SourceLocation::parse("lib.rs:x:1"), None);
    }
}
