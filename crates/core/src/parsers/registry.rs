use super::lax::LaxValueParser;
use super::strict::StrictValueParser;
use super::traits::ValueParser;

/// Ordered list of value-parsing strategies.
///
/// The series builder tries them in registration order and stops at the
/// first one that yields data for the requested channel.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn ValueParser>>,
}

impl ParserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Strict separator-aware parsing first, last-resort token scan second.
    pub fn new_with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(StrictValueParser::new()));
        registry.register(Box::new(LaxValueParser::new()));
        registry
    }

    /// Append a parser; it is tried after every parser already registered.
    pub fn register(&mut self, parser: Box<dyn ValueParser>) {
        self.parsers.push(parser);
    }

    /// All parsers in fallback order.
    pub fn parsers(&self) -> impl Iterator<Item = &dyn ValueParser> {
        self.parsers.iter().map(|p| p.as_ref())
    }

    /// The first-tier parser, if any.
    pub fn primary(&self) -> Option<&dyn ValueParser> {
        self.parsers.first().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new_with_defaults()
    }
}
