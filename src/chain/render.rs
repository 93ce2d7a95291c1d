use std::fmt;

use super::Fail;

/// Presentation verb a caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Short string form (`Display`)
    Str,
    /// General value form (`Debug`)
    Value,
    /// Anything else; renders nothing
    Other(char),
}

impl From<char> for Verb {
    fn from(verb: char) -> Self {
        match verb {
            's' => Verb::Str,
            'v' => Verb::Value,
            other => Verb::Other(other),
        }
    }
}

impl Fail {
    /// Write this error into `sink`.
    ///
    /// With `extended` unset both verbs write the top message. With it set a
    /// chain node writes the trace captured when that node was built; leaves
    /// still write their message. Unknown verbs write nothing.
    pub fn render<W>(&self, sink: &mut W, verb: Verb, extended: bool) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        if let Verb::Other(_) = verb {
            return Ok(());
        }

        if let (Fail::Chain(node), true) = (self, extended) {
            return sink.write_str(&String::from_utf8_lossy(node.trace()));
        }

        // the message sits on the leaf at the end of the `current` links
        let mut err = self;
        loop {
            match err {
                Fail::Chain(node) => err = node.current(),
                Fail::Leaf(error) => return write!(sink, "{}", error),
            }
        }
    }

    /// [`Fail::render`] into a fresh string.
    pub fn rendered(&self, verb: Verb, extended: bool) -> String {
        Rendered {
            fail: self,
            verb,
            extended,
        }
        .to_string()
    }
}

struct Rendered<'a> {
    fail: &'a Fail,
    verb: Verb,
    extended: bool,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fail.render(f, self.verb, self.extended)
    }
}
