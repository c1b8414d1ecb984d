use std::fmt;

use crate::ast::NodeId;

/// A message is some informational message from the compiler to the user about
/// the program. Typically these will be error messages, which the editor
/// renders next to the node they point at.
///
/// Messages can be ergonomically created using [`MessageMaker`] and the
/// [`MessageContainer`] trait.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Message {
    /// A short, descriptive title of this message.
    pub title: Text,

    /// A code indicating the cause of this message.
    pub code: Code,

    pub severity: Severity,

    /// The node this message is about.
    pub at: NodeId,

    /// Other nodes with some helpful information.
    pub labels: Vec<(NodeId, Text)>,

    /// Extra information not associated with a particular node, such as more
    /// detailed information or suggestions.
    pub notes: Vec<(NoteKind, Text)>,
}

impl Message {
    pub fn error(code: Code, at: NodeId) -> Self {
        Self::new(code, Severity::Error, at)
    }

    pub fn warning(code: Code, at: NodeId) -> Self {
        Self::new(code, Severity::Warning, at)
    }

    fn new(code: Code, severity: Severity, at: NodeId) -> Self {
        Self {
            at,
            code,
            severity,

            title: Text::empty(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_title(self, title: Text) -> Self {
        Self { title, ..self }
    }

    pub fn with_labels(self, labels: Vec<(NodeId, Text)>) -> Self {
        Self { labels, ..self }
    }

    pub fn with_note(mut self, kind: NoteKind, note: Text) -> Self {
        self.notes.push((kind, note));
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Code {
    /// A name was declared more than once.
    DeclarationError,
    /// A name could not be resolved.
    NameError,
    TypeError,
    /// A value could not be computed, for instance because it depends on
    /// itself.
    EvaluationError,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::DeclarationError => "E0001",
            Self::NameError => "E0002",
            Self::TypeError => "E0003",
            Self::EvaluationError => "E0004",
        };

        write!(f, "{code}")
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NoteKind {
    Note,
    Help,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

/// Some rich text.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Text(pub Vec<TextPart>);

impl Text {
    /// Some empty text.
    pub fn empty() -> Self {
        Self(Vec::new())
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in self.0.iter() {
            match part {
                TextPart::Text(text) => write!(f, "{text}")?,
                TextPart::Code(code) => write!(f, "`{code}`")?,
            }
        }

        Ok(())
    }
}

/// A single chunk of richly formatted text.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TextPart {
    /// Plain text.
    Text(String),

    /// Some piece of code, such as a name or a type.
    Code(String),
}

/// This is used as an intermediate struct to generate messages using syntax
/// like `self.at(id).my_message_method()`. Particular methods can be
/// implemented as extension traits on this structure, and it takes care of
/// adding it to the right container.
pub struct MessageMaker<C> {
    pub at: NodeId,
    container: C,
}

impl<C> MessageMaker<C> {
    pub fn new(container: C, at: NodeId) -> Self {
        Self { at, container }
    }

    pub fn error(&self, code: Code) -> Message {
        Message::error(code, self.at)
    }

    pub fn warning(&self, code: Code) -> Message {
        Message::warning(code, self.at)
    }
}

impl<C: MessageContainer> MessageMaker<C> {
    pub fn add(&mut self, message: Message) {
        C::push(&mut self.container, message);
    }
}

/// This trait represents anything which is able to accumulate a bunch of
/// messages at once.
pub trait MessageContainer {
    fn push(&mut self, message: Message);
}

impl MessageContainer for &'_ mut Vec<Message> {
    fn push(&mut self, message: Message) {
        Vec::push(*self, message)
    }
}

/// Helper macro to generate some rich [`Text`].
///
/// ```
/// let _ = logic_common::text![
///     "here is some ",
///     (code "code"),
///     " for you"
/// ];
/// ```
#[macro_export]
macro_rules! text {
    (part (code $part:expr)) => {
        $crate::messages::TextPart::Code(::std::string::ToString::to_string(&$part))
    };

    (part $part:expr) => {
        $crate::messages::TextPart::Text(::std::string::ToString::to_string(&$part))
    };

    [ $( $part:tt ),* ] => {
        $crate::messages::Text(vec![
            $( $crate::text!(part $part) ),*
        ])
    };
}
