//! Mention Parsing
//!
//! Extracts `@CODENAME` mentions from the newest user turn.
//!
//! # Examples
//!
//! ```text
//! @APEX @CIPHER review this function   -> [APEX, CIPHER]
//! @apex then @APEX again, @cipher      -> [APEX, CIPHER]
//! mail me at ops@apex.dev              -> []   (sigil attached to a word)
//! (@ARCHITECT) sketch the services     -> [ARCHITECT]
//! ```

use crate::catalog::{Agent, AgentCatalog};
use crate::error::{Error, Result};
use crate::message::InboundRequest;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

/// Pre-compiled regex for `@name` tokens; boundary rules are applied afterwards
static MENTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([A-Za-z0-9_-]+)").expect("MENTION_REGEX is a compile-time constant")
});

/// Characters allowed in a codename
pub(crate) fn is_mention_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// The sigil must start the text or follow whitespace/punctuation
fn is_detached(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || !(c.is_alphanumeric() || c == '_' || c == '-'),
    }
}

/// A well-formed mention token in a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mention<'a> {
    /// Name without the sigil, as written
    pub name: &'a str,
    /// Byte offset of the sigil
    pub start: usize,
    /// Byte offset just past the name
    pub end: usize,
}

/// Iterate over well-formed mentions, whether or not they name an agent
pub fn scan_mentions(text: &str) -> impl Iterator<Item = Mention<'_>> {
    MENTION_REGEX.captures_iter(text).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let name = caps.get(1)?;
        let prev = text[..whole.start()].chars().next_back();

        is_detached(prev).then_some(Mention {
            name: name.as_str(),
            start: whole.start(),
            end: whole.end(),
        })
    })
}

/// Remove mention tokens (and the blanks after them) and trim the result
#[must_use]
pub fn strip_mentions(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for mention in scan_mentions(text) {
        out.push_str(&text[cursor..mention.start]);
        let rest = &text[mention.end..];
        let blanks = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        cursor = mention.end + blanks;
    }
    out.push_str(&text[cursor..]);

    out.trim().to_string()
}

/// Resolves mentions against the catalog
pub struct MentionParser<'a> {
    catalog: &'a AgentCatalog,
}

impl<'a> MentionParser<'a> {
    /// Create a parser over a catalog
    #[must_use]
    pub fn new(catalog: &'a AgentCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve mentions in `text`
    ///
    /// Returns distinct agents in first-occurrence order. Unknown names are
    /// dropped; an empty result means "use the default agent".
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<&'a Agent> {
        let mut seen = HashSet::new();
        let mut agents = Vec::new();

        for mention in scan_mentions(text) {
            match self.catalog.resolve(mention.name) {
                Some(agent) => {
                    if seen.insert(agent.descriptor().id.as_str()) {
                        agents.push(agent);
                    }
                }
                None => {
                    debug!(mention = mention.name, "Ignoring unknown mention");
                }
            }
        }

        agents
    }

    /// Canonical codenames for the mentions in `text`
    #[must_use]
    pub fn parse_codenames(&self, text: &str) -> Vec<String> {
        self.parse(text)
            .into_iter()
            .map(|a| a.codename().to_string())
            .collect()
    }

    /// Resolve mentions in the last user message of a request
    ///
    /// # Errors
    /// `MalformedRequest` if there is no user message. A blank message
    /// yields no mentions.
    pub fn parse_request(&self, request: &InboundRequest) -> Result<Vec<&'a Agent>> {
        let message = request.last_user_message().ok_or_else(|| {
            Error::MalformedRequest("request contains no message with role \"user\"".to_string())
        })?;

        Ok(self.parse(&message.content))
    }
}
