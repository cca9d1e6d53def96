/*!
 * Destination language resolution.
 *
 * Before a message enters the pipeline, the integration layer asks which
 * language it should be translated into. Preferences hang off a numeric
 * identifier hierarchy (author, then channel, then guild); the actual
 * storage is behind an injected async lookup capability. No preference
 * anywhere means the text must pass through untouched.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::language::Language;

/// Numeric identifier in the author/channel/guild hierarchy.
pub type Id = u64;

/// Lookup capability for language preferences.
#[async_trait]
pub trait LanguageLookup: Send + Sync {
    /// Resolve the preferred language for one identifier.
    ///
    /// Errors are treated as "no preference" by the resolver and the
    /// chain continues.
    async fn language_of(&self, id: Id) -> Result<Option<Language>>;
}

/// The shapes of outgoing context the integration layer can produce, each
/// carrying exactly the identifiers it can know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveContext {
    /// A regular message in a channel
    Message {
        /// Author of the message
        author: Id,
        /// Channel the message goes to
        channel: Id,
        /// Guild the channel belongs to, when any
        guild: Option<Id>,
    },
    /// A bare channel destination with no author
    Channel {
        /// Destination channel
        channel: Id,
        /// Guild the channel belongs to, when any
        guild: Option<Id>,
    },
    /// A webhook delivery
    Webhook {
        /// Destination channel, when known
        channel: Option<Id>,
        /// Guild, when known
        guild: Option<Id>,
    },
    /// An interaction response
    Interaction {
        /// Invoking user, when known
        author: Option<Id>,
        /// Channel of the interaction, when known
        channel: Option<Id>,
        /// Guild of the interaction, when known
        guild: Option<Id>,
    },
}

impl ResolveContext {
    /// Author identifier, when this shape carries one.
    pub fn author_id(&self) -> Option<Id> {
        match self {
            Self::Message { author, .. } => Some(*author),
            Self::Interaction { author, .. } => *author,
            _ => None,
        }
    }

    /// Channel identifier, when this shape carries one.
    pub fn channel_id(&self) -> Option<Id> {
        match self {
            Self::Message { channel, .. } | Self::Channel { channel, .. } => Some(*channel),
            Self::Webhook { channel, .. } | Self::Interaction { channel, .. } => *channel,
        }
    }

    /// Guild identifier, when this shape carries one.
    pub fn guild_id(&self) -> Option<Id> {
        match self {
            Self::Message { guild, .. }
            | Self::Channel { guild, .. }
            | Self::Webhook { guild, .. }
            | Self::Interaction { guild, .. } => *guild,
        }
    }
}

/// Resolve the most precedent destination language for a context.
///
/// Author preference wins over the channel's, which wins over the
/// guild's; the chain short-circuits on the first hit and performs at
/// most three lookups. `None` means the pipeline must not alter the text.
pub async fn resolve_destination(
    ctx: &ResolveContext,
    lookup: &dyn LanguageLookup,
) -> Option<Language> {
    for id in [ctx.author_id(), ctx.channel_id(), ctx.guild_id()]
        .into_iter()
        .flatten()
    {
        match lookup.language_of(id).await {
            Ok(Some(lang)) => return Some(lang),
            Ok(None) => {}
            Err(err) => {
                debug!("Language lookup failed for {}: {}", id, err);
            }
        }
    }
    None
}
