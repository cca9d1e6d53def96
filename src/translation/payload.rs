/*!
 * Structured payload localization.
 *
 * An outgoing payload (message body, embeds, interactive components) is
 * handed over as loose JSON; the translatable surfaces are rewritten in
 * place through the markup-aware pipeline. Which categories get touched
 * is governed by the configuration in effect.
 */

use serde_json::Value;

use crate::errors::PipelineError;
use crate::language::Language;
use crate::markup::ESCAPE_MARKER;

use super::core::TranslationService;

// Button component type tag in the wire shape.
const COMPONENT_BUTTON: u64 = 2;

impl TranslationService {
    /// Translate the translatable surfaces of an outgoing payload in
    /// place, honoring the category toggles of the current configuration.
    pub async fn localize_payload(
        &self,
        payload: &mut Value,
        dest: &Language,
    ) -> Result<(), PipelineError> {
        let cfg = self.config();

        if cfg.translate_content {
            if let Some(slot) = payload.get_mut("content") {
                self.localize_string(slot, dest).await?;
            }
        }

        if cfg.translate_embeds {
            // Both the singular and the plural spelling appear in the wild.
            if let Some(embed) = payload.get_mut("embed") {
                self.localize_embed(embed, dest).await?;
            }
            if let Some(embeds) = payload.get_mut("embeds").and_then(Value::as_array_mut) {
                for embed in embeds {
                    self.localize_embed(embed, dest).await?;
                }
            }
        }

        if cfg.translate_components {
            if let Some(rows) = payload.get_mut("components").and_then(Value::as_array_mut) {
                for row in rows {
                    if let Some(items) = row.get_mut("components").and_then(Value::as_array_mut) {
                        for item in items {
                            let is_button =
                                item.get("type").and_then(Value::as_u64) == Some(COMPONENT_BUTTON);
                            if is_button {
                                if let Some(slot) = item.get_mut("label") {
                                    self.localize_string(slot, dest).await?;
                                }
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    async fn localize_embed(
        &self,
        embed: &mut Value,
        dest: &Language,
    ) -> Result<(), PipelineError> {
        for key in ["title", "description"] {
            if let Some(slot) = embed.get_mut(key) {
                self.localize_string(slot, dest).await?;
            }
        }

        if let Some(fields) = embed.get_mut("fields").and_then(Value::as_array_mut) {
            for field in fields {
                for key in ["name", "value"] {
                    if let Some(slot) = field.get_mut(key) {
                        self.localize_string(slot, dest).await?;
                    }
                }
            }
        }

        if let Some(slot) = embed.get_mut("author").and_then(|author| author.get_mut("name")) {
            self.localize_string(slot, dest).await?;
        }
        if let Some(slot) = embed.get_mut("footer").and_then(|footer| footer.get_mut("text")) {
            self.localize_string(slot, dest).await?;
        }

        Ok(())
    }

    /// Translate one string slot in place. Blank strings and zero-width
    /// placeholders stay as they are.
    async fn localize_string(
        &self,
        slot: &mut Value,
        dest: &Language,
    ) -> Result<(), PipelineError> {
        let text = match slot.as_str() {
            Some(text) => text,
            None => return Ok(()),
        };
        if text.trim().is_empty() || text == ESCAPE_MARKER {
            return Ok(());
        }
        let translated = self.translate_message(text, dest).await?;
        *slot = Value::String(translated);
        Ok(())
    }
}
