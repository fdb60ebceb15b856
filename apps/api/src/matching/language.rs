//! Language adaptation: detect each document's language and bring French
//! text into English before semantic comparison.

use tracing::{debug, warn};

use crate::providers::{LanguageService, ProviderError};

/// Longest segment sent to the translator in one call, in characters.
pub const MAX_SEGMENT_CHARS: usize = 5000;

pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Detects the language of `text`. Detection failures degrade to `"unknown"`.
pub async fn detect_language(service: &dyn LanguageService, text: &str) -> String {
    match service.detect_language(text).await {
        Ok(lang) => lang,
        Err(e) => {
            warn!(error = %e, "Language detection failed; treating text as unknown");
            UNKNOWN_LANGUAGE.to_string()
        }
    }
}

/// Splits `text` into segments of at most `max_chars` characters, cutting just
/// after the last full stop of each window, or hard at the window end if the
/// window holds none.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut segments = Vec::new();
    let mut rest = text;

    while rest.chars().count() > max_chars {
        let window_end = rest
            .char_indices()
            .nth(max_chars)
            .map_or(rest.len(), |(i, _)| i);
        let window = &rest[..window_end];
        let cut = window.rfind('.').map_or(window_end, |i| i + 1);

        segments.push(rest[..cut].trim().to_string());
        rest = rest[cut..].trim();
    }
    segments.push(rest.to_string());
    segments
}

/// Translates French text into English segment by segment; any other language
/// is returned unchanged.
pub async fn translate_to_english(
    service: &dyn LanguageService,
    text: &str,
    source_lang: &str,
) -> Result<String, ProviderError> {
    if source_lang != "fr" {
        return Ok(text.to_string());
    }

    let segments = split_text(text, MAX_SEGMENT_CHARS);
    debug!(segments = segments.len(), "Translating fr -> en");

    let mut translated = Vec::with_capacity(segments.len());
    for segment in &segments {
        translated.push(service.translate(segment, source_lang, "en").await?);
    }
    Ok(translated.join(" "))
}

/// Both documents after language adaptation, with the detected source languages.
#[derive(Debug, Clone)]
pub struct AdaptedTexts {
    pub cv: String,
    pub offer: String,
    pub cv_lang: String,
    pub offer_lang: String,
}

pub async fn adapt_texts(
    service: &dyn LanguageService,
    cv_text: &str,
    offer_text: &str,
) -> Result<AdaptedTexts, ProviderError> {
    let cv_lang = detect_language(service, cv_text).await;
    let offer_lang = detect_language(service, offer_text).await;

    let cv = translate_to_english(service, cv_text, &cv_lang).await?;
    let offer = translate_to_english(service, offer_text, &offer_lang).await?;

    Ok(AdaptedTexts {
        cv,
        offer,
        cv_lang,
        offer_lang,
    })
}
