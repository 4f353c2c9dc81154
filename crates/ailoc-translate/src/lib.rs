use std::time::Duration;

use ailoc_core::{AilocError, FlatMap, Result, UnitTranslator};
use color_eyre::eyre::eyre;
use serde_json::{json, Value};

pub mod placeholders;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const CREDENTIAL_VAR: &str = "OPENAI_API_KEY";
pub const ORG_VAR: &str = "OPENAI_ORGANIZATION";

const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const TIMEOUT_SECS: u64 = 120;
const EXCERPT_LEN: usize = 120;

/// Chat-completion client for one translation unit at a time.
///
/// Constructed only when the credential is present, so an uninitialized
/// client is unrepresentable; callers receive a value they can use or an
/// error before any input processing starts.
#[derive(Debug)]
pub struct OpenAiTranslator {
    client: reqwest::blocking::Client,
    api_key: String,
    organization: Option<String>,
    model: String,
}

impl OpenAiTranslator {
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var(CREDENTIAL_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(AilocError::MissingCredential {
                var: CREDENTIAL_VAR,
            })?;
        let organization = std::env::var(ORG_VAR).ok().filter(|v| !v.trim().is_empty());
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key,
            organization,
            model: model.into(),
        })
    }

    fn request_reply(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": "You are a professional software localizer." },
                { "role": "user", "content": prompt }
            ],
            "temperature": 0.2
        });

        let mut req = self
            .client
            .post(ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body);
        if let Some(org) = &self.organization {
            req = req.header("OpenAI-Organization", org);
        }

        let resp = req.send()?;
        let status = resp.status();
        // Read as text first so HTTP error bodies are not lost when they
        // fail to parse as JSON.
        let text = resp.text()?;
        if !status.is_success() {
            return Err(eyre!(
                "translation API error: HTTP {}: {}",
                status.as_u16(),
                excerpt(&text)
            ));
        }

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| eyre!("translation API returned invalid JSON: {e}"))?;
        let content = value
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| eyre!("translation API reply missing choices[0].message.content"))?;
        Ok(content.to_string())
    }
}

impl UnitTranslator for OpenAiTranslator {
    fn translate_unit(
        &self,
        section: &str,
        strings: &FlatMap,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<FlatMap> {
        let prompt = build_prompt(section, strings, source_lang, target_lang)?;
        tracing::debug!(
            event = "unit_request",
            section = section,
            keys = strings.len(),
            target = target_lang
        );
        let raw = self.request_reply(&prompt)?;
        let reply = parse_reply(section, &raw)?;
        validate_reply(section, strings, &reply)
    }
}

/// The outbound prompt contract: keys verbatim, placeholders untouched,
/// tone preserved, section name as context, JSON-only reply.
pub fn build_prompt(
    section: &str,
    strings: &FlatMap,
    source_lang: &str,
    target_lang: &str,
) -> Result<String> {
    let payload = serde_json::to_string_pretty(strings)?;
    Ok(format!(
        "Translate the following UI strings from {source_lang} to {target_lang}.\n\
         These strings belong to the \"{section}\" section of an application locale file.\n\
         \n\
         Rules:\n\
         - Translate values only; return every key verbatim.\n\
         - Placeholder tokens such as {{{{name}}}} or %{{count}} must be kept byte-for-byte unchanged.\n\
         - Preserve the tone and register of the source text.\n\
         - Reply with a single valid JSON object mapping each key to its translated value. No prose, no code fences.\n\
         \n\
         Strings:\n\
         {payload}\n"
    ))
}

/// Strip one leading fenced code block marker (optionally carrying a
/// format tag such as "json") and the matching trailing fence. Anything
/// else passes through untouched.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```") {
        s = match rest.split_once('\n') {
            Some((_tag, body)) => body,
            None => "",
        };
        if let Some(body) = s.trim_end().strip_suffix("```") {
            s = body;
        }
    }
    s.trim()
}

/// Parse a (possibly fenced) reply into a flat string map.
pub fn parse_reply(section: &str, raw: &str) -> Result<FlatMap> {
    let body = strip_code_fence(raw);
    let parse_err = |reason: String| AilocError::ResponseParse {
        section: section.to_string(),
        reason,
        excerpt: excerpt(body),
    };

    let value: Value =
        serde_json::from_str(body).map_err(|e| parse_err(e.to_string()))?;
    let map = match value {
        Value::Object(map) => map,
        _ => return Err(parse_err("reply is not a JSON object".to_string()).into()),
    };

    let mut out = FlatMap::new();
    for (key, value) in map {
        match value {
            Value::String(s) => {
                out.insert(key, s);
            }
            _ => {
                return Err(parse_err(format!("non-string value at key '{key}'")).into());
            }
        }
    }
    Ok(out)
}

/// Enforce the two reply invariants: exact key-set equality and verbatim
/// placeholder survival. Returns the reply re-ordered to the request's key
/// order so downstream reassembly is deterministic.
pub fn validate_reply(section: &str, source: &FlatMap, reply: &FlatMap) -> Result<FlatMap> {
    let mut expected: Vec<String> = source.keys().cloned().collect();
    let mut actual: Vec<String> = reply.keys().cloned().collect();
    expected.sort();
    actual.sort();
    if expected != actual {
        return Err(AilocError::KeySetMismatch {
            section: section.to_string(),
            expected,
            actual,
        }
        .into());
    }

    let mut out = FlatMap::new();
    for (key, source_value) in source {
        let translated = &reply[key];
        let found = placeholders::extract_placeholders(translated);
        for token in placeholders::extract_placeholders(source_value) {
            if !found.contains(&token) {
                return Err(AilocError::PlaceholderMismatch {
                    section: section.to_string(),
                    key: key.clone(),
                    token,
                }
                .into());
            }
        }
        out.insert(key.clone(), translated.clone());
    }
    Ok(out)
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() > EXCERPT_LEN {
        let cut: String = trimmed.chars().take(EXCERPT_LEN).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    }
}
