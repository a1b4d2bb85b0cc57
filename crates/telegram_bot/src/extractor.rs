//! Category-constrained extraction through the external classification
//! oracle.
//!
//! One network request per message, no retry and no timeout policy. The
//! allowed category set is rebuilt on every call, and the oracle's answer is
//! re-validated against that exact set before being accepted: a non-member
//! category falls back to [`FALLBACK_CATEGORY`].

use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use serde_json::json;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

pub(crate) const FALLBACK_CATEGORY: &str = "OTROS";
const DEFAULT_CURRENCY: &str = "ARS";

/// Structured fields the oracle extracts from a message label.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct ExpenseExtraction {
    #[serde(default)]
    pub value: f64,
    pub category: String,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ExtractorError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("malformed oracle response: {0}")]
    Malformed(String),
}

/// Client for the extraction oracle, created once at startup.
#[derive(Clone, Debug)]
pub struct OracleClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OracleClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Result<Self, String> {
        let secret = format!("Bearer {api_key}");
        let mut auth = header::HeaderValue::try_from(secret)
            .map_err(|err| format!("invalid auth header value: {err}"))?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| format!("failed to build http client: {err}"))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// Extract `{value, category, currency}` from `text`, constrained to the
    /// `allowed` category set.
    pub(crate) async fn extract(
        &self,
        text: &str,
        allowed: &[String],
    ) -> Result<ExpenseExtraction, ExtractorError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": instructions(allowed) },
                { "role": "user", "content": text },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "expense_extraction",
                    "strict": true,
                    "schema": {
                        "type": "object",
                        "properties": {
                            "value": { "type": "number" },
                            "category": { "type": "string" },
                            "currency": { "type": "string" },
                        },
                        "required": ["value", "category", "currency"],
                        "additionalProperties": false,
                    },
                },
            },
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .text()
                .await
                .unwrap_or_else(|_| "oracle error".to_string());
            return Err(ExtractorError::Server { status, message });
        }

        let completion = resp.json::<ChatCompletion>().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ExtractorError::Malformed("empty choices".to_string()))?;

        let extraction: ExpenseExtraction =
            serde_json::from_str(&content).map_err(|err| ExtractorError::Malformed(err.to_string()))?;

        Ok(constrain(extraction, allowed))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// System instructions enumerating the caller's allowed category set.
fn instructions(allowed: &[String]) -> String {
    format!(
        "El mensaje describe un gasto de dinero personal de un usuario enviado por un corto mensaje de texto.\n\
         Extrae:\n\
         - value: monto numérico del gasto (usar punto como separador decimal). Si no hay valor, asignar 0.0.\n\
         - category: la categoría del gasto. Las opciones son: {}.\n\
         - currency: la moneda del gasto (por defecto {DEFAULT_CURRENCY} si no se menciona).\n\
         Si no hay buena coincidencia con las categorías, usar \"{FALLBACK_CATEGORY}\".",
        allowed.join(", ")
    )
}

/// Re-validate an oracle answer against the exact allowed set.
///
/// A member match (compared on normalized keys) resolves to the canonical
/// catalog spelling; anything else becomes the fallback category. The
/// currency defaults to [`DEFAULT_CURRENCY`] when unstated, and the value
/// must be finite and non-negative.
fn constrain(extraction: ExpenseExtraction, allowed: &[String]) -> ExpenseExtraction {
    let key = normalize_key(&extraction.category);
    let category = allowed
        .iter()
        .find(|candidate| !key.is_empty() && normalize_key(candidate) == key)
        .cloned()
        .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

    let currency = extraction.currency.trim().to_uppercase();
    let currency = if currency.is_empty() {
        DEFAULT_CURRENCY.to_string()
    } else {
        currency
    };

    let value = if extraction.value.is_finite() && extraction.value >= 0.0 {
        extraction.value
    } else {
        0.0
    };

    ExpenseExtraction {
        value,
        category,
        currency,
    }
}

/// Case- and diacritic-insensitive key for category comparison.
fn normalize_key(input: &str) -> String {
    let mut out = String::new();
    let mut prev_space = false;
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec![
            "SUPERMERCADO".to_string(),
            "SALIR A COMER".to_string(),
            "TARJETA DE CRÉDITO".to_string(),
            "OTROS".to_string(),
        ]
    }

    fn extraction(value: f64, category: &str, currency: &str) -> ExpenseExtraction {
        ExpenseExtraction {
            value,
            category: category.to_string(),
            currency: currency.to_string(),
        }
    }

    #[test]
    fn member_category_is_kept() {
        let out = constrain(extraction(10.0, "SUPERMERCADO", "ARS"), &allowed());
        assert_eq!(out.category, "SUPERMERCADO");
    }

    #[test]
    fn member_match_ignores_case_and_accents() {
        let out = constrain(extraction(10.0, "tarjeta de credito", "ARS"), &allowed());
        assert_eq!(out.category, "TARJETA DE CRÉDITO");
    }

    #[test]
    fn non_member_falls_back() {
        let out = constrain(extraction(10.0, "JOYERÍA", "ARS"), &allowed());
        assert_eq!(out.category, FALLBACK_CATEGORY);

        let out = constrain(extraction(10.0, "", "ARS"), &allowed());
        assert_eq!(out.category, FALLBACK_CATEGORY);
    }

    #[test]
    fn currency_defaults_and_normalizes() {
        let out = constrain(extraction(10.0, "OTROS", ""), &allowed());
        assert_eq!(out.currency, "ARS");

        let out = constrain(extraction(10.0, "OTROS", " usd "), &allowed());
        assert_eq!(out.currency, "USD");
    }

    #[test]
    fn bad_values_become_zero() {
        assert_eq!(constrain(extraction(-3.0, "OTROS", "ARS"), &allowed()).value, 0.0);
        assert_eq!(
            constrain(extraction(f64::NAN, "OTROS", "ARS"), &allowed()).value,
            0.0
        );
        assert_eq!(constrain(extraction(12.5, "OTROS", "ARS"), &allowed()).value, 12.5);
    }

    #[test]
    fn instructions_enumerate_the_allowed_set() {
        let text = instructions(&allowed());
        for name in allowed() {
            assert!(text.contains(&name));
        }
    }
}
