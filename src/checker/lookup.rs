use crate::config::LookupConfig;
use crate::error::LookupError;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

/// Source of word definitions, usually a remote dictionary.
///
/// Implementations may be slow or fail in any way; callers treat every
/// error as "no definition".
#[async_trait]
pub trait DefinitionLookup: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<String, LookupError>;
}

/// Lookup that never answers, for offline use.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

#[async_trait]
impl DefinitionLookup for Offline {
    async fn lookup(&self, _word: &str) -> Result<String, LookupError> {
        Err(LookupError::Disabled)
    }
}

/// Client for dictionaryapi.dev style services: `GET <endpoint>/<word>`
/// answering a JSON list of entries.
#[derive(Debug, Clone)]
pub struct DictionaryApi {
    client: Client,
    endpoint: Url,
}

impl DictionaryApi {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| LookupError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;
        if endpoint.cannot_be_a_base() {
            return Err(LookupError::InvalidEndpoint(config.endpoint.clone()));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self { client, endpoint })
    }

    fn url_for(&self, word: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word);
        }
        url
    }
}

#[async_trait]
impl DefinitionLookup for DictionaryApi {
    async fn lookup(&self, word: &str) -> Result<String, LookupError> {
        let response = self.client.get(self.url_for(word)).send().await?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        parse_definition(&body)
    }
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(default)]
    definitions: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    #[serde(default)]
    definition: Option<String>,
}

/// First definition of the first meaning of the first entry.
pub fn parse_definition(body: &str) -> Result<String, LookupError> {
    let entries: Vec<Entry> = serde_json::from_str(body)?;

    entries
        .into_iter()
        .next()
        .and_then(|entry| entry.meanings.into_iter().next())
        .and_then(|meaning| meaning.definitions.into_iter().next())
        .and_then(|definition| definition.definition)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(LookupError::NoDefinition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_definition() {
        let body = r#"[{"word":"night","meanings":[{"partOfSpeech":"noun","definitions":[
            {"definition":"The period between sunset and sunrise."},
            {"definition":"Darkness."}]}]}]"#;
        assert_eq!(
            parse_definition(body).unwrap(),
            "The period between sunset and sunrise."
        );
    }

    #[test]
    fn test_parse_definition_failures() {
        // the service answers an object, not a list, for unknown words
        let not_found = r#"{"title":"No Definitions Found","message":"Sorry pal"}"#;
        assert!(matches!(
            parse_definition(not_found),
            Err(LookupError::Malformed(_))
        ));
        assert!(matches!(
            parse_definition("[]"),
            Err(LookupError::NoDefinition)
        ));
        assert!(matches!(
            parse_definition(r#"[{"meanings":[{"definitions":[{}]}]}]"#),
            Err(LookupError::NoDefinition)
        ));
        assert!(matches!(
            parse_definition(r#"[{"meanings":[{"definitions":[{"definition":"  "}]}]}]"#),
            Err(LookupError::NoDefinition)
        ));
        assert!(matches!(
            parse_definition("<html>"),
            Err(LookupError::Malformed(_))
        ));
    }

    #[test]
    fn test_url_for_word() {
        let api = DictionaryApi::new(&LookupConfig::default()).unwrap();
        assert_eq!(
            api.url_for("night").as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/night"
        );
        assert_eq!(
            api.url_for("a/b").as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/a%2Fb"
        );
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        let config = LookupConfig {
            endpoint: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            DictionaryApi::new(&config),
            Err(LookupError::InvalidEndpoint(_))
        ));
    }

    #[tokio::test]
    async fn test_offline_never_answers() {
        assert!(matches!(
            Offline.lookup("night").await,
            Err(LookupError::Disabled)
        ));
    }
}
