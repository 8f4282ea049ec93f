//! Reading structured data the server embeds in the page.
//!
//! The dashboard templates render each dataset into its own
//! `<script type="application/json" id="...">` element. This module turns
//! the text content of those elements into typed values.
//!
//! The server's JSON encoder writes decimal amounts as strings
//! (`"1250.50"`), so numeric values accept both JSON numbers and numeric
//! strings. Labels accept strings or numbers and are kept as strings.

use crate::error::{CoreError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::borrow::Borrow;
use std::collections::BTreeMap;

/// Access to the text content of embedded data elements, by element id.
pub trait EmbeddedData {
    /// Text content of the element with this id, `None` if the page has no such element.
    fn text_content(&self, id: &str) -> Option<String>;
}

impl<K, V> EmbeddedData for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn text_content(&self, id: &str) -> Option<String> {
        self.get(id).map(|v| v.as_ref().to_string())
    }
}

/// Parse an optional source. An absent element yields `T::default()`.
pub fn read_json<T, S>(source: &S, id: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
    S: EmbeddedData + ?Sized,
{
    match source.text_content(id) {
        Some(text) => parse(id, &text),
        None => {
            log::debug!("embedded: '{}' not on page, using default", id);
            Ok(T::default())
        }
    }
}

/// Parse a source the page is required to carry.
pub fn read_required_json<T, S>(source: &S, id: &str) -> Result<T>
where
    T: DeserializeOwned,
    S: EmbeddedData + ?Sized,
{
    let text = source
        .text_content(id)
        .ok_or_else(|| CoreError::MissingData(id.to_string()))?;
    parse(id, &text)
}

fn parse<T: DeserializeOwned>(id: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| CoreError::MalformedData {
        id: id.to_string(),
        source,
    })
}

/// A numeric value embedded as a JSON number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawAmount")]
pub struct Amount(pub f64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl TryFrom<RawAmount> for Amount {
    type Error = String;

    fn try_from(raw: RawAmount) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawAmount::Number(n) => Ok(Amount(n)),
            RawAmount::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(Amount)
                .map_err(|_| format!("not a number: {:?}", s)),
        }
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// A chart label embedded as a string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawLabel")]
pub struct Label(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawLabel> for Label {
    fn from(raw: RawLabel) -> Self {
        match raw {
            RawLabel::Text(s) => Label(s),
            RawLabel::Number(n) => Label(n.to_string()),
        }
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0
    }
}
