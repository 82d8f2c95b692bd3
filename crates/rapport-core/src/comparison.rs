//! Scored comparison of the two providers' payloads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::Provider;

/// A value held once per provider. A missing side decodes as `T::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct PerProvider<T> {
    #[serde(rename = "A", alias = "a", default)]
    pub a: T,
    #[serde(rename = "B", alias = "b", default)]
    pub b: T,
}

impl<T> PerProvider<T> {
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    pub fn get(&self, provider: Provider) -> &T {
        match provider {
            Provider::A => &self.a,
            Provider::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, provider: Provider) -> &mut T {
        match provider {
            Provider::A => &mut self.a,
            Provider::B => &mut self.b,
        }
    }
}

/// The comparison service's verdict on the two payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub recommended_provider: Provider,
    #[serde(deserialize_with = "percent_pair")]
    pub score: PerProvider<u8>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub strengths: PerProvider<Vec<String>>,
    #[serde(default)]
    pub weaknesses: PerProvider<Vec<String>>,
    #[serde(default, deserialize_with = "percent_pair")]
    pub completeness: PerProvider<u8>,
    #[serde(default)]
    pub key_differences: Vec<String>,
}

impl ComparisonResult {
    pub fn is_recommended(&self, provider: Provider) -> bool {
        self.recommended_provider == provider
    }
}

/// Non-numeric scores read as 0; numbers are rounded and clamped to 0..=100.
fn percent(value: &Value) -> u8 {
    value
        .as_f64()
        .map(|n| n.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}

fn percent_pair<'de, D: Deserializer<'de>>(d: D) -> Result<PerProvider<u8>, D::Error> {
    let raw = PerProvider::<Value>::deserialize(d)?;
    Ok(PerProvider::new(percent(&raw.a), percent(&raw.b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scores_are_clamped() {
        let cmp: ComparisonResult = serde_json::from_value(json!({
            "recommendedProvider": "A",
            "score": {"A": 182, "B": -4},
            "reasoning": "A lists more services"
        }))
        .unwrap();
        assert_eq!(cmp.score, PerProvider::new(100, 0));
        assert_eq!(cmp.completeness, PerProvider::new(0, 0));
        assert!(cmp.strengths.a.is_empty());
        assert!(cmp.is_recommended(Provider::A));
    }

    #[test]
    fn lowercase_keys_accepted() {
        let cmp: ComparisonResult = serde_json::from_value(json!({
            "recommendedProvider": "b",
            "score": {"a": 61.6, "b": "n/a"},
            "strengths": {"a": ["fast"], "b": []},
            "weaknesses": {"a": [], "b": ["no contacts"]},
            "completeness": {"a": 70, "b": 55},
            "keyDifferences": ["B found leadership"]
        }))
        .unwrap();
        assert_eq!(cmp.recommended_provider, Provider::B);
        assert_eq!(cmp.score, PerProvider::new(62, 0));
        assert_eq!(cmp.strengths.get(Provider::A), &vec!["fast".to_string()]);
        assert_eq!(cmp.key_differences.len(), 1);
    }

    #[test]
    fn unknown_recommendation_is_rejected() {
        let res: Result<ComparisonResult, _> = serde_json::from_value(json!({
            "recommendedProvider": "C",
            "score": {"A": 1, "B": 2}
        }));
        assert!(res.is_err());
    }
}
