//! User preference records.
//!
//! A [`Preference`] is a bag of `(category, name) -> value` entries. The
//! helpers edit it locally; [`set_user_preferences`] saves it.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, RequestOptions};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub preferences: Vec<PreferenceEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub value: String,
}

impl Preference {
    /// Decode the record returned by [`user_preferences`]. `null`, `{}` and
    /// `[]` mean nothing is saved yet and yield an empty record; any other
    /// shape must decode.
    pub fn from_stored(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let empty = match &value {
            serde_json::Value::Null => true,
            serde_json::Value::Object(map) => map.is_empty(),
            serde_json::Value::Array(items) => items.is_empty(),
            _ => false,
        };
        if empty {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
    }

    pub fn value_of(&self, category: &str, name: &str) -> Option<&str> {
        self.preferences
            .iter()
            .find(|entry| entry.category == category && entry.name == name)
            .map(|entry| entry.value.as_str())
    }

    /// Update the matching entry in place, or append a new one.
    pub fn set_value(&mut self, category: &str, name: &str, value: &str) {
        match self
            .preferences
            .iter_mut()
            .find(|entry| entry.category == category && entry.name == name)
        {
            Some(entry) => entry.value = value.to_string(),
            None => self.preferences.push(PreferenceEntry {
                id: None,
                name: name.to_string(),
                category: category.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

pub async fn all_preferences(api: &ApiClient) -> Result<Vec<Preference>, ApiError> {
    api.fetch("/api/v1/preferences", RequestOptions::get()).await
}

pub async fn user_preferences(api: &ApiClient) -> Result<serde_json::Value, ApiError> {
    api.fetch("/api/v1/user/preferences", RequestOptions::new())
        .await
}

pub async fn set_user_preferences(api: &ApiClient, preferences: &Preference) -> Result<Preference, ApiError> {
    api.fetch("/api/v1/preferences", RequestOptions::post().json(preferences)?)
        .await
}

pub async fn update_user_preferences(
    api: &ApiClient,
    preferences: &serde_json::Value,
) -> Result<serde_json::Value, ApiError> {
    api.fetch("/api/v1/user/preferences", RequestOptions::patch().json(preferences)?)
        .await
}

pub async fn reset_user_preferences(api: &ApiClient) -> Result<serde_json::Value, ApiError> {
    api.fetch("/api/v1/user/preferences/reset", RequestOptions::post())
        .await
}
