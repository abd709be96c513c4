use modelkit_core::Document;
use serde_json::Value as JsonValue;

///
/// Filter
///
/// Query parameters for `retrieve_many`. Values are JSON so numbers and
/// booleans keep their wire form; arrays repeat the key.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    params: Document,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn limit(self, limit: u64) -> Self {
        self.param("limit", limit)
    }

    #[must_use]
    pub fn offset(self, offset: u64) -> Self {
        self.param("offset", offset)
    }

    #[must_use]
    pub fn order_by(self, key: impl Into<String>) -> Self {
        let key: String = key.into();
        self.param("order_by", key)
    }

    #[must_use]
    pub const fn params(&self) -> &Document {
        &self.params
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.params
    }
}

/// Render `params` as a URL query string (without the leading `?`).
/// Null values are dropped.
pub(crate) fn query_string(params: &Document) -> String {
    let mut pairs = Vec::new();

    for (key, value) in params {
        let values: Vec<&JsonValue> = match value {
            JsonValue::Array(items) => items.iter().collect(),
            other => vec![other],
        };

        for value in values {
            let rendered = match value {
                JsonValue::Null => continue,
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            pairs.push(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&rendered)
            ));
        }
    }

    pairs.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_string_encodes_and_repeats() {
        let filter = Filter::new()
            .param("name", "Ada Lovelace")
            .param("tag", json!(["a&b", "c"]))
            .param("gone", JsonValue::Null)
            .limit(10);

        assert_eq!(
            query_string(filter.params()),
            "limit=10&name=Ada%20Lovelace&tag=a%26b&tag=c"
        );
    }

    #[test]
    fn empty_filter_renders_nothing() {
        assert_eq!(query_string(Filter::new().params()), "");
    }
}
