use std::collections::BTreeMap;

/// Key-value hints shared by every agent invoked for one request (e.g.
/// `region` → `"Centre"`). Built once at the request boundary; agents only
/// read it during dispatch.
///
/// Keys are ordered so that prompts built from the context are byte-stable
/// across requests, which keeps them cache-equivalent.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    values: BTreeMap<String, String>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.values.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
