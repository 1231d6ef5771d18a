//! Store connection configuration: parse and write `store.conf`.
//!
//! The file is a simple key=value list. A missing file is created with a
//! commented template so a first run leaves something editable behind.
//! Values resolved here are handed to the client at startup; nothing in
//! the crate reads connection parameters from any other place.

/// Connection parameters for the document store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Base URL of the store API, e.g. `http://localhost:8080/v1`.
    pub endpoint: String,
    /// Collection the user documents live in.
    pub collection: String,
    /// Optional bearer token sent with every request.
    pub api_key: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/v1".to_string(),
            collection: "users".to_string(),
            api_key: None,
        }
    }
}

impl StoreConfig {
    /// Parse a config file. Unknown keys are ignored; missing keys keep
    /// their defaults. Returns `None` if the file cannot be read.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut config = Self::default();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            match key {
                "endpoint" => config.endpoint = val.to_string(),
                "collection" => config.collection = val.to_string(),
                "api_key" => config.api_key = Some(val.to_string()),
                _ => {}
            }
        }

        Some(config)
    }

    /// Persist the config in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userreg-manager store connection\n");
        buf.push_str("# endpoint:   base URL of the document store API\n");
        buf.push_str("# collection: collection holding the user documents\n");
        buf.push_str("# api_key:    optional bearer token (omit to send none)\n\n");

        let _ = writeln!(&mut buf, "endpoint = {}", self.endpoint);
        let _ = writeln!(&mut buf, "collection = {}", self.collection);
        match &self.api_key {
            Some(key) => {
                let _ = writeln!(&mut buf, "api_key = {}", key);
            }
            None => buf.push_str("# api_key =\n"),
        }

        std::fs::write(path, buf)
    }

    /// Load from `path`, writing a template there first if it is missing.
    /// On parse errors the defaults are returned.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let config = Self::default();
        let _ = config.write_file(path);
        config
    }
}
