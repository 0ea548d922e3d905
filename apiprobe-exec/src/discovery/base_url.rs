use crate::discovery::SpecDocument;

impl SpecDocument {
    /// Base URL requests should be sent to when the caller does not give one.
    ///
    /// Uses `servers[0].url`, joined onto the description's own URL when it is
    /// relative; without servers, falls back to the origin the description was
    /// fetched from. Trailing `/` is trimmed so `base + path` stays clean.
    pub fn default_base_url(&self) -> Option<String> {
        let source = url::Url::parse(&self.source_url).ok();
        let server = servers_first_url(&self.raw);

        let resolved = match (server, source) {
            (Some(server), source) => match url::Url::parse(&server) {
                Ok(abs) => abs.to_string(),
                Err(_) => source?.join(&server).ok()?.to_string(),
            },
            (None, Some(source)) => source.origin().ascii_serialization(),
            (None, None) => return None,
        };
        Some(resolved.trim_end_matches('/').to_string())
    }

    pub fn title(&self) -> Option<&str> {
        self.raw.get("info")?.get("title")?.as_str()
    }

    pub fn version(&self) -> Option<&str> {
        self.raw.get("info")?.get("version")?.as_str()
    }
}

fn servers_first_url(v: &serde_json::Value) -> Option<String> {
    let servers = v.get("servers")?.as_array()?;
    let first = servers.first()?.as_object()?;
    first.get("url")?.as_str().map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(source: &str, raw: serde_json::Value) -> SpecDocument {
        SpecDocument {
            source_url: source.to_string(),
            raw,
        }
    }

    #[test]
    fn absolute_server_wins() {
        let d = doc(
            "https://h.io/openapi.json",
            json!({"servers": [{"url": "https://api.h.io/v2/"}]}),
        );
        assert_eq!(d.default_base_url().as_deref(), Some("https://api.h.io/v2"));
    }

    #[test]
    fn relative_server_joins_source() {
        let d = doc("https://h.io/api/openapi.json", json!({"servers": [{"url": "/api/v1"}]}));
        assert_eq!(d.default_base_url().as_deref(), Some("https://h.io/api/v1"));
    }

    #[test]
    fn no_servers_uses_origin() {
        let d = doc("http://localhost:8000/openapi.json", json!({"paths": {}}));
        assert_eq!(d.default_base_url().as_deref(), Some("http://localhost:8000"));
    }

    #[test]
    fn local_file_without_servers_has_no_base() {
        let d = doc("spec.json", json!({"paths": {}}));
        assert_eq!(d.default_base_url(), None);
    }
}
