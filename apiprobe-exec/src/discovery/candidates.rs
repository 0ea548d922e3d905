/// Candidate description locations for a seed URL, highest priority first.
///
/// A docs/redoc UI URL gets its `openapi.json` sibling placed ahead of the
/// seed itself, and a handful of common API-prefix fallbacks are appended when
/// the seed points below a docs page. Duplicates keep their first position.
pub fn candidates(seed: &str) -> Vec<String> {
    let mut out = vec![seed.to_string()];

    if seed.contains("docs") || seed.contains("redoc") {
        let base = seed.split('#').next().unwrap_or(seed);
        let base = base.strip_suffix('/').unwrap_or(base);
        let json_url = base
            .replace("/docs", "/openapi.json")
            .replace("/redoc", "/openapi.json");
        out.insert(0, json_url);
    }

    let base_domain = truncate_at(truncate_at(seed, "/docs"), "/redoc");
    if base_domain != seed {
        for suffix in ["/api/openapi.json", "/api/v1/openapi.json", "/v1/openapi.json"] {
            out.push(format!("{base_domain}{suffix}"));
        }
    }

    let mut deduped: Vec<String> = Vec::with_capacity(out.len());
    for c in out {
        if !deduped.contains(&c) {
            deduped.push(c);
        }
    }
    deduped
}

fn truncate_at<'a>(s: &'a str, marker: &str) -> &'a str {
    s.find(marker).map_or(s, |i| &s[..i])
}
