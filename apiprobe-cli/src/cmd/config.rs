use std::path::Path;
use std::time::Duration;

use apiprobe_core::{parse_object_str, Variables};
use apiprobe_exec::{DiscoveryConfig, DiscoveryError, ExecutorConfig, SpecDiscoverer, SpecDocument};

use crate::exit_codes;
use crate::output::print_error;
use crate::{DiscoveryArgs, ExecArgs, OutputArgs};

/// Read a JSON/YAML object from `path`. A missing path yields an empty map.
pub fn load_context(path: Option<&Path>, output: &OutputArgs) -> Option<Variables> {
    let Some(path) = path else {
        return Some(Variables::new());
    };
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            print_error(output, &format!("failed to read {}: {e}", path.display()));
            return None;
        }
    };
    match parse_object_str(&content) {
        Ok(map) => Some(map),
        Err(e) => {
            print_error(output, &format!("{}: {e}", path.display()));
            None
        }
    }
}

pub fn merge_set_vars(variables: &mut Variables, set_vars: &[String]) {
    for s in set_vars {
        if let Some((k, v)) = s.split_once('=') {
            variables.insert(k.to_string(), serde_json::Value::String(v.to_string()));
        }
    }
}

pub fn build_discovery_config(args: &DiscoveryArgs) -> DiscoveryConfig {
    let mut config = DiscoveryConfig {
        timeout: Duration::from_millis(args.discovery_timeout),
        accept_invalid_certs: !args.strict_tls,
        max_redirects: args.max_redirects,
        ..Default::default()
    };
    if let Some(ua) = &args.user_agent {
        config.user_agent = ua.clone();
    }
    config
}

pub fn build_executor_config(args: &ExecArgs) -> ExecutorConfig {
    ExecutorConfig {
        timeout: Duration::from_millis(args.timeout),
        ..Default::default()
    }
}

/// Locate the description behind `source`, printing any failure. The error
/// side carries the exit code to return.
pub async fn locate_spec(
    source: &str,
    discovery: &DiscoveryArgs,
    output: &OutputArgs,
) -> Result<SpecDocument, i32> {
    let discoverer = match SpecDiscoverer::new(build_discovery_config(discovery)) {
        Ok(d) => d,
        Err(e) => {
            print_error(output, &format!("{e}"));
            return Err(exit_codes::RUNTIME_ERROR);
        }
    };
    match discoverer.locate(source).await {
        Ok(doc) => Ok(doc),
        Err(e) => {
            print_error(output, &format!("{e}"));
            Err(match e {
                DiscoveryError::Load(_) => exit_codes::VALIDATION_FAILED,
                DiscoveryError::NotFound { .. } | DiscoveryError::Client(_) => {
                    exit_codes::RUNTIME_ERROR
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_vars_override_and_skip_malformed() {
        let mut vars = Variables::new();
        vars.insert("id".to_string(), serde_json::json!(1));
        merge_set_vars(
            &mut vars,
            &["id=7".to_string(), "noequals".to_string(), "q=a=b".to_string()],
        );
        assert_eq!(vars["id"], "7");
        assert_eq!(vars["q"], "a=b");
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn strict_tls_disables_invalid_certs() {
        let args = DiscoveryArgs {
            discovery_timeout: 250,
            user_agent: Some("probe".to_string()),
            strict_tls: true,
            max_redirects: 3,
        };
        let c = build_discovery_config(&args);
        assert_eq!(c.timeout, Duration::from_millis(250));
        assert_eq!(c.user_agent, "probe");
        assert!(!c.accept_invalid_certs);
        assert_eq!(c.max_redirects, 3);
    }
}
