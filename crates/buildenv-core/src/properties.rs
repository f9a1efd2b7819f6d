use std::collections::BTreeMap;
use std::path::Path;

/// Name of the env file read next to `Buildenv.toml`.
pub const ENV_FILE: &str = ".buildenv.env";

const OPEN: &str = "${env:";

/// Loads a `.buildenv.env` file (shell-style `KEY=value` format).
///
/// Blank lines and `#` comments are skipped. A missing file yields an empty
/// map.
pub fn load_env_file(path: &Path) -> miette::Result<BTreeMap<String, String>> {
    if !path.is_file() {
        return Ok(BTreeMap::new());
    }
    let content =
        std::fs::read_to_string(path).map_err(buildenv_util::errors::BuildEnvError::Io)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect())
}

/// Interpolate `${env:VAR}` references in a string.
///
/// Values come from `env_overrides` first, then the process environment.
/// Unknown variables expand to the empty string; an unterminated reference
/// is copied through verbatim.
pub fn interpolate(input: &str, env_overrides: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let key = &after[..end];
        match env_overrides.get(key) {
            Some(value) => out.push_str(value),
            None => out.push_str(&std::env::var(key).unwrap_or_default()),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
