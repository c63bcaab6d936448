//! Caller-supplied launch arguments: `name:=value` tokens and YAML files.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{LaunchError, Result};

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"))
}

pub fn is_valid_argument_name(name: &str) -> bool {
    name_re().is_match(name)
}

/// Parse one `name:=value` token. The value may be empty or contain `:=`.
pub fn parse_argument(token: &str) -> Result<(String, String)> {
    let Some((name, value)) = token.split_once(":=") else {
        return Err(LaunchError::InvalidArgument {
            name: token.to_string(),
            value: String::new(),
            reason: "expected name:=value".to_string(),
        });
    };
    if !is_valid_argument_name(name) {
        return Err(LaunchError::InvalidArgument {
            name: name.to_string(),
            value: value.to_string(),
            reason: "argument names must match [A-Za-z_][A-Za-z0-9_]*".to_string(),
        });
    }
    Ok((name.to_string(), value.to_string()))
}

/// Parse tokens in order; later duplicates win.
pub fn parse_arguments<I, S>(tokens: I) -> Result<BTreeMap<String, String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = BTreeMap::new();
    for token in tokens {
        let (name, value) = parse_argument(token.as_ref())?;
        out.insert(name, value);
    }
    Ok(out)
}

/// Load a YAML mapping of launch arguments. Scalars are stringified the way
/// they would be typed on the command line (`x_pose: 1.5` → `"1.5"`).
pub fn load_arguments_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LaunchError::ResourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LaunchError::io(format!("read {}", path.display()), e)
        }
    })?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let raw: BTreeMap<String, serde_yaml::Value> =
        serde_yaml::from_str(&content).map_err(|source| LaunchError::InvalidArgumentsFile {
            path: path.to_path_buf(),
            source,
        })?;

    let mut out = BTreeMap::new();
    for (name, value) in raw {
        if !is_valid_argument_name(&name) {
            return Err(LaunchError::InvalidArgument {
                name,
                value: String::new(),
                reason: "argument names must match [A-Za-z_][A-Za-z0-9_]*".to_string(),
            });
        }
        let value = match value {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Null => String::new(),
            other => {
                return Err(LaunchError::InvalidArgument {
                    name,
                    value: format!("{:?}", other),
                    reason: "only scalar values are allowed".to_string(),
                })
            }
        };
        out.insert(name, value);
    }
    Ok(out)
}

/// `base` overlaid with `overlay`; overlay entries win.
pub fn merge(
    mut base: BTreeMap<String, String>,
    overlay: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    base.extend(overlay);
    base
}
