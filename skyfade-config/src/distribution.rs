//! Distribution specification strings.
//!
//! A shadowing distribution is configured as a compact string in the
//! scenario file, e.g. `normal[mean=0|variance=2]`. Parsing happens at
//! load time; the parsed [`DistributionSpec`] is plain data the driver
//! turns into a concrete random variable.
//!
//! Supported forms:
//! - `normal[mean=<dB>|variance=<dB²>]` — both fields optional,
//!   defaulting to mean 0, variance 2
//! - `uniform[min=<dB>|max=<dB>]`
//! - `constant[value=<dB>]`

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ConfigError;

/// Default shadowing mean when the spec omits it, dB.
const DEFAULT_NORMAL_MEAN_DB: f64 = 0.0;
/// Default shadowing variance when the spec omits it, dB².
const DEFAULT_NORMAL_VARIANCE_DB2: f64 = 2.0;

lazy_static! {
    static ref SPEC_RE: Regex =
        Regex::new(r"^(?P<name>[a-z_]+)(?:\[(?P<params>[^\]]*)\])?$").unwrap();
}

/// A parsed distribution specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistributionSpec {
    Normal { mean_db: f64, variance_db2: f64 },
    Uniform { min_db: f64, max_db: f64 },
    Constant { value_db: f64 },
}

impl FromStr for DistributionSpec {
    type Err = ConfigError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ConfigError::DistributionSpec {
            spec: spec.to_string(),
            reason,
        };

        let captures = SPEC_RE
            .captures(spec.trim())
            .ok_or_else(|| invalid("expected `name[key=value|...]`".to_string()))?;
        let name = &captures["name"];
        let params = parse_params(captures.name("params").map_or("", |m| m.as_str()))
            .map_err(|reason| invalid(reason))?;

        match name {
            "normal" => {
                reject_unknown_keys(&params, &["mean", "variance"]).map_err(invalid)?;
                Ok(DistributionSpec::Normal {
                    mean_db: lookup(&params, "mean").unwrap_or(DEFAULT_NORMAL_MEAN_DB),
                    variance_db2: lookup(&params, "variance")
                        .unwrap_or(DEFAULT_NORMAL_VARIANCE_DB2),
                })
            }
            "uniform" => {
                reject_unknown_keys(&params, &["min", "max"]).map_err(invalid)?;
                let min_db = lookup(&params, "min")
                    .ok_or_else(|| invalid("uniform requires `min`".to_string()))?;
                let max_db = lookup(&params, "max")
                    .ok_or_else(|| invalid("uniform requires `max`".to_string()))?;
                Ok(DistributionSpec::Uniform { min_db, max_db })
            }
            "constant" => {
                reject_unknown_keys(&params, &["value"]).map_err(invalid)?;
                let value_db = lookup(&params, "value")
                    .ok_or_else(|| invalid("constant requires `value`".to_string()))?;
                Ok(DistributionSpec::Constant { value_db })
            }
            other => Err(invalid(format!("unknown distribution '{other}'"))),
        }
    }
}

fn parse_params(params: &str) -> Result<Vec<(String, f64)>, String> {
    if params.is_empty() {
        return Ok(Vec::new());
    }
    params
        .split('|')
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("malformed parameter '{pair}'"))?;
            let value: f64 = value
                .trim()
                .parse()
                .map_err(|_| format!("'{key}' is not a number: '{value}'"))?;
            Ok((key.trim().to_string(), value))
        })
        .collect()
}

fn reject_unknown_keys(params: &[(String, f64)], known: &[&str]) -> Result<(), String> {
    match params.iter().find(|(key, _)| !known.contains(&key.as_str())) {
        Some((key, _)) => Err(format!("unknown parameter '{key}'")),
        None => Ok(()),
    }
}

fn lookup(params: &[(String, f64)], key: &str) -> Option<f64> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_normal_spec() {
        let spec: DistributionSpec = "normal[mean=1.5|variance=4]".parse().unwrap();
        assert_eq!(
            spec,
            DistributionSpec::Normal {
                mean_db: 1.5,
                variance_db2: 4.0
            }
        );
    }

    #[test]
    fn test_bare_normal_uses_defaults() {
        let spec: DistributionSpec = "normal".parse().unwrap();
        assert_eq!(
            spec,
            DistributionSpec::Normal {
                mean_db: 0.0,
                variance_db2: 2.0
            }
        );
    }

    #[test]
    fn test_parses_uniform_and_constant() {
        let uniform: DistributionSpec = "uniform[min=-1|max=1]".parse().unwrap();
        assert_eq!(
            uniform,
            DistributionSpec::Uniform {
                min_db: -1.0,
                max_db: 1.0
            }
        );
        let constant: DistributionSpec = "constant[value=0]".parse().unwrap();
        assert_eq!(constant, DistributionSpec::Constant { value_db: 0.0 });
    }

    #[test]
    fn test_rejects_unknown_distribution() {
        assert!("rayleigh[sigma=1]".parse::<DistributionSpec>().is_err());
    }

    #[test]
    fn test_rejects_unknown_parameter() {
        assert!("normal[mean=0|sigma=1]".parse::<DistributionSpec>().is_err());
    }

    #[test]
    fn test_rejects_malformed_parameters() {
        assert!("normal[mean]".parse::<DistributionSpec>().is_err());
        assert!("normal[mean=abc]".parse::<DistributionSpec>().is_err());
        assert!("uniform[min=0]".parse::<DistributionSpec>().is_err());
        assert!("".parse::<DistributionSpec>().is_err());
    }
}
