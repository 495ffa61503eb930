//! Environment variable overrides for the option structs.
//!
//! Options are normally configured in code through the builder methods of
//! [`PaintOptions`][crate::paint::PaintOptions] and
//! [`SortingOptions`][crate::sorting::SortingOptions]. The `from_env` constructors of those types
//! additionally honor these variables:
//!
//! * `GESTURA_MIRROR`: whether the sorting game mirrors the pointer horizontally. Allowed values are
//!   `1`, `true`, `on` and `0`, `false`, `off`.
//! * `GESTURA_FIST`: the fist detector used by the sorting game, `strict` or `light`.
//! * `GESTURA_DEBOUNCE`: number of consecutive frames a new hand pose has to be seen before it is
//!   acted upon. `1` disables debouncing.

use std::{env, env::VarError, str::FromStr};

use anyhow::{bail, Context};

pub const ENV_VAR_MIRROR: &str = "GESTURA_MIRROR";
pub const ENV_VAR_FIST: &str = "GESTURA_FIST";
pub const ENV_VAR_DEBOUNCE: &str = "GESTURA_DEBOUNCE";

/// Reads override variables through a lookup function.
///
/// [`Overrides::from_env`] reads the process environment.
pub struct Overrides<F> {
    lookup: F,
}

impl Overrides<fn(&str) -> Result<String, VarError>> {
    pub fn from_env() -> Self {
        Self::new(|name: &str| env::var(name))
    }
}

impl<F: Fn(&str) -> Result<String, VarError>> Overrides<F> {
    /// Creates an override reader that looks variables up with `lookup`.
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }

    /// Reads a raw variable, treating "not set" as `None`.
    fn var(&self, name: &str) -> anyhow::Result<Option<String>> {
        match (self.lookup)(name) {
            Ok(v) => {
                log::debug!("override: `{name}` is set to '{v}'");
                Ok(Some(v))
            }
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(s)) => {
                bail!("invalid value set for `{name}` variable: {s:?} is not valid UTF-8")
            }
        }
    }

    /// Reads a boolean flag.
    pub fn flag(&self, name: &str) -> anyhow::Result<Option<bool>> {
        match self.var(name)?.as_deref() {
            None => Ok(None),
            Some(v) => parse_flag(v)
                .map(Some)
                .with_context(|| format!("invalid value set for `{name}` variable")),
        }
    }

    /// Reads and parses a value.
    pub fn parse<T>(&self, name: &str) -> anyhow::Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.var(name)? {
            None => Ok(None),
            Some(v) => match v.trim().parse() {
                Ok(value) => Ok(Some(value)),
                Err(e) => bail!("invalid value set for `{name}` variable: '{v}' ({e})"),
            },
        }
    }

    /// Reads the pose debounce window, which must be at least 1.
    pub fn debounce_window(&self) -> anyhow::Result<Option<u32>> {
        match self.parse::<u32>(ENV_VAR_DEBOUNCE)? {
            Some(0) => {
                bail!("invalid value set for `{ENV_VAR_DEBOUNCE}` variable: must be at least 1")
            }
            other => Ok(other),
        }
    }
}

fn parse_flag(v: &str) -> anyhow::Result<bool> {
    match v {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => bail!("'{v}' is not a boolean (expected one of `1`, `true`, `on`, `0`, `false`, `off`)"),
    }
}
