use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Serve the browser game
    Web { bind: String, port: u16 },
    /// Play in the terminal against a roster file
    Play { csv_path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    /// Fixed seed for the random source, mostly for demos and debugging
    pub seed: Option<u64>,
}

impl Config {
    /// Builds the config from process arguments and environment
    pub fn from_env() -> Result<Config, ConfigError> {
        let args: Vec<String> = std::env::args().collect();
        Config::parse(&args, |key| std::env::var(key).ok())
    }

    /// Parses `args` (including the program name) with `env` as the variable lookup
    ///
    /// * `web [port]` - port falls back to `BOOM_PAM_PORT`, then 8080; bind address from `BOOM_PAM_BIND`
    /// * `play <roster.csv>`
    /// * no arguments - same as `web`
    pub fn parse<F>(args: &[String], env: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = match env("BOOM_PAM_SEED") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidSeed(raw))?),
            None => None,
        };

        let mode = match args.get(1).map(String::as_str) {
            None | Some("web") => {
                let port = match args.get(2).cloned().or_else(|| env("BOOM_PAM_PORT")) {
                    Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
                    None => DEFAULT_PORT,
                };
                let bind = env("BOOM_PAM_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
                Mode::Web { bind, port }
            }
            Some("play") => {
                let csv_path = args.get(2).ok_or(ConfigError::Usage)?;
                Mode::Play { csv_path: PathBuf::from(csv_path) }
            }
            Some(_) => return Err(ConfigError::Usage),
        };

        Ok(Config { mode, seed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("boom-pam").chain(list.iter().copied()).map(String::from).collect()
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_web_on_8080() {
        let config = Config::parse(&args(&[]), env(&[])).unwrap();
        assert_eq!(config.mode, Mode::Web { bind: "0.0.0.0".to_string(), port: 8080 });
        assert_eq!(config.seed, None);
    }

    #[test]
    fn port_argument_beats_environment() {
        let vars = env(&[("BOOM_PAM_PORT", "9000"), ("BOOM_PAM_BIND", "127.0.0.1")]);
        let config = Config::parse(&args(&["web", "3000"]), vars).unwrap();
        assert_eq!(config.mode, Mode::Web { bind: "127.0.0.1".to_string(), port: 3000 });

        let config = Config::parse(&args(&["web"]), env(&[("BOOM_PAM_PORT", "9000")])).unwrap();
        assert_eq!(config.mode, Mode::Web { bind: "0.0.0.0".to_string(), port: 9000 });
    }

    #[test]
    fn play_needs_a_path() {
        let config = Config::parse(&args(&["play", "people.csv"]), env(&[("BOOM_PAM_SEED", "42")])).unwrap();
        assert_eq!(config.mode, Mode::Play { csv_path: PathBuf::from("people.csv") });
        assert_eq!(config.seed, Some(42));
        assert_eq!(Config::parse(&args(&["play"]), env(&[])), Err(ConfigError::Usage));
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            Config::parse(&args(&["web", "eighty"]), env(&[])),
            Err(ConfigError::InvalidPort("eighty".to_string()))
        );
        assert_eq!(
            Config::parse(&args(&[]), env(&[("BOOM_PAM_SEED", "x")])),
            Err(ConfigError::InvalidSeed("x".to_string()))
        );
        assert_eq!(Config::parse(&args(&["dance"]), env(&[])), Err(ConfigError::Usage));
    }
}
