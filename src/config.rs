//! Server configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 4820;
const DEFAULT_TIMER_SECONDS: u32 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Quiz-duration budget applied when the host does not pick one
    pub default_timer_seconds: u32,
    /// Optional JSON file overriding the built-in question bank
    pub questions_path: Option<PathBuf>,
}

impl Config {
    /// Read configuration from environment variables, falling back to
    /// defaults for anything missing or unparseable.
    pub fn from_env() -> Self {
        let bind_addr = match std::env::var("QUIZCAST_BIND") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid QUIZCAST_BIND '{}', binding to 0.0.0.0", raw);
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            }),
            Err(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match std::env::var("QUIZCAST_PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid QUIZCAST_PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let default_timer_seconds = match std::env::var("QUIZCAST_TIMER_SECONDS") {
            Ok(raw) => match raw.parse() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(
                        "Invalid QUIZCAST_TIMER_SECONDS '{}', using {}",
                        raw,
                        DEFAULT_TIMER_SECONDS
                    );
                    DEFAULT_TIMER_SECONDS
                }
            },
            Err(_) => DEFAULT_TIMER_SECONDS,
        };

        let questions_path = std::env::var("QUIZCAST_QUESTIONS").ok().map(PathBuf::from);

        Self {
            bind_addr,
            port,
            default_timer_seconds,
            questions_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("QUIZCAST_BIND");
        std::env::remove_var("QUIZCAST_PORT");
        std::env::remove_var("QUIZCAST_TIMER_SECONDS");
        std::env::remove_var("QUIZCAST_QUESTIONS");
    }

    #[test]
    #[serial]
    fn defaults_when_env_unset() {
        clear_env();
        let config = Config::from_env();

        assert_eq!(config.bind_addr, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.default_timer_seconds, DEFAULT_TIMER_SECONDS);
        assert!(config.questions_path.is_none());
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        clear_env();
        std::env::set_var("QUIZCAST_BIND", "127.0.0.1");
        std::env::set_var("QUIZCAST_PORT", "9000");
        std::env::set_var("QUIZCAST_TIMER_SECONDS", "45");
        std::env::set_var("QUIZCAST_QUESTIONS", "/tmp/bank.json");

        let config = Config::from_env();
        clear_env();

        assert_eq!(config.bind_addr, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.port, 9000);
        assert_eq!(config.default_timer_seconds, 45);
        assert_eq!(config.questions_path, Some(PathBuf::from("/tmp/bank.json")));
    }

    #[test]
    #[serial]
    fn falls_back_on_garbage() {
        clear_env();
        std::env::set_var("QUIZCAST_PORT", "not-a-port");
        std::env::set_var("QUIZCAST_TIMER_SECONDS", "0");

        let config = Config::from_env();
        clear_env();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.default_timer_seconds, DEFAULT_TIMER_SECONDS);
    }
}
