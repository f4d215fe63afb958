use std::{env, fmt, path::PathBuf, time::Duration};

use crate::{domain::ChannelId, errors::Error, Result};

pub const DEFAULT_WATER_BOWL_ML: u32 = 300;
pub const DEFAULT_PET_NAME: &str = "Yanagi";
pub const DEFAULT_PROMPT_TIMEOUT: Duration = Duration::from_secs(60);

/// Typed, read-only configuration loaded once at startup.
///
/// Built by `load()` and shared as `Arc<Config>`; nothing reads the
/// environment after this point.
#[derive(Clone)]
pub struct Config {
    // Platform
    pub discord_token: String,

    // Destinations
    pub toilet_channel: ChannelId,
    pub foodwater_channel: ChannelId,

    // Care constants
    pub water_bowl_ml: u32,
    pub pet_name: String,

    // Food/Water prompt inactivity window
    pub prompt_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"<redacted>")
            .field("toilet_channel", &self.toilet_channel)
            .field("foodwater_channel", &self.foodwater_channel)
            .field("water_bowl_ml", &self.water_bowl_ml)
            .field("pet_name", &self.pet_name)
            .field("prompt_timeout", &self.prompt_timeout)
            .finish()
    }
}

impl Config {
    /// Load `.env` (real environment variables win), then validate.
    pub fn load() -> Result<Self> {
        check_dotenv(dotenvy::dotenv())?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source (env in production, maps in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let discord_token = lookup("TOKEN").map(|s| s.trim().to_string()).unwrap_or_default();
        if discord_token.is_empty() {
            return Err(Error::Config(
                "TOKEN environment variable is required".to_string(),
            ));
        }

        let toilet_channel = required_channel(&lookup, "TOILET_CHANNEL_ID")?;
        let foodwater_channel = required_channel(&lookup, "FOODWATER_CHANNEL_ID")?;

        let water_bowl_ml = match lookup("WATER_BOWL_ML").and_then(non_empty) {
            None => DEFAULT_WATER_BOWL_ML,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(ml) if ml > 0 => ml,
                _ => {
                    return Err(Error::Config(format!(
                        "WATER_BOWL_ML must be a positive integer, got {raw:?}"
                    )))
                }
            },
        };

        let pet_name = lookup("PET_NAME")
            .and_then(non_empty)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_PET_NAME.to_string());

        let prompt_timeout = match lookup("PROMPT_TIMEOUT_SECS").and_then(non_empty) {
            None => DEFAULT_PROMPT_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::Config(format!(
                        "PROMPT_TIMEOUT_SECS must be a positive integer, got {raw:?}"
                    )))
                }
            },
        };

        Ok(Self {
            discord_token,
            toilet_channel,
            foodwater_channel,
            water_bowl_ml,
            pet_name,
            prompt_timeout,
        })
    }
}

fn required_channel(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<ChannelId> {
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Err(Error::Config(format!(
            "{key} environment variable is required"
        )));
    };
    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(ChannelId(id)),
        _ => Err(Error::Config(format!(
            "{key} must be a numeric channel id, got {raw:?}"
        ))),
    }
}

/// A missing `.env` is fine; a malformed one is a startup error.
fn check_dotenv(outcome: dotenvy::Result<PathBuf>) -> Result<()> {
    match outcome {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::Config(format!("failed to read .env: {e}"))),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("TOKEN", "abc"),
        ("TOILET_CHANNEL_ID", "111"),
        ("FOODWATER_CHANNEL_ID", "222"),
    ];

    #[test]
    fn defaults_apply_when_optional_values_are_absent() {
        let cfg = Config::from_lookup(lookup(BASE)).unwrap();
        assert_eq!(cfg.discord_token, "abc");
        assert_eq!(cfg.toilet_channel, ChannelId(111));
        assert_eq!(cfg.foodwater_channel, ChannelId(222));
        assert_eq!(cfg.water_bowl_ml, 300);
        assert_eq!(cfg.pet_name, "Yanagi");
        assert_eq!(cfg.prompt_timeout, Duration::from_secs(60));
    }

    #[test]
    fn optional_values_override_defaults() {
        let mut pairs = BASE.to_vec();
        pairs.extend([
            ("WATER_BOWL_ML", " 450 "),
            ("PET_NAME", "Mochi"),
            ("PROMPT_TIMEOUT_SECS", "30"),
        ]);
        let cfg = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(cfg.water_bowl_ml, 450);
        assert_eq!(cfg.pet_name, "Mochi");
        assert_eq!(cfg.prompt_timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = Config::from_lookup(lookup(&BASE[1..])).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("TOKEN")));
    }

    #[test]
    fn blank_token_is_fatal() {
        let mut pairs = BASE.to_vec();
        pairs[0] = ("TOKEN", "   ");
        assert!(Config::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn channel_ids_must_be_present_and_numeric() {
        let missing = [BASE[0], BASE[2]];
        let err = Config::from_lookup(lookup(&missing)).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("TOILET_CHANNEL_ID")));

        let mut bad = BASE.to_vec();
        bad[2] = ("FOODWATER_CHANNEL_ID", "food-channel");
        let err = Config::from_lookup(lookup(&bad)).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("FOODWATER_CHANNEL_ID")));

        let mut zero = BASE.to_vec();
        zero[1] = ("TOILET_CHANNEL_ID", "0");
        assert!(Config::from_lookup(lookup(&zero)).is_err());
    }

    #[test]
    fn bowl_capacity_must_be_positive() {
        for raw in ["0", "-5", "lots"] {
            let mut pairs = BASE.to_vec();
            pairs.push(("WATER_BOWL_ML", raw));
            let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(matches!(err, Error::Config(ref m) if m.contains("WATER_BOWL_ML")));
        }
    }

    #[test]
    fn debug_output_never_shows_the_token() {
        let mut pairs = BASE.to_vec();
        pairs[0] = ("TOKEN", "MTA5.secret-token");
        let cfg = Config::from_lookup(lookup(&pairs)).unwrap();

        let out = format!("{cfg:?}");
        assert!(!out.contains("secret-token"), "{out}");
        assert!(out.contains("<redacted>"));
        assert!(out.contains("toilet_channel"));
    }

    #[test]
    fn missing_dotenv_is_ignored_but_malformed_is_fatal() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, ".env");
        assert!(check_dotenv(Err(dotenvy::Error::Io(missing))).is_ok());
        assert!(check_dotenv(Ok(PathBuf::from(".env"))).is_ok());

        let bad = dotenvy::Error::LineParse("TOKEN='abc".to_string(), 6);
        let err = check_dotenv(Err(bad)).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains(".env")));
    }

    #[test]
    fn dotenv_values_go_through_the_same_validation() {
        let file = b"# carelog\nTOKEN=\"abc\"\nTOILET_CHANNEL_ID='111'\nFOODWATER_CHANNEL_ID=222\nWATER_BOWL_ML=250\n";
        let map: HashMap<String, String> = dotenvy::from_read_iter(&file[..])
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        let cfg = Config::from_lookup(|key| map.get(key).cloned()).unwrap();
        assert_eq!(cfg.discord_token, "abc");
        assert_eq!(cfg.toilet_channel, ChannelId(111));
        assert_eq!(cfg.water_bowl_ml, 250);
    }
}
