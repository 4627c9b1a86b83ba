//! Startup configuration from positional command line arguments.

use std::fmt;
use std::str::FromStr;

use xmpp::{BareJid, Jid};

/// Room nickname used when the MUC argument carries no resource part.
pub const DEFAULT_NICK: &str = "pegelbot";

/// Errors that can occur while reading the startup arguments.
#[derive(Debug)]
pub enum ConfigError {
    /// Not exactly three positional arguments were given.
    WrongArgCount,
    /// An argument did not parse as a JID.
    InvalidJid { arg: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongArgCount => write!(f, "expected exactly 3 arguments"),
            Self::InvalidJid { arg, value } => {
                write!(f, "invalid JID for <{}>: '{}'", arg, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub struct Config {
    /// Own account JID.
    pub jid: BareJid,
    pub password: String,
    /// Room to join.
    pub room: BareJid,
    /// Nickname inside the room.
    pub nick: String,
}

impl Config {
    /// Reads (jid, password, muc-jid) from the arguments after the program name.
    ///
    /// The MUC argument may be a full JID; its resource part then names the
    /// nickname the bot joins under.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let (Some(jid), Some(password), Some(muc)) = (args.next(), args.next(), args.next())
        else {
            return Err(ConfigError::WrongArgCount);
        };
        if args.next().is_some() {
            return Err(ConfigError::WrongArgCount);
        }

        let jid = BareJid::from_str(&jid)
            .map_err(|_| ConfigError::InvalidJid { arg: "my-jid", value: jid })?;
        let muc = Jid::from_str(&muc)
            .map_err(|_| ConfigError::InvalidJid { arg: "full-muc-jid", value: muc })?;
        let (room, nick) = match muc {
            Jid::Full(full) => {
                let nick = full.resource_str().to_string();
                (full.to_bare(), nick)
            }
            Jid::Bare(bare) => (bare, DEFAULT_NICK.to_string()),
        };

        Ok(Self { jid, password, room, nick })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_muc_jid_sets_nick() {
        let config = Config::from_args(args(&[
            "bot@example.org",
            "secret",
            "bots@conference.example.org/tigger",
        ]))
        .expect("should parse");
        assert_eq!(config.jid.to_string(), "bot@example.org");
        assert_eq!(config.password, "secret");
        assert_eq!(config.room.to_string(), "bots@conference.example.org");
        assert_eq!(config.nick, "tigger");
    }

    #[test]
    fn test_bare_muc_jid_uses_default_nick() {
        let config = Config::from_args(args(&[
            "bot@example.org",
            "secret",
            "bots@conference.example.org",
        ]))
        .expect("should parse");
        assert_eq!(config.room.to_string(), "bots@conference.example.org");
        assert_eq!(config.nick, DEFAULT_NICK);
    }

    #[test]
    fn test_no_arguments() {
        let err = Config::from_args(args(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::WrongArgCount));
    }

    #[test]
    fn test_two_arguments() {
        let err = Config::from_args(args(&["bot@example.org", "secret"])).unwrap_err();
        assert!(matches!(err, ConfigError::WrongArgCount));
    }

    #[test]
    fn test_four_arguments() {
        let err = Config::from_args(args(&[
            "bot@example.org",
            "secret",
            "bots@conference.example.org",
            "extra",
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::WrongArgCount));
    }

    #[test]
    fn test_invalid_own_jid() {
        let err = Config::from_args(args(&["", "secret", "bots@conference.example.org"]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJid { arg: "my-jid", .. }));
    }
}
