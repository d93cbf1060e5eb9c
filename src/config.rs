use std::env;

use anyhow::{ensure, Context, Result};
use serenity::all::{ApplicationId, GuildId};
use url::Url;

const DEFAULT_PORT: u16 = 3000;

/// Environment-provided configuration, read once at startup.
pub struct Config {
    pub token: String,
    pub app_id: ApplicationId,
    pub guild_id: GuildId,
    pub public_key: [u8; 32],
    pub port: u16,
    pub storage_base: Url,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(port) => port.parse().context("PORT must be a number")?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            token: required("DISCORD_TOKEN")?,
            app_id: ApplicationId::new(parse_id("APP_ID")?),
            guild_id: GuildId::new(parse_id("GUILD_ID")?),
            public_key: parse_public_key(&required("PUBLIC_KEY")?)?,
            port,
            storage_base: required("STORAGE_BASE_URL")?
                .parse()
                .context("STORAGE_BASE_URL must be a valid URL")?,
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("missing environment variable {name}"))
}

fn parse_id(name: &str) -> Result<u64> {
    let id: u64 = required(name)?
        .parse()
        .with_context(|| format!("{name} must be a numeric snowflake id"))?;
    ensure!(id != 0, "{name} must not be zero");
    Ok(id)
}

/// Decodes the 64-digit hex verification key Discord shows on the
/// application page, so a malformed key fails here with context instead of
/// panicking when the verifier is built.
fn parse_public_key(value: &str) -> Result<[u8; 32]> {
    hex::decode(value)
        .ok()
        .and_then(|bytes| <[u8; 32]>::try_from(bytes).ok())
        .context("PUBLIC_KEY must be a 64 digit hex string")
}

#[cfg(test)]
mod tests {
    use super::parse_public_key;

    #[test]
    fn accepts_a_64_digit_hex_key() {
        let key = parse_public_key(
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
        )
        .unwrap();
        assert_eq!(key[0], 0xd7);
        assert_eq!(key[31], 0x1a);
    }

    #[test]
    fn rejects_non_hex_and_wrong_length_keys() {
        assert!(parse_public_key("not hex at all").is_err());
        assert!(parse_public_key("abcd").is_err());
        assert!(parse_public_key("").is_err());
    }
}
