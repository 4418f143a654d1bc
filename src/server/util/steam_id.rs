//! Steam account id parsing and rendering.
//!
//! Individual Steam accounts are identified by a 32-bit account number `N`. The three
//! textual forms in common use all encode it:
//!
//! - `id64`: `76561197960265728 + N`
//! - `steam2`: `STEAM_X:Y:Z` with `Y = N & 1`, `Z = N >> 1` (`X` is the universe)
//! - `steam3`: `[U:1:N]`

use std::fmt;

use url::Url;

use crate::server::error::AppError;

/// `id64` of account number 0 in the public universe.
const ID64_BASE: u64 = 76561197960265728;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SteamId {
    account_id: u32,
}

impl SteamId {
    pub fn from_account_id(account_id: u32) -> Self {
        Self { account_id }
    }

    /// Returns `None` for ids outside the individual-account range.
    pub fn from_id64(id64: u64) -> Option<Self> {
        let account_id = id64.checked_sub(ID64_BASE)?;
        u32::try_from(account_id).ok().map(Self::from_account_id)
    }

    /// Parses any supported representation.
    ///
    /// Accepts a 64-bit id, `STEAM_X:Y:Z`, `[U:1:N]` (brackets optional) or a
    /// `steamcommunity.com/profiles/<id64>` URL. Surrounding whitespace is ignored.
    ///
    /// # Returns
    /// - `Ok(SteamId)` - Input named an individual Steam account
    /// - `Err(AppError::BadRequest)` - Input matched none of the formats
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let input = input.trim();

        let parsed = if input.starts_with("STEAM_") {
            Self::parse_steam2(input)
        } else if input.starts_with("[U:") || input.starts_with("U:") {
            Self::parse_steam3(input)
        } else if input.starts_with("http://") || input.starts_with("https://") {
            Self::parse_profile_url(input)
        } else {
            input.parse::<u64>().ok().and_then(Self::from_id64)
        };

        parsed.ok_or_else(|| AppError::BadRequest(format!("Invalid Steam id '{}'", input)))
    }

    fn parse_steam2(input: &str) -> Option<Self> {
        let rest = input.strip_prefix("STEAM_")?;
        let mut parts = rest.split(':');

        let universe = parts.next()?.parse::<u8>().ok()?;
        let y = parts.next()?.parse::<u32>().ok()?;
        let z = parts.next()?.parse::<u32>().ok()?;

        if parts.next().is_some() || universe > 1 || y > 1 {
            return None;
        }

        let account_id = z.checked_mul(2)?.checked_add(y)?;
        Some(Self::from_account_id(account_id))
    }

    fn parse_steam3(input: &str) -> Option<Self> {
        let inner = input.strip_prefix('[').unwrap_or(input);
        let inner = match input.starts_with('[') {
            true => inner.strip_suffix(']')?,
            false => inner,
        };

        let account_id = inner.strip_prefix("U:1:")?.parse::<u32>().ok()?;
        Some(Self::from_account_id(account_id))
    }

    /// Only `/profiles/<id64>` URLs carry the id; vanity `/id/<name>` URLs need a lookup
    /// and are rejected.
    fn parse_profile_url(input: &str) -> Option<Self> {
        let url = Url::parse(input).ok()?;

        let host = url.host_str()?;
        if host != "steamcommunity.com" && !host.ends_with(".steamcommunity.com") {
            return None;
        }

        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        if segments.next()? != "profiles" {
            return None;
        }

        let id64 = segments.next()?.parse::<u64>().ok()?;
        if segments.next().is_some() {
            return None;
        }

        Self::from_id64(id64)
    }

    pub fn account_id(&self) -> u32 {
        self.account_id
    }

    pub fn id64(&self) -> u64 {
        ID64_BASE + u64::from(self.account_id)
    }

    /// `STEAM_0:Y:Z`, the form SourceMod's admin files expect.
    pub fn steam2(&self) -> String {
        format!("STEAM_0:{}:{}", self.account_id & 1, self.account_id >> 1)
    }

    pub fn steam3(&self) -> String {
        format!("[U:1:{}]", self.account_id)
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GABEN_ID64: u64 = 76561197960287930;

    #[test]
    fn converts_between_formats() {
        let id = SteamId::from_id64(GABEN_ID64).unwrap();

        assert_eq!(id.account_id(), 22202);
        assert_eq!(id.steam2(), "STEAM_0:0:11101");
        assert_eq!(id.steam3(), "[U:1:22202]");
        assert_eq!(id.id64(), GABEN_ID64);
        assert_eq!(id.to_string(), GABEN_ID64.to_string());
    }

    #[test]
    fn parses_every_format_to_the_same_account() {
        let expected = SteamId::from_account_id(22202);

        for input in [
            "76561197960287930",
            "STEAM_0:0:11101",
            "STEAM_1:0:11101",
            "[U:1:22202]",
            "U:1:22202",
            "https://steamcommunity.com/profiles/76561197960287930",
            "https://steamcommunity.com/profiles/76561197960287930/",
            "  STEAM_0:0:11101  ",
        ] {
            assert_eq!(SteamId::parse(input).unwrap(), expected, "{}", input);
        }
    }

    #[test]
    fn odd_account_ids_use_y_bit() {
        let id = SteamId::parse("STEAM_0:1:4").unwrap();
        assert_eq!(id.account_id(), 9);
        assert_eq!(id.steam2(), "STEAM_0:1:4");
    }

    #[test]
    fn rejects_invalid_input() {
        for input in [
            "",
            "12345",
            "STEAM_0:2:1",
            "STEAM_0:0",
            "STEAM_0:0:1:2",
            "[U:1:abc]",
            "[U:1:5",
            "https://steamcommunity.com/id/gabelogannewell",
            "https://example.com/profiles/76561197960287930",
            "not a steam id",
        ] {
            assert!(
                matches!(SteamId::parse(input), Err(AppError::BadRequest(_))),
                "{}",
                input
            );
        }
    }

    #[test]
    fn rejects_out_of_range_id64() {
        assert_eq!(SteamId::from_id64(ID64_BASE - 1), None);
        assert_eq!(SteamId::from_id64(ID64_BASE + u64::from(u32::MAX) + 1), None);
        assert!(SteamId::from_id64(ID64_BASE + u64::from(u32::MAX)).is_some());
    }
}
