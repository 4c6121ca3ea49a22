use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Access tier of a registry user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UserGroup {
    /// Owner of the whole network
    Owner,
    /// Administrator of a single region
    RegionAdmin,
    /// Regular user inside a region
    #[default]
    RegionUser,
}

impl UserGroup {
    pub fn code(&self) -> i32 {
        match self {
            Self::Owner => 1,
            Self::RegionAdmin => 2,
            Self::RegionUser => 3,
        }
    }

    /// Maps a stored or transmitted code back to a group. Codes outside
    /// `1..=3` have no group.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Owner),
            2 => Some(Self::RegionAdmin),
            3 => Some(Self::RegionUser),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::RegionAdmin => "region-admin",
            Self::RegionUser => "region-user",
        }
    }
}

impl std::fmt::Display for UserGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for UserGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

/// Lenient serde adapter for `Option<UserGroup>`: out-of-range codes decode as
/// `None` instead of failing the whole payload.
pub(crate) mod lenient {
    use super::*;

    pub fn serialize<S: Serializer>(
        group: &Option<UserGroup>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match group {
            Some(g) => g.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<UserGroup>, D::Error> {
        let code = Option::<i64>::deserialize(deserializer)?;
        Ok(code.and_then(UserGroup::from_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for group in [UserGroup::Owner, UserGroup::RegionAdmin, UserGroup::RegionUser] {
            assert_eq!(UserGroup::from_code(group.code() as i64), Some(group));
        }
    }

    #[test]
    fn test_out_of_range_codes() {
        assert_eq!(UserGroup::from_code(0), None);
        assert_eq!(UserGroup::from_code(4), None);
        assert_eq!(UserGroup::from_code(-1), None);
    }

    #[test]
    fn test_default_is_region_user() {
        assert_eq!(UserGroup::default(), UserGroup::RegionUser);
        assert_eq!(UserGroup::default().code(), 3);
    }
}
