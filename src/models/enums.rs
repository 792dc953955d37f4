use crate::db::DatabaseError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
///
/// Variants serialize to their wire string, and parsing an unknown string
/// fails with `DatabaseError::InvalidEnum` instead of falling back to a default.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(
    /// ABO blood group with Rh factor.
    BloodType {
        ONeg => "O-",
        OPos => "O+",
        ANeg => "A-",
        APos => "A+",
        BNeg => "B-",
        BPos => "B+",
        AbNeg => "AB-",
        AbPos => "AB+",
    }
);

impl BloodType {
    /// Row/column position in the compatibility table.
    pub fn index(self) -> usize {
        match self {
            Self::ONeg => 0,
            Self::OPos => 1,
            Self::ANeg => 2,
            Self::APos => 3,
            Self::BNeg => 4,
            Self::BPos => 5,
            Self::AbNeg => 6,
            Self::AbPos => 7,
        }
    }
}

str_enum!(
    /// Transplantable organs. Declaration order is also the order in which
    /// candidate pairs are emitted for a donor/recipient pair.
    #[derive(PartialOrd, Ord)]
    Organ {
        Heart => "heart",
        Kidney => "kidney",
        Liver => "liver",
        Lungs => "lungs",
        Pancreas => "pancreas",
        Intestines => "intestines",
    }
);

str_enum!(
    /// Recipient priority. Variants are declared low to high so the derived
    /// `Ord` is the ranking order.
    #[derive(PartialOrd, Ord)]
    UrgencyLevel {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
);

str_enum!(DonorStatus {
    Available => "available",
    Matched => "matched",
    Unavailable => "unavailable",
});

str_enum!(RecipientStatus {
    Waiting => "waiting",
    Matched => "matched",
});

str_enum!(MatchStatus {
    Pending => "pending",
    Accepted => "accepted",
    Completed => "completed",
});

impl MatchStatus {
    /// The single status a match may move to from this one.
    pub fn next(self) -> Option<MatchStatus> {
        match self {
            Self::Pending => Some(Self::Accepted),
            Self::Accepted => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Pending and accepted matches hold the donor and recipient.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }
}

str_enum!(UserRole {
    Donor => "donor",
    Recipient => "recipient",
    Hospital => "hospital",
});
