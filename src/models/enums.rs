use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
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
    };
}

str_enum!(Sex {
    Male => "M",
    Female => "F",
});

str_enum!(PaymentMethod {
    Cash => "cash",
    Card => "card",
});

str_enum!(ReceiptStatus {
    Issued => "issued",
    Sent => "sent",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn enum_round_trips_through_str() {
        assert_eq!(Sex::from_str(Sex::Male.as_str()).unwrap(), Sex::Male);
        assert_eq!(
            PaymentMethod::from_str("card").unwrap(),
            PaymentMethod::Card
        );
        assert_eq!(
            ReceiptStatus::from_str("sent").unwrap(),
            ReceiptStatus::Sent
        );
    }

    #[test]
    fn unknown_value_is_rejected() {
        let err = ReceiptStatus::from_str("draft").unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
    }
}
