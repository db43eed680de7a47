use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A closed set of policy values spelled as snake_case string literals.
pub trait Policy: Sized + Copy {
    /// Every accepted literal, in declaration order.
    const ALLOWED: &'static [&'static str];

    fn from_literal(s: &str) -> Option<Self>;
    fn as_str(self) -> &'static str;
}

macro_rules! policy_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $lit)] $variant, )+
        }

        impl Policy for $name {
            const ALLOWED: &'static [&'static str] = &[$($lit),+];

            fn from_literal(s: &str) -> Option<Self> {
                match s {
                    $( $lit => Some($name::$variant), )+
                    _ => None,
                }
            }

            fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $lit, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_literal(s).ok_or_else(|| {
                    format!(
                        "invalid {}: {} (expected one of: {})",
                        stringify!($name),
                        s,
                        Self::ALLOWED.join(", ")
                    )
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

policy_enum! {
    /// How a sync treats calendar events no longer present in the shift data.
    DeletionPolicy {
        /// Delete anything not in the source.
        FullSync => "full_sync",
        /// Delete only events the sync created; keep manual entries.
        PreserveManual => "preserve_manual",
        /// Never delete.
        AppendOnly => "append_only",
    }
}

policy_enum! {
    /// What to do when a shift already exists in the calendar.
    DuplicateShiftPolicy {
        Update => "update",
        Skip => "skip",
        CreateNew => "create_new",
    }
}

policy_enum! {
    /// Reaction to two shifts overlapping for the same employee.
    OverlappingShiftPolicy {
        Error => "error",
        Warn => "warn",
        Ignore => "ignore",
    }
}

policy_enum! {
    /// Reaction to a failed calendar API call.
    ApiFailurePolicy {
        Abort => "abort",
        Retry => "retry",
        LogContinue => "log_continue",
    }
}

policy_enum! {
    /// What happens to already-applied changes when a sync stops midway.
    PartialUpdatePolicy {
        PreserveExisting => "preserve_existing",
        RevertAll => "revert_all",
        Continue => "continue",
    }
}

policy_enum! {
    /// Shift data names an employee the config does not know.
    MissingEmployeePolicy {
        Error => "error",
        WarnContinue => "warn_continue",
        Skip => "skip",
    }
}

policy_enum! {
    /// The config knows an employee the shift data never mentions.
    ExtraEmployeePolicy {
        Create => "create",
        Warn => "warn",
        Ignore => "ignore",
    }
}
