//! Status enums
//!
//! Every lifecycle-managed entity stores its status as lowercase text. The
//! enums here are the only values the server will read or write.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A status string that is not part of the expected set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All values, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownVariant;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

text_enum! {
    /// Reservation status
    ///
    /// Public submissions only ever produce `Pending` or `Waitlist`;
    /// `Confirmed` is set by staff.
    ReservationStatus as "reservation status" {
        Pending => "pending",
        Confirmed => "confirmed",
        Cancelled => "cancelled",
        Waitlist => "waitlist",
    }
}

text_enum! {
    /// Custom-cake inquiry status (fulfillment stage)
    InquiryStatus as "inquiry status" {
        New => "new",
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

text_enum! {
    /// Cart order status (delivery stage)
    CartOrderStatus as "customer order status" {
        Pending => "pending",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
}

text_enum! {
    /// Where a cart order is served
    DeliveryType as "delivery type" {
        Home => "home",
        Restaurant => "restaurant",
    }
}

text_enum! {
    /// Back-office staff role
    StaffRole as "staff role" {
        Admin => "admin",
        Manager => "manager",
        Viewer => "viewer",
    }
}

impl Default for InquiryStatus {
    fn default() -> Self {
        Self::New
    }
}

impl Default for CartOrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl Default for StaffRole {
    fn default() -> Self {
        Self::Viewer
    }
}
