//! `define_port_error!`: declares a port error enum in which every variant
//! names the domain [`ErrorCode`](crate::domain::ErrorCode) it surfaces as.
//!
//! Besides the enum the macro generates:
//! - a snake_case constructor per variant whose parameters accept anything
//!   convertible into the field type;
//! - `code()`, returning the variant's declared error code.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum StoreError {
//!         Connection { message: String } => ServiceUnavailable: "store offline: {message}",
//!     }
//! }
//! assert_eq!(StoreError::connection("refused").code(), ErrorCode::ServiceUnavailable);
//! ```

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => { Self::$variant { .. } };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )?
                    => $code:ident : $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Domain error code this failure surfaces as.
            pub fn code(&self) -> $crate::domain::ErrorCode {
                match self {
                    $(
                        define_port_error!(@pattern $variant $( { $($field : $ty),* } )?) =>
                            $crate::domain::ErrorCode::$code,
                    )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use crate::domain::ErrorCode;

    define_port_error! {
        pub enum LedgerError {
            Closed => ServiceUnavailable: "ledger closed",
            UnknownEntry { id: String } => NotFound: "no ledger entry {id}",
            Overdrawn { account: String, cents: i64 } =>
                InvalidRequest: "{account} overdrawn by {cents}",
        }
    }

    #[test]
    fn unit_variant_has_a_bare_constructor() {
        assert_eq!(LedgerError::closed(), LedgerError::Closed);
    }

    #[test]
    fn string_fields_accept_str() {
        assert_eq!(
            LedgerError::unknown_entry("tour-1").to_string(),
            "no ledger entry tour-1"
        );
    }

    #[test]
    fn each_variant_reports_its_declared_code() {
        assert_eq!(LedgerError::closed().code(), ErrorCode::ServiceUnavailable);
        assert_eq!(LedgerError::unknown_entry("x").code(), ErrorCode::NotFound);
        let overdrawn = LedgerError::overdrawn("savings", 1_250_i64);
        assert_eq!(overdrawn.code(), ErrorCode::InvalidRequest);
        assert_eq!(overdrawn.to_string(), "savings overdrawn by 1250");
    }
}
