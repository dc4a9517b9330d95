//! Helper macro for declaring driven-port error enums.
//!
//! Each variant carries named fields and a display message; a snake_case
//! constructor accepting `impl Into<_>` arguments is generated per variant.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant {
                    $(
                        #[doc = concat!("Value of `", stringify!($field), "`.")]
                        $field : $ty
                    ),*
                },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Unreachable { message: String } => "unreachable: {message}",
            Conflict { key: String, attempts: u32 } => "conflict on {key} after {attempts}",
        }
    }

    #[test]
    fn constructor_converts_str_arguments() {
        let err = SamplePortError::unreachable("timeout");
        assert_eq!(err, SamplePortError::Unreachable { message: "timeout".to_owned() });
        assert_eq!(err.to_string(), "unreachable: timeout");
    }

    #[test]
    fn constructor_handles_multiple_fields() {
        let err = SamplePortError::conflict("email", 2_u32);
        assert_eq!(err.to_string(), "conflict on email after 2");
    }
}
