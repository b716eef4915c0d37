//! Macros for ergonomic state machine construction.

/// Generate a `State` implementation for a plain enum.
///
/// Each variant's label is its identifier, so `Paid` is bound by hook keys
/// such as `enter_Paid`.
///
/// # Example
///
/// ```
/// use waypoint::state_enum;
/// use waypoint::core::State;
///
/// state_enum! {
///     pub enum OrderState {
///         Created,
///         Paid,
///         Shipped,
///         Completed,
///         Canceled,
///     }
///     final: [Completed, Canceled]
/// }
///
/// assert_eq!(OrderState::Paid.name(), "Paid");
/// assert!(OrderState::Canceled.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }
        }
    };
}
