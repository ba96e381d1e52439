//! Macro for declaring status enums.

/// Generate a status enum together with its `State` implementation.
///
/// Variants listed under `final:` are terminal, variants listed under
/// `running:` accept input and accrue time.
///
/// # Example
///
/// ```
/// use sudoku_classic::core::State;
/// use sudoku_classic::state_enum;
///
/// state_enum! {
///     pub enum Round {
///         Playing,
///         Suspended,
///         Won,
///     }
///     final: [Won]
///     running: [Playing]
/// }
///
/// assert_eq!(Round::Suspended.name(), "Suspended");
/// assert!(Round::Won.is_final());
/// assert!(Round::Playing.is_running());
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
        $(running: [$($running:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
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

            #[allow(unreachable_patterns)]
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            #[allow(unreachable_patterns)]
            fn is_running(&self) -> bool {
                match self {
                    $($(Self::$running => true,)*)?
                    _ => false,
                }
            }
        }
    };
}
