//! Macros for declaring closed state enumerations.

/// Declare a closed state enum and implement [`State`](crate::core::State) for it.
///
/// The generated enum is `Copy`, hashable, serializes in `snake_case`, and
/// carries an `ALL` table in declaration order so lookup tables can be
/// indexed with `index()`.
///
/// # Example
///
/// ```
/// use ticketflow::state_enum;
/// use ticketflow::core::State;
///
/// state_enum! {
///     pub enum Phase {
///         Draft,
///         Review,
///         Published,
///     }
///     final: [Published]
/// }
///
/// assert_eq!(Phase::COUNT, 3);
/// assert_eq!(Phase::Review.index(), 1);
/// assert!(Phase::Published.is_final());
/// assert_eq!(Phase::Draft.to_string(), "Draft");
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
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Number of variants.
            pub const COUNT: usize = Self::ALL.len();

            /// Position of this variant in [`Self::ALL`].
            pub fn index(self) -> usize {
                self as usize
            }
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
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum Lamp {
            Off,
            Warming,
            On,
            Burnt,
        }
        final: [Burnt]
    }

    #[test]
    fn generates_state_impl() {
        assert_eq!(Lamp::Warming.name(), "Warming");
        assert!(!Lamp::On.is_final());
        assert!(Lamp::Burnt.is_final());
    }

    #[test]
    fn all_follows_declaration_order() {
        assert_eq!(Lamp::COUNT, 4);
        for (position, lamp) in Lamp::ALL.iter().enumerate() {
            assert_eq!(lamp.index(), position);
        }
    }

    #[test]
    fn serializes_snake_case() {
        state_enum! {
            enum Step {
                FirstStep,
                LastStep,
            }
        }

        let json = serde_json::to_string(&Step::FirstStep).unwrap();
        assert_eq!(json, "\"first_step\"");
        assert!(!Step::LastStep.is_final());
    }

    #[test]
    fn display_uses_variant_name() {
        assert_eq!(Lamp::Off.to_string(), "Off");
    }
}
