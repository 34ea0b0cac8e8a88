//! This module contains the [Rule] type as well as the [chain_rules] macro for applying
//! rules on top of one another.
//!
//! A rule receives a piece of state, checks one property of it, and hands the state back
//! unchanged if the property holds. Rules are applied in order and the first violation
//! short-circuits the chain.

/// A boxed validation rule over `T`, failing with `E`.
pub type Rule<T, E = anyhow::Error> = Box<dyn Fn(T) -> Result<T, E>>;

/// Applies each rule to `$state` in order, stopping at the first [Err].
///
/// Any callable `Fn(T) -> Result<T, E>` is accepted, including plain functions and
/// boxed [Rule]s.
#[macro_export]
macro_rules! chain_rules {
    ($state:expr, $($rule:expr),+ $(,)?) => {{
        let result = Ok($state);
        $(
            let result = result.and_then(|val| $rule(val));
        )+
        result
    }};
}
