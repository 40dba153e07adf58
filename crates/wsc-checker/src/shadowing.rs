//! Closure parameters that shadow `self`.

use wsc_parser::NodeArena;
use wsc_parser::parser::ClosureParameters;

/// Whether a parameter of the closure is itself named `self`.
pub fn self_is_shadowed(arena: &NodeArena, parameters: &ClosureParameters) -> bool {
    match parameters {
        ClosureParameters::None => false,
        ClosureParameters::Shorthand(names) => {
            names.iter().any(|&name| arena.is_self_reference(name))
        }
        ClosureParameters::Parameters(parameters) => parameters.iter().any(|&parameter| {
            arena
                .get_parameter(parameter)
                .is_some_and(|data| arena.is_self_reference(data.binding_name()))
        }),
    }
}
