//! Reusable policy building blocks.

mod composite;
mod func;
mod ownership;
mod state_guard;

pub use composite::CompositePolicy;
pub use func::FnPolicy;
pub use ownership::OwnershipPolicy;
pub use state_guard::StateGuardPolicy;

use std::collections::HashSet;

pub(crate) fn ability_set<I, S>(abilities: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    abilities.into_iter().map(Into::into).collect()
}
