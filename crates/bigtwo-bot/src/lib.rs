pub mod params;
pub mod policy;

pub use params::PolicyParams;
pub use policy::{
    BalancePolicy, DecomposerPolicy, ParsePolicyKindError, Policy, PolicyContext, PolicyKind,
    ReservePolicy, SinglePolicy, play_request, play_request_with,
};
