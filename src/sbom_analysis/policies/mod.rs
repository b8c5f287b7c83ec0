mod component_policy;

pub use component_policy::{ComponentPolicy, PolicyFlags};
