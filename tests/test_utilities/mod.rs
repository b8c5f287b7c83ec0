// Each test binary uses a different subset of the shared helpers
#![allow(dead_code)]

pub mod mocks;
