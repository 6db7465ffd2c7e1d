mod fixture_wizard;

pub use fixture_wizard::*;
