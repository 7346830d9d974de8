//! API middleware.
//!
//! Only an access logger today; it wraps every route.

pub mod audit;
