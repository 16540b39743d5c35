pub mod common;

mod cancellation;
mod chain_fallback;
