//! Runtime configuration binding.
//!
//! The configuration tree is opaque to the layout engine. Blocks read it only
//! through dotted paths, and a missing path always degrades to a caller
//! supplied fallback instead of failing the build.

mod binder;
mod template;

pub use binder::{ConfigBinding, ConfigTree};
pub use template::{stringify, Interpolator, Rendered};
