pub mod data;
pub mod dictionary;
pub mod expand;
pub mod matcher;
pub mod search;
pub mod structs;
pub use fxhash::FxHashSet;
