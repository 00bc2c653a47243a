pub mod memo;

pub use memo::{IndexMemo, MemoKey};
