mod flagvec;
mod pool;

pub use flagvec::FlagVec;
pub use pool::{Handle, Pool};
