mod backend;
mod request;
mod result;

pub use backend::*;
pub use request::*;
pub use result::*;
