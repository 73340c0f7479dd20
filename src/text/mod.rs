pub mod measure;
pub mod region;

pub use measure::{slice_units, text_len};
pub use region::Region;
