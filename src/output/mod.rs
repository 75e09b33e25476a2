pub mod layout;
pub mod writer;

pub use layout::OutputLayout;
pub use writer::{has_png_signature, verify_written, write_and_verify, write_image, PNG_SIGNATURE};
