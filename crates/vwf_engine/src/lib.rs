#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc
)]

mod error;
pub use error::*;

mod record;
pub use record::*;

mod layout;
pub use layout::*;

mod charmap;
pub use charmap::*;

mod session;
pub use session::*;

mod render;
pub use render::*;
