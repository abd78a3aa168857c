//! Request builders and input validation.
//!
//! Everything here is pure data assembly: validation runs before any
//! network call, and a request that fails validation never produces a
//! partial payload.

mod image;
mod validate;
mod video;

pub use image::{Background, EditRequest, ImageRequest, ImageSize, OutputFormat, Quality};
pub use validate::{validate_prompt, MAX_PROMPT_LEN, MIN_PROMPT_LEN};
pub use video::{ImageInput, VideoRequest, DEFAULT_DURATION_SECS};
