pub mod client_meta;
pub mod draw_user;
pub mod validated_json;

pub use client_meta::ClientMeta;
pub use draw_user::{DrawUser, MaybeDrawUser};
pub use validated_json::ValidatedJson;
