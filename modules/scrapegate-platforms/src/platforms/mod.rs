pub mod instagram;
pub mod linkedin;
pub mod meta_ads;
pub mod pinterest;
pub mod threads;
pub mod tiktok;
pub mod youtube;
