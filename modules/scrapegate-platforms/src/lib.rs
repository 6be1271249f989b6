pub mod gateway;
pub mod platforms;
pub mod registry;
pub mod runner;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use gateway::{ActorGateway, ActorRun};
pub use platforms::{
    instagram, linkedin, meta_ads, pinterest, threads, tiktok, youtube,
};
pub use registry::{parse_body, ServiceRegistry};
pub use runner::{execute, ActorRequest};
