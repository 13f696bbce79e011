pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod net;
pub mod photos;
pub mod qr;
pub mod render;
pub mod timer;
pub mod tasks {
    pub mod controller;
}
