pub mod capture;
pub mod core;
pub mod loading;
pub mod overlay;
pub mod projection;
pub mod session;
