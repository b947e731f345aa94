pub mod decision;
pub mod forward;
pub mod params;
pub mod proxy;
pub mod response;
pub mod timing;
